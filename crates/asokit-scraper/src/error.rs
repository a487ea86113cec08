use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to launch browser: {0}")]
    BrowserLaunch(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("timed out after {timeout_secs}s waiting for {condition}")]
    WaitTimeout { condition: String, timeout_secs: u64 },
}
