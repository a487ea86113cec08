use std::time::Duration;

use asokit_core::BrowserSettings;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{BrowserSession, WaitCondition};
use crate::error::ScraperError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const LAUNCH_ARGS: &[&str] = &[
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-images",
    "--blink-settings=imagesEnabled=false",
    "--disable-extensions",
    "--disable-infobars",
];

/// Headless Chromium driven over the DevTools protocol.
///
/// Owns the browser process, the CDP event loop task, and a single tab.
/// Dropping the session without calling [`BrowserSession::quit`] still stops
/// the event loop; `chromiumoxide` kills the child process on drop.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    /// Starts a headless browser and opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::BrowserLaunch`] when no usable Chrome/Chromium
    /// binary is found or the process fails to start.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .window_size(1920, 1080)
            .args(LAUNCH_ARGS.iter().copied())
            .arg(format!("--user-agent={}", settings.user_agent));
        if let Some(path) = &settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScraperError::BrowserLaunch)?;

        tracing::debug!(executable = ?settings.chrome_executable, "launching chromium");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::BrowserLaunch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "chromium event loop stopped");
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(ScraperError::BrowserLaunch(format!("failed to open tab: {e}")));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn probe(&self, condition: WaitCondition<'_>) -> Result<bool, ScraperError> {
        let script = match condition {
            WaitCondition::ElementPresent(selector) => {
                let selector = serde_json::to_string(selector).map_err(|e| {
                    ScraperError::Browser(format!("selector encode failed: {e}"))
                })?;
                format!("document.querySelector({selector}) !== null")
            }
            WaitCondition::DocumentReady => "document.readyState === \"complete\"".to_string(),
        };
        self.page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::Browser(e.to_string()))?
            .into_value::<bool>()
            .map_err(|e| ScraperError::Browser(format!("probe decode failed: {e}")))
    }
}

impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Browser(format!("navigation to {url} failed: {e}")))?;
        Ok(())
    }

    async fn wait_for(
        &mut self,
        condition: WaitCondition<'_>,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let poll = async {
            loop {
                // Transient evaluation errors happen mid-navigation; keep polling.
                if matches!(self.probe(condition).await, Ok(true)) {
                    return;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| ScraperError::WaitTimeout {
                condition: condition.to_string(),
                timeout_secs: timeout.as_secs(),
            })
    }

    async fn execute_script(
        &mut self,
        script: &str,
    ) -> Result<Option<serde_json::Value>, ScraperError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::Browser(e.to_string()))?;
        Ok(result.value().cloned())
    }

    async fn find_elements(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<Option<String>>, ScraperError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| ScraperError::Browser(format!("query `{selector}` failed: {e}")))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in &elements {
            let value = element
                .attribute(attribute)
                .await
                .map_err(|e| ScraperError::Browser(e.to_string()))?;
            values.push(value);
        }
        Ok(values)
    }

    async fn quit(mut self) -> Result<(), ScraperError> {
        self.browser
            .close()
            .await
            .map_err(|e| ScraperError::Browser(format!("close failed: {e}")))?;
        self.browser
            .wait()
            .await
            .map_err(|e| ScraperError::Browser(format!("wait for exit failed: {e}")))?;
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
