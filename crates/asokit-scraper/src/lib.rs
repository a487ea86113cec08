pub mod browser;
pub mod error;
pub mod gplay;
pub mod ios;
pub mod pipeline;

pub use browser::{BrowserSession, ChromiumSession, WaitCondition};
pub use error::ScraperError;
pub use gplay::PlayStoreScraper;
pub use ios::IosClient;
pub use pipeline::{analyze_gplay, analyze_ios, Progress, RunOptions};
