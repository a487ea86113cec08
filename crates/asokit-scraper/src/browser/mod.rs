//! Headless browser capability used by the Google Play scraper.
//!
//! [`BrowserSession`] is the seam between the scraping logic and the actual
//! driver. Production code uses [`ChromiumSession`]; tests substitute a
//! scripted in-memory implementation.

mod chromium;

use std::fmt;
use std::time::Duration;

use crate::error::ScraperError;

pub use chromium::ChromiumSession;

/// A DOM condition a session can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition<'a> {
    /// At least one element matches the CSS selector.
    ElementPresent(&'a str),
    /// `document.readyState` is `"complete"`.
    DocumentReady,
}

impl fmt::Display for WaitCondition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::ElementPresent(selector) => write!(f, "element `{selector}`"),
            WaitCondition::DocumentReady => f.write_str("document ready"),
        }
    }
}

/// A controllable browser tab.
///
/// Sessions are used strictly sequentially by one pipeline run and must be
/// released with [`BrowserSession::quit`].
#[allow(async_fn_in_trait)]
pub trait BrowserSession {
    /// Loads `url` in the session's tab.
    async fn navigate(&mut self, url: &str) -> Result<(), ScraperError>;

    /// Blocks until `condition` holds or `timeout` elapses.
    ///
    /// Returns [`ScraperError::WaitTimeout`] when the condition never held.
    async fn wait_for(
        &mut self,
        condition: WaitCondition<'_>,
        timeout: Duration,
    ) -> Result<(), ScraperError>;

    /// Evaluates `script` in the page. `None` means the script produced no
    /// value (for example `undefined`).
    async fn execute_script(
        &mut self,
        script: &str,
    ) -> Result<Option<serde_json::Value>, ScraperError>;

    /// Finds the elements matching `selector` in document order and returns
    /// the value of `attribute` on each (`None` when unset).
    async fn find_elements(
        &mut self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<Option<String>>, ScraperError>;

    /// Shuts the browser down.
    async fn quit(self) -> Result<(), ScraperError>
    where
        Self: Sized;
}
