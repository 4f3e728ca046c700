mod chrome;
mod http;
mod rendered;

pub use chrome::{ChromeLauncher, ChromeSession};
pub use http::StaticFetcher;
pub use rendered::{BrowserLauncher, BrowserSession, RenderedFetcher};

use crate::{parser::DEFAULT_CONTAINER, FetchError};
use std::{fmt, time::Duration};

pub const DEFAULT_USER_AGENT: &str = concat!("faq-scraper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchMode {
    /// A single HTTP GET.
    Static,
    /// A headless browser session that runs the page's scripts.
    Rendered,
    /// Static first, rendered when the static fetch fails or its page has no FAQ container.
    Auto,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Static => write!(f, "static"),
            FetchMode::Rendered => write!(f, "rendered"),
            FetchMode::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub mode: FetchMode,
    /// Whole-request timeout for static fetches.
    pub request_timeout: Duration,
    /// How long a rendered fetch waits for `wait_selector` to appear.
    pub render_timeout: Duration,
    pub wait_selector: String,
    pub user_agent: String,
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            mode: FetchMode::Static,
            request_timeout: Duration::from_secs(15),
            render_timeout: Duration::from_secs(20),
            wait_selector: DEFAULT_CONTAINER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
        }
    }
}

/// Retrieves the HTML of a page.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    fn mode(&self) -> FetchMode;

    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub fn static_fetcher(config: &FetchConfig) -> Result<Box<dyn Fetcher>, FetchError> {
    Ok(Box::new(StaticFetcher::new(config)?))
}

pub fn rendered_fetcher(config: &FetchConfig) -> Box<dyn Fetcher> {
    Box::new(RenderedFetcher::new(
        ChromeLauncher::new(config.headless),
        config.wait_selector.as_str(),
        config.render_timeout,
    ))
}
