use super::{FetchMode, Fetcher};
use crate::FetchError;
use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, warn};

/// One browser tab driven from Rust.
pub trait BrowserSession: Send {
    fn open(&mut self, url: &str) -> Result<(), FetchError>;

    /// Blocks until `selector` matches, failing with [`FetchError::Timeout`]
    /// once `timeout` elapses.
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), FetchError>;

    fn page_source(&mut self) -> Result<String, FetchError>;

    /// Must be safe to call more than once.
    fn close(&mut self) -> Result<(), FetchError>;
}

pub trait BrowserLauncher: Send + Sync + 'static {
    type Session: BrowserSession + 'static;

    fn launch(&self) -> Result<Self::Session, FetchError>;
}

/// Closes the wrapped session when dropped unless [`SessionGuard::finish`] ran.
struct SessionGuard<S: BrowserSession> {
    session: S,
    closed: bool,
}

impl<S: BrowserSession> SessionGuard<S> {
    fn new(session: S) -> Self {
        SessionGuard {
            session,
            closed: false,
        }
    }

    fn finish(mut self) -> Result<(), FetchError> {
        self.closed = true;
        self.session.close()
    }
}

impl<S: BrowserSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: BrowserSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: BrowserSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.session.close() {
                warn!("Failed to close browser session: {}", e);
            }
        }
    }
}

pub struct RenderedFetcher<L: BrowserLauncher> {
    launcher: Arc<L>,
    wait_selector: String,
    timeout: Duration,
}

impl<L: BrowserLauncher> RenderedFetcher<L> {
    pub fn new(launcher: L, wait_selector: impl Into<String>, timeout: Duration) -> Self {
        RenderedFetcher {
            launcher: Arc::new(launcher),
            wait_selector: wait_selector.into(),
            timeout,
        }
    }
}

fn render<L: BrowserLauncher>(
    launcher: &L,
    url: &str,
    selector: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let mut session = SessionGuard::new(launcher.launch()?);

    debug!("Open {} in browser", url);
    session.open(url)?;
    session.wait_for(selector, timeout)?;
    let html = session.page_source()?;

    session.finish()?;
    Ok(html)
}

#[async_trait::async_trait]
impl<L: BrowserLauncher> Fetcher for RenderedFetcher<L> {
    fn mode(&self) -> FetchMode {
        FetchMode::Rendered
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let launcher = Arc::clone(&self.launcher);
        let url = url.to_string();
        let selector = self.wait_selector.clone();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || render(launcher.as_ref(), &url, &selector, timeout))
            .await
            .map_err(|e| FetchError::Browser(format!("Browser task failed: {}", e)))?
    }
}
