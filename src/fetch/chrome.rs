use super::{BrowserLauncher, BrowserSession};
use crate::FetchError;
use headless_chrome::{util::Timeout, Browser, LaunchOptions, Tab};
use std::{sync::Arc, time::Duration};
use tracing::debug;

fn browser_error(e: impl std::fmt::Display) -> FetchError {
    FetchError::Browser(e.to_string())
}

fn wait_timeout(selector: &str, timeout: Duration) -> FetchError {
    FetchError::Timeout(format!("`{}` did not appear within {:?}", selector, timeout))
}

/// Starts a local Chrome/Chromium through the DevTools protocol.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(headless: bool) -> Self {
        ChromeLauncher { headless }
    }
}

impl BrowserLauncher for ChromeLauncher {
    type Session = ChromeSession;

    fn launch(&self) -> Result<ChromeSession, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .sandbox(false)
            .build()
            .map_err(browser_error)?;

        debug!("Launch browser (headless: {})", self.headless);
        let browser = Browser::new(options).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;

        Ok(ChromeSession {
            browser: Some(browser),
            tab,
        })
    }
}

pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl BrowserSession for ChromeSession {
    fn open(&mut self, url: &str) -> Result<(), FetchError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_error)?;
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), FetchError> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(()),
            Err(e) if e.is::<Timeout>() => Err(wait_timeout(selector, timeout)),
            Err(e) => Err(browser_error(e)),
        }
    }

    fn page_source(&mut self) -> Result<String, FetchError> {
        self.tab.get_content().map_err(browser_error)
    }

    fn close(&mut self) -> Result<(), FetchError> {
        // Dropping the browser kills the child process.
        if let Some(browser) = self.browser.take() {
            debug!("Close browser");
            let closed = self.tab.close(true).map(|_| ()).map_err(browser_error);
            drop(browser);
            closed?;
        }
        Ok(())
    }
}
