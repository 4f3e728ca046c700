use super::{FetchConfig, FetchMode, Fetcher};
use crate::FetchError;
use tracing::debug;

/// Plain HTTP fetcher. Redirects follow the client defaults; nothing is retried.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: reqwest::Client,
}

impl StaticFetcher {
    pub fn new(config: &FetchConfig) -> Result<StaticFetcher, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(StaticFetcher { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    fn mode(&self) -> FetchMode {
        FetchMode::Static
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        debug!("Received {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
