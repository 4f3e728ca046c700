use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

pub mod export;
pub mod fetch;
pub mod parser;
pub mod store;
pub mod viewer;

mod error;
mod record;
mod utils;

pub use error::{Error, FetchError, ParseError, StoreError};
pub use fetch::{FetchConfig, FetchMode, Fetcher};
pub use parser::{FaqParser, FaqSelectors};
pub use record::FaqRecord;
pub use store::RecordStore;
pub use utils::clean_text;

/// What a run does with the records already in the backing file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// The file ends up holding exactly this run's records.
    #[default]
    Overwrite,
    Append,
}

/// One extraction run: fetch, parse, then write.
///
/// Nothing is written unless fetching and parsing both succeed.
pub struct Extractor {
    fetcher: Box<dyn Fetcher>,
    fallback: Option<Box<dyn Fetcher>>,
    parser: FaqParser,
}

impl Extractor {
    pub fn new(fetcher: Box<dyn Fetcher>, parser: FaqParser) -> Self {
        Extractor {
            fetcher,
            fallback: None,
            parser,
        }
    }

    /// Used once when the primary fetch fails or its page has no container.
    pub fn with_fallback(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fallback = Some(fetcher);
        self
    }

    pub fn from_config(config: &FetchConfig, parser: FaqParser) -> Result<Self, FetchError> {
        let extractor = match config.mode {
            FetchMode::Static => Extractor::new(fetch::static_fetcher(config)?, parser),
            FetchMode::Rendered => Extractor::new(fetch::rendered_fetcher(config), parser),
            FetchMode::Auto => Extractor::new(fetch::static_fetcher(config)?, parser)
                .with_fallback(fetch::rendered_fetcher(config)),
        };
        Ok(extractor)
    }

    pub async fn extract(&self, url: &str) -> Result<Vec<FaqRecord>, Error> {
        let primary = self.fetch_and_parse(self.fetcher.as_ref(), url).await;

        let Some(fallback) = self.fallback.as_ref() else {
            return primary;
        };
        match primary {
            Err(Error::Fetch(e)) => {
                warn!("{} fetch failed ({}), trying {}", self.fetcher.mode(), e, fallback.mode());
            }
            Err(Error::Parse(ParseError::ContainerMissing(selector))) => {
                warn!(
                    "No `{}` in {} page, trying {}",
                    selector,
                    self.fetcher.mode(),
                    fallback.mode()
                );
            }
            other => return other,
        }
        self.fetch_and_parse(fallback.as_ref(), url).await
    }

    async fn fetch_and_parse(&self, fetcher: &dyn Fetcher, url: &str) -> Result<Vec<FaqRecord>, Error> {
        debug!("Fetch {} ({})", url, fetcher.mode());
        let html = fetcher.fetch(url).await?;
        Ok(self.parser.parse(&html)?)
    }

    pub async fn run(
        &self,
        url: &str,
        store: &RecordStore,
        policy: WritePolicy,
    ) -> Result<Vec<FaqRecord>, Error> {
        let start = Instant::now();
        let records = self.extract(url).await?;

        match policy {
            WritePolicy::Overwrite => store.replace(&records)?,
            WritePolicy::Append => store.append(&records)?,
        }

        info!(
            "Extracted {} FAQs from {} into {} in {:.2}s",
            records.len(),
            url,
            store.path().display(),
            start.elapsed().as_secs_f64()
        );
        Ok(records)
    }
}

/// Installs the fmt subscriber, filtered by `LOG_LEVEL` or `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(ErrorLayer::default())
        .init();
}
