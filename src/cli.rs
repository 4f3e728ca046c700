use clap::{Args, Parser, Subcommand};
use faq_scraper::{
    export::ExportFormat,
    parser::{DEFAULT_ANSWER, DEFAULT_CONTAINER, DEFAULT_QUESTION},
    store::DEFAULT_STORE_FILE,
    FaqSelectors, FetchConfig, FetchMode, WritePolicy,
};
use std::{path::PathBuf, time::Duration};

pub const DEFAULT_URL: &str = "https://docs.example.com/faq";

#[derive(Debug, Parser)]
#[command(version, about = "Scrape an FAQ page into line-delimited JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the FAQ page and write its records to the backing file.
    Extract(ExtractArgs),
    /// Convert the backing file into a download format.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[arg(long, env = "FAQ_URL", default_value = DEFAULT_URL)]
    pub url: String,

    #[arg(long, value_enum, default_value_t = FetchMode::Static)]
    pub mode: FetchMode,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    /// Seconds to wait for the container in rendered mode.
    #[arg(long, default_value_t = 20)]
    pub render_timeout: u64,

    #[arg(long, default_value = DEFAULT_CONTAINER)]
    pub container: String,

    #[arg(long, default_value = DEFAULT_QUESTION)]
    pub question: String,

    #[arg(long, default_value = DEFAULT_ANSWER)]
    pub answer: String,

    #[arg(short, long, env = "FAQ_FILE", default_value = DEFAULT_STORE_FILE)]
    pub out: PathBuf,

    /// Append to the backing file instead of replacing it.
    #[arg(long)]
    pub append: bool,

    /// Print the extracted records.
    #[arg(long)]
    pub print: bool,

    /// Show the browser window in rendered mode.
    #[arg(long)]
    pub headful: bool,
}

impl ExtractArgs {
    pub fn selectors(&self) -> FaqSelectors {
        FaqSelectors {
            container: self.container.clone(),
            question: self.question.clone(),
            answer: self.answer.clone(),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            mode: self.mode,
            request_timeout: Duration::from_secs(self.timeout),
            render_timeout: Duration::from_secs(self.render_timeout),
            wait_selector: self.container.clone(),
            headless: !self.headful,
            ..FetchConfig::default()
        }
    }

    pub fn policy(&self) -> WritePolicy {
        if self.append {
            WritePolicy::Append
        } else {
            WritePolicy::Overwrite
        }
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value_t = ExportFormat::Chat)]
    pub format: ExportFormat,

    #[arg(short, long, env = "FAQ_FILE", default_value = DEFAULT_STORE_FILE)]
    pub input: PathBuf,

    /// Output file; stdout when absent.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
