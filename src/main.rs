mod cli;

use clap::Parser;
use cli::{Cli, Command, ExportArgs, ExtractArgs};
use faq_scraper::{export, init_tracing, Extractor, FaqParser, RecordStore};
use std::{fs::File, io};

async fn extract(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parser = FaqParser::new(&args.selectors())?;
    let extractor = Extractor::from_config(&args.fetch_config(), parser)?;
    let store = RecordStore::new(&args.out);

    let records = extractor.run(&args.url, &store, args.policy()).await?;
    if records.is_empty() {
        tracing::warn!("No FAQs found at {}", args.url);
    }
    if args.print {
        for record in &records {
            println!("{}", record);
        }
    }
    Ok(())
}

fn export_records(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = RecordStore::new(&args.input).read_all()?;
    match &args.out {
        Some(path) => export::export(&records, args.format, io::BufWriter::new(File::create(path)?))?,
        None => export::export(&records, args.format, io::stdout().lock())?,
    }
    tracing::info!("Exported {} FAQs as {:?}", records.len(), args.format);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info,html5ever=error,selectors=error,hyper=warn,reqwest=info,headless_chrome=warn");

    match Cli::parse().command {
        Command::Extract(args) => extract(args).await?,
        Command::Export(args) => export_records(args)?,
    }
    Ok(())
}
