use clap::Parser;
use faq_scraper::{init_tracing, store::DEFAULT_STORE_FILE, viewer, RecordStore};
use std::path::PathBuf;

/// Browse an FAQ file as collapsible sections.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[arg(env = "FAQ_FILE", default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,
}

fn main() {
    init_tracing("info,eframe=warn,egui_glow=warn,winit=warn");
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([720.0, 640.0]),
        ..Default::default()
    };

    if let Err(e) = viewer::run(RecordStore::new(args.file), options) {
        eprintln!("Viewer failed: {}", e);
        std::process::exit(1);
    }
}
