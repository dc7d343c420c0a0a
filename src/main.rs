mod app;
mod network;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the relationship graph JSON document.
    graph: PathBuf,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "relnet",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::RelationshipGraphApp::new(
                cc,
                args.graph.clone(),
            )))
        }),
    )
}
