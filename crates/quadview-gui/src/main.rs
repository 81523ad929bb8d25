mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quadview_core::config::{SourceConfig, ViewerConfig};

#[derive(Parser)]
#[command(name = "quadview-gui", about = "Synchronized 2x2 image set viewer")]
#[command(version)]
struct Args {
    /// TOML config file (defaults plus environment overrides when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use an image server at this base URL instead of local directories
    #[arg(long)]
    server: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let mut config = match args.config {
        Some(ref path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::from_env(),
    };
    if let Some(base_url) = args.server {
        config.source = SourceConfig::Http { base_url };
    }

    let grid_w = (config.layout.quadrant_w * 2) as f32;
    let grid_h = (config.layout.quadrant_h * 2) as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([grid_w.min(1600.0), grid_h.min(1000.0) + 120.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Quadview"),
        ..Default::default()
    };

    eframe::run_native(
        "Quadview",
        options,
        Box::new(move |cc| Ok(Box::new(app::QuadviewApp::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
