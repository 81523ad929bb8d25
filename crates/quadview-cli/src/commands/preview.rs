use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadview_core::config::ViewerConfig;
use quadview_core::pane::PaneKey;
use quadview_core::source::open_source;

#[derive(Args)]
pub struct PreviewArgs {
    /// Image set identifier
    pub set: String,

    /// Pane: tl, tr, bl or br
    pub pane: PaneKey,

    /// Output file path (defaults to <set>_<pane>_preview.jpg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &PreviewArgs, config: &ViewerConfig) -> Result<()> {
    let source = open_source(&config.source)?;
    let bytes = source
        .fetch_preview(&args.set, args.pane)
        .with_context(|| format!("No preview for set {} pane {}", args.set, args.pane))?;

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}_{}_preview.jpg", args.set, args.pane.as_str()))
    });
    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Saved {} preview ({} bytes) to {}",
        args.pane,
        bytes.len(),
        output.display()
    );
    Ok(())
}
