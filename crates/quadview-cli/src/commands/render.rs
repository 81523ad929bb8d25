use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use quadview_core::config::ViewerConfig;
use quadview_core::decode::decode_asset;
use quadview_core::pane::{AssetStage, PaneKey, PaneMap, PaneSlot};
use quadview_core::render::{plan_frame, PaneDraw};
use quadview_core::source::open_source;
use quadview_core::view::ViewStore;
use rayon::prelude::*;
use tracing::warn;

#[derive(Args)]
pub struct RenderArgs {
    /// Image set identifier
    pub set: String,

    /// Viewport center, as a fraction of the reference width
    #[arg(long, default_value = "0.5")]
    pub center_x: f64,

    /// Viewport center, as a fraction of the reference height
    #[arg(long, default_value = "0.5")]
    pub center_y: f64,

    /// Viewport height as a fraction of the reference height (1.0 shows it all)
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Fetch the full-resolution panes of a set and write what the viewer would
/// show for the given view: one PNG per pane plus the assembled grid.
pub fn run(args: &RenderArgs, config: &ViewerConfig) -> Result<()> {
    if !(args.zoom > 0.0) {
        bail!("--zoom must be positive (got {})", args.zoom);
    }

    let source = open_source(&config.source)?;
    let urls = source
        .full_resolution_urls(&args.set)
        .with_context(|| format!("Cannot resolve set {}", args.set))?;

    let pb = ProgressBar::new(PaneKey::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Fetching [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let fetched: Vec<(PaneKey, PaneSlot)> = PaneKey::ALL
        .par_iter()
        .map(|&pane| {
            let slot = match source.fetch_full(&urls[pane]).and_then(decode_asset) {
                Ok(image) => PaneSlot::Loaded {
                    image,
                    stage: AssetStage::Full,
                },
                Err(e) => {
                    warn!("Pane {pane} unavailable: {e}");
                    PaneSlot::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            pb.inc(1);
            (pane, slot)
        })
        .collect();
    pb.finish();

    let mut panes: PaneMap<PaneSlot> = PaneMap::default();
    for (pane, slot) in fetched {
        panes[pane] = slot;
    }

    let reference = panes[PaneKey::REFERENCE]
        .dims()
        .filter(|d| !d.is_degenerate());
    let mut view = ViewStore::new(config.view.zoom_limits(), config.layout.aspect_ratio());
    view.set_zoom(view.state().zoom / args.zoom, None, reference);
    view.set_center(args.center_x, args.center_y, reference);
    let state = view.state();
    println!(
        "View: center ({:.4}, {:.4}), zoom {:.4}",
        state.center_x, state.center_y, state.zoom
    );

    let frame = plan_frame(&panes, &state, view.output_aspect());
    let (qw, qh) = (config.layout.quadrant_w, config.layout.quadrant_h);
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut grid = RgbaImage::from_pixel(qw * 2, qh * 2, Rgba([0, 0, 0, 255]));
    for pane in PaneKey::ALL {
        let (PaneDraw::Blit { rect, .. }, PaneSlot::Loaded { image, .. }) =
            (frame[pane], &panes[pane])
        else {
            println!("  {pane:<13} unavailable");
            continue;
        };

        let x = rect.x.round() as u32;
        let y = rect.y.round() as u32;
        let w = (rect.w.round() as u32).clamp(1, image.dims.width - x.min(image.dims.width - 1));
        let h = (rect.h.round() as u32).clamp(1, image.dims.height - y.min(image.dims.height - 1));
        let crop = imageops::crop_imm(image.pixels.as_ref(), x, y, w, h).to_image();
        let scaled = imageops::resize(&crop, qw, qh, FilterType::Nearest);

        let path = pane_path(&args.output, &args.set, pane);
        scaled
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  {pane:<13} {}x{} crop -> {}", w, h, path.display());

        let (col, row) = pane.grid_position();
        imageops::overlay(&mut grid, &scaled, (col as u32 * qw) as i64, (row as u32 * qh) as i64);
    }

    let grid_path = args.output.join(format!("{}_grid.png", args.set));
    grid.save(&grid_path)
        .with_context(|| format!("Failed to write {}", grid_path.display()))?;
    println!("Saved to {}", grid_path.display());
    Ok(())
}

fn pane_path(dir: &Path, set: &str, pane: PaneKey) -> PathBuf {
    dir.join(format!("{set}_{}.png", pane.as_str()))
}
