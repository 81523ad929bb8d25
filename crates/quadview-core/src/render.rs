//! Frame planning: what each pane should paint for the current view.

use std::fmt;

use crate::geometry::{compute_source_rect, SourceRect};
use crate::pane::{ImageDimensions, PaneKey, PaneMap, PaneSlot};
use crate::view::ViewState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// No image has arrived for the pane yet.
    Loading,
    /// The pane's load failed or produced an unusable image.
    Unavailable,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Loading => f.write_str("Loading…"),
            Placeholder::Unavailable => f.write_str("Image unavailable"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaneDraw {
    Placeholder(Placeholder),
    /// Scale `rect` of the pane's image to fill the pane, nearest-neighbour.
    Blit {
        rect: SourceRect,
        dims: ImageDimensions,
    },
}

pub type FramePlan = PaneMap<PaneDraw>;

impl Default for PaneDraw {
    fn default() -> Self {
        PaneDraw::Placeholder(Placeholder::Loading)
    }
}

/// Plan one pane from its own dimensions and the shared view.
pub fn plan_pane(slot: &PaneSlot, view: &ViewState, output_aspect: f64) -> PaneDraw {
    match slot {
        PaneSlot::Loading => PaneDraw::Placeholder(Placeholder::Loading),
        PaneSlot::Failed { .. } => PaneDraw::Placeholder(Placeholder::Unavailable),
        PaneSlot::Loaded { image, .. } if image.dims.is_degenerate() => {
            PaneDraw::Placeholder(Placeholder::Unavailable)
        }
        PaneSlot::Loaded { image, .. } => PaneDraw::Blit {
            rect: compute_source_rect(image.dims, view, output_aspect),
            dims: image.dims,
        },
    }
}

pub fn plan_frame(panes: &PaneMap<PaneSlot>, view: &ViewState, output_aspect: f64) -> FramePlan {
    PaneMap::from_fn(|pane: PaneKey| plan_pane(&panes[pane], view, output_aspect))
}
