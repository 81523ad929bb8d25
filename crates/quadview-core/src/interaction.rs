//! Pointer, wheel and keyboard handling on top of [`ViewStore`].
//!
//! Positions are in pane-surface pixels, with the origin at the top-left of
//! the pane under the pointer. All panes share one surface size.

use crate::catalog::Direction;
use crate::pane::ImageDimensions;
use crate::view::{SurfacePoint, ViewStore};

/// Pixel size of one pane's render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Fractional position of a pixel inside the surface.
    pub fn fraction(&self, pos: [f64; 2]) -> SurfacePoint {
        SurfacePoint::new(pos[0] / self.width, pos[1] / self.height)
    }
}

/// Framework-neutral keyboard commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerKey {
    ZoomIn,
    ZoomOut,
    NextSet,
    PreviousSet,
}

/// What an input event asks of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    ViewChanged,
    Navigate(Direction),
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    start: [f64; 2],
    start_center: (f64, f64),
}

#[derive(Clone, Debug)]
pub struct Interaction {
    zoom_step: f64,
    drag: Option<Drag>,
}

impl Interaction {
    pub fn new(zoom_step: f64) -> Self {
        Self {
            zoom_step,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, pos: [f64; 2], view: &ViewStore) {
        let state = view.state();
        self.drag = Some(Drag {
            start: pos,
            start_center: (state.center_x, state.center_y),
        });
    }

    /// Pan so the content follows the pointer.
    ///
    /// The pixel-to-normalized conversion uses the current zoom, not the zoom
    /// at drag start.
    pub fn pointer_move(
        &mut self,
        pos: [f64; 2],
        surface: SurfaceSize,
        view: &mut ViewStore,
        reference: Option<ImageDimensions>,
    ) -> Outcome {
        let Some(drag) = self.drag else {
            return Outcome::Ignored;
        };
        if surface.is_empty() {
            return Outcome::Ignored;
        }
        let Some((ew, eh)) = view.extent(reference) else {
            return Outcome::Ignored;
        };

        let dx = (pos[0] - drag.start[0]) / surface.width * ew;
        let dy = (pos[1] - drag.start[1]) / surface.height * eh;
        let before = view.state();
        view.set_center(drag.start_center.0 - dx, drag.start_center.1 - dy, reference);

        if view.state() == before {
            Outcome::Ignored
        } else {
            Outcome::ViewChanged
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Positive `delta_y` (scroll up) zooms in, anchored at `pos`.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        pos: [f64; 2],
        surface: SurfaceSize,
        view: &mut ViewStore,
        reference: Option<ImageDimensions>,
    ) -> Outcome {
        if delta_y == 0.0 || surface.is_empty() {
            return Outcome::Ignored;
        }
        let factor = if delta_y > 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        changed(view.set_zoom(factor, Some(surface.fraction(pos)), reference))
    }

    pub fn key(
        &mut self,
        key: ViewerKey,
        view: &mut ViewStore,
        reference: Option<ImageDimensions>,
    ) -> Outcome {
        match key {
            ViewerKey::ZoomIn => changed(view.set_zoom(self.zoom_step, None, reference)),
            ViewerKey::ZoomOut => changed(view.set_zoom(1.0 / self.zoom_step, None, reference)),
            ViewerKey::NextSet => Outcome::Navigate(Direction::Next),
            ViewerKey::PreviousSet => Outcome::Navigate(Direction::Previous),
        }
    }
}

fn changed(did_change: bool) -> Outcome {
    if did_change {
        Outcome::ViewChanged
    } else {
        Outcome::Ignored
    }
}
