use serde::{Deserialize, Serialize};

use crate::consts::{MAX_NORMALIZED_HEIGHT, MIN_NORMALIZED_HEIGHT, ZOOM_EPSILON};
use crate::geometry::viewport_extent_normalized;
use crate::pane::ImageDimensions;

/// The one view shared by all four panes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    /// Viewport center, as a fraction of the reference image width.
    pub center_x: f64,
    /// Viewport center, as a fraction of the reference image height.
    pub center_y: f64,
    /// Viewport height as a fraction of the reference image height.
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            zoom: 1.0,
        }
    }
}

/// Bounds for [`ViewState::zoom`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_NORMALIZED_HEIGHT,
            max: MAX_NORMALIZED_HEIGHT,
        }
    }
}

/// Position inside a pane's render surface, as fractions of its width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const CENTER: SurfacePoint = SurfacePoint { x: 0.5, y: 0.5 };
}

/// Owner of the shared [`ViewState`]. Every mutator clamps before returning.
#[derive(Clone, Debug)]
pub struct ViewStore {
    state: ViewState,
    limits: ZoomLimits,
    output_aspect: f64,
}

impl ViewStore {
    pub fn new(limits: ZoomLimits, output_aspect: f64) -> Self {
        Self {
            state: ViewState::default(),
            limits,
            output_aspect,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn output_aspect(&self) -> f64 {
        self.output_aspect
    }

    pub fn set_output_aspect(&mut self, aspect: f64, reference: Option<ImageDimensions>) {
        if aspect.is_finite() && aspect > 0.0 {
            self.output_aspect = aspect;
            self.clamp_center(reference);
        }
    }

    pub fn reset_to_default(&mut self) {
        self.state = ViewState::default();
    }

    /// Normalized viewport extent on the reference image, if one is usable.
    pub fn extent(&self, reference: Option<ImageDimensions>) -> Option<(f64, f64)> {
        reference
            .filter(|dims| !dims.is_degenerate())
            .map(|dims| viewport_extent_normalized(dims, &self.state, self.output_aspect))
    }

    /// Keep the viewport inside the reference image.
    ///
    /// When the viewport is larger than the image along an axis, the bounds
    /// invert and the center is pinned to the middle of that axis.
    pub fn clamp_center(&mut self, reference: Option<ImageDimensions>) {
        let (ew, eh) = self.extent(reference).unwrap_or((0.0, 0.0));
        self.state.center_x = clamp_axis(self.state.center_x, ew);
        self.state.center_y = clamp_axis(self.state.center_y, eh);
    }

    pub fn set_center(&mut self, center_x: f64, center_y: f64, reference: Option<ImageDimensions>) {
        self.state.center_x = center_x;
        self.state.center_y = center_y;
        self.clamp_center(reference);
    }

    /// Divide the zoom by `factor` (> 1 zooms in). Returns whether anything changed.
    ///
    /// With an anchor, the image point under the anchor stays under it.
    pub fn set_zoom(
        &mut self,
        factor: f64,
        anchor: Option<SurfacePoint>,
        reference: Option<ImageDimensions>,
    ) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let old_zoom = self.state.zoom;
        let new_zoom = (old_zoom / factor).clamp(self.limits.min, self.limits.max);
        if (new_zoom - old_zoom).abs() < ZOOM_EPSILON {
            return false;
        }

        let anchored = anchor.zip(self.extent(reference));
        match anchored {
            Some((point, (old_w, old_h))) => {
                let image_x = self.state.center_x + (point.x - 0.5) * old_w;
                let image_y = self.state.center_y + (point.y - 0.5) * old_h;

                self.state.zoom = new_zoom;
                let (new_w, new_h) = self.extent(reference).unwrap_or((old_w, old_h));
                self.state.center_x = image_x - (point.x - 0.5) * new_w;
                self.state.center_y = image_y - (point.y - 0.5) * new_h;
            }
            None => self.state.zoom = new_zoom,
        }

        self.clamp_center(reference);
        true
    }

    /// Image-space point under a surface position, on the reference image.
    pub fn image_point_at(
        &self,
        point: SurfacePoint,
        reference: Option<ImageDimensions>,
    ) -> Option<(f64, f64)> {
        let (ew, eh) = self.extent(reference)?;
        Some((
            self.state.center_x + (point.x - 0.5) * ew,
            self.state.center_y + (point.y - 0.5) * eh,
        ))
    }
}

fn clamp_axis(center: f64, extent: f64) -> f64 {
    let lo = extent / 2.0;
    let hi = 1.0 - extent / 2.0;
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        center.clamp(lo, hi)
    }
}
