//! Mapping from the shared normalized view onto per-image pixel crop boxes.
//!
//! Every pane computes its own crop from its own native size, but always from
//! the same [`ViewState`], which is what keeps panes of different resolutions
//! showing the same logical region.

use crate::pane::ImageDimensions;
use crate::view::ViewState;

/// Crop box into a source image, in source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl SourceRect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The rect as fractions of the image, `[x0, y0, x1, y1]` (texture UVs).
    pub fn to_uv(&self, dims: ImageDimensions) -> [f64; 4] {
        let w = dims.width as f64;
        let h = dims.height as f64;
        [self.x / w, self.y / h, self.right() / w, self.bottom() / h]
    }
}

/// Extent of the crop box in source pixels, before positioning.
///
/// Height follows the zoom; width follows the output aspect ratio. If either
/// axis overflows the image the box is refit along that axis, so the result
/// never exceeds the image in both dimensions.
fn source_extent(dims: ImageDimensions, view: &ViewState, output_aspect: f64) -> (f64, f64) {
    let img_w = dims.width as f64;
    let img_h = dims.height as f64;

    let mut sh = img_h * view.zoom;
    let mut sw = sh * output_aspect;

    if sw > img_w {
        sw = img_w;
        sh = sw / output_aspect;
    }
    if sh > img_h {
        sh = img_h;
        sw = sh * output_aspect;
    }

    (sw, sh)
}

/// Crop box for one pane.
pub fn compute_source_rect(
    dims: ImageDimensions,
    view: &ViewState,
    output_aspect: f64,
) -> SourceRect {
    let img_w = dims.width as f64;
    let img_h = dims.height as f64;
    let (sw, sh) = source_extent(dims, view, output_aspect);

    let x = clamp_origin(view.center_x * img_w - sw / 2.0, img_w - sw);
    let y = clamp_origin(view.center_y * img_h - sh / 2.0, img_h - sh);

    SourceRect { x, y, w: sw, h: sh }
}

/// Viewport footprint as a fraction of the image, `(width, height)`.
pub fn viewport_extent_normalized(
    dims: ImageDimensions,
    view: &ViewState,
    output_aspect: f64,
) -> (f64, f64) {
    let (sw, sh) = source_extent(dims, view, output_aspect);
    (sw / dims.width as f64, sh / dims.height as f64)
}

fn clamp_origin(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}
