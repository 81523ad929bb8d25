use std::time::Instant;

use tracing::debug;

use crate::error::{QuadviewError, Result};
use crate::pane::PaneImage;

/// Decode raw asset bytes into a pane image.
///
/// Takes the buffer by value: it is released when this returns, whether the
/// decode succeeded or not.
pub fn decode_asset(bytes: Vec<u8>) -> Result<PaneImage> {
    let start = Instant::now();
    let len = bytes.len();

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| QuadviewError::Decode(e.to_string()))?;
    drop(bytes);

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(QuadviewError::InvalidDimensions { width, height });
    }

    let image = PaneImage::new(decoded.into_rgba8());
    debug!(
        "Decoded {len} bytes into {} in {:?}",
        image.dims,
        start.elapsed()
    );
    Ok(image)
}
