use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{QuadviewError, Result};

/// Downscale `img` to `width` pixels wide (aspect preserved) and encode as JPEG.
pub fn create_low_res_preview(img: &DynamicImage, width: u32, quality: u8) -> Result<Vec<u8>> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 || width == 0 {
        return Err(QuadviewError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let new_h = ((h as u64 * width as u64) / w as u64).max(1) as u32;
    let resized = img.resize_exact(width, new_h, FilterType::Triangle);

    // JPEG has no alpha channel and no 16-bit mode.
    let encodable = if resized.color().channel_count() <= 2 {
        DynamicImage::ImageLuma8(resized.to_luma8())
    } else {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    };

    let mut buffer = Vec::new();
    encodable.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))?;
    Ok(buffer)
}
