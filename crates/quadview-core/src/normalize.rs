//! Contrast-limited adaptive histogram equalization (CLAHE) for previews.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{
    CLAHE_CLIP_LIMIT, CLAHE_TILE_GRID, EPSILON, HISTOGRAM_BINS, LUMINANCE_B, LUMINANCE_G,
    LUMINANCE_R,
};

/// Equalize local contrast with the default clip limit and tile grid.
///
/// Grayscale images are equalized directly. Colour images equalize their
/// luma and scale RGB by the luma ratio, which keeps hue unchanged.
pub fn normalize_image(img: DynamicImage) -> DynamicImage {
    if img.color().channel_count() <= 2 {
        let gray = img.to_luma8();
        debug!("Grayscale image normalized using CLAHE");
        DynamicImage::ImageLuma8(clahe(&gray, CLAHE_CLIP_LIMIT, CLAHE_TILE_GRID))
    } else {
        let rgb = img.to_rgb8();
        debug!("Color image normalized using CLAHE");
        DynamicImage::ImageRgb8(normalize_rgb(&rgb))
    }
}

fn normalize_rgb(rgb: &RgbImage) -> RgbImage {
    let (w, h) = rgb.dimensions();
    let luma = GrayImage::from_fn(w, h, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let y = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
        Luma([y.round().clamp(0.0, 255.0) as u8])
    });
    let equalized = clahe(&luma, CLAHE_CLIP_LIMIT, CLAHE_TILE_GRID);

    RgbImage::from_fn(w, h, |x, y| {
        let before = luma.get_pixel(x, y).0[0] as f32;
        let after = equalized.get_pixel(x, y).0[0] as f32;
        let px = rgb.get_pixel(x, y).0;
        if before < EPSILON {
            let v = after as u8;
            return Rgb([v, v, v]);
        }
        let ratio = after / before;
        Rgb(px.map(|c| (c as f32 * ratio).round().clamp(0.0, 255.0) as u8))
    })
}

/// CLAHE on an 8-bit grayscale image.
///
/// `grid` is the number of tiles along each axis (reduced for tiny images).
/// Each tile's histogram is clipped at `clip_limit` times the uniform bin
/// height, the excess is spread over all bins, and pixels blend the mappings
/// of the four nearest tile centers bilinearly.
pub fn clahe(gray: &GrayImage, clip_limit: f32, grid: u32) -> GrayImage {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return gray.clone();
    }

    let tile_w = w.div_ceil(grid.clamp(1, w));
    let tile_h = h.div_ceil(grid.clamp(1, h));
    let tiles_x = w.div_ceil(tile_w);
    let tiles_y = h.div_ceil(tile_h);

    // Row-major, one lookup table per tile.
    let luts: Vec<[u8; 256]> = (0..tiles_x * tiles_y)
        .into_par_iter()
        .map(|i| {
            let (tx, ty) = (i % tiles_x, i / tiles_x);
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(w);
            let y1 = (y0 + tile_h).min(h);
            tile_lut(gray, x0, y0, x1, y1, clip_limit)
        })
        .collect();

    let lut_at = |tx: u32, ty: u32| &luts[(ty * tiles_x + tx) as usize];

    GrayImage::from_fn(w, h, |x, y| {
        let (tx0, tx1, ax) = neighbours(x, tile_w, tiles_x);
        let (ty0, ty1, ay) = neighbours(y, tile_h, tiles_y);
        let v = gray.get_pixel(x, y).0[0] as usize;

        let top = lut_at(tx0, ty0)[v] as f32 * (1.0 - ax) + lut_at(tx1, ty0)[v] as f32 * ax;
        let bottom = lut_at(tx0, ty1)[v] as f32 * (1.0 - ax) + lut_at(tx1, ty1)[v] as f32 * ax;
        let out = top * (1.0 - ay) + bottom * ay;
        Luma([out.round().clamp(0.0, 255.0) as u8])
    })
}

/// Tile indices bracketing a pixel coordinate, and the blend weight of the second.
fn neighbours(pos: u32, tile: u32, tiles: u32) -> (u32, u32, f32) {
    let f = (pos as f32 + 0.5) / tile as f32 - 0.5;
    let f = f.clamp(0.0, (tiles - 1) as f32);
    let t0 = f.floor() as u32;
    let t1 = (t0 + 1).min(tiles - 1);
    (t0, t1, f - t0 as f32)
}

fn tile_lut(gray: &GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, clip_limit: f32) -> [u8; 256] {
    let mut hist = [0u32; HISTOGRAM_BINS];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[gray.get_pixel(x, y).0[0] as usize] += 1;
        }
    }
    let count = (x1 - x0) * (y1 - y0);

    let limit = ((clip_limit * count as f32 / HISTOGRAM_BINS as f32) as u32).max(1);
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }

    let per_bin = excess / HISTOGRAM_BINS as u32;
    let mut residual = excess % HISTOGRAM_BINS as u32;
    for bin in hist.iter_mut() {
        *bin += per_bin;
    }
    if residual > 0 {
        let step = (HISTOGRAM_BINS as u32 / residual).max(1) as usize;
        for bin in hist.iter_mut().step_by(step) {
            if residual == 0 {
                break;
            }
            *bin += 1;
            residual -= 1;
        }
    }

    let scale = 255.0 / count as f32;
    let mut lut = [0u8; 256];
    let mut cdf = 0u32;
    for (i, bin) in hist.iter().enumerate() {
        cdf += bin;
        lut[i] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
