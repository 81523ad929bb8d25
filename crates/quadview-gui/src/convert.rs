use image::imageops::FilterType;
use image::RgbaImage;

/// Convert a decoded pane image to an egui ColorImage, downscaling so neither
/// side exceeds `max_side` (the GPU texture limit). Returns the image and the
/// scale factor applied.
pub fn rgba_to_color_image(img: &RgbaImage, max_side: usize) -> (egui::ColorImage, f32) {
    let (w, h) = img.dimensions();
    let longest = w.max(h) as usize;

    if longest <= max_side || longest == 0 {
        let size = [w as usize, h as usize];
        return (egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()), 1.0);
    }

    let scale = max_side as f32 / longest as f32;
    let nw = ((w as f32 * scale).round() as u32).max(1);
    let nh = ((h as f32 * scale).round() as u32).max(1);
    let resized = image::imageops::resize(img, nw, nh, FilterType::Triangle);
    let size = [nw as usize, nh as usize];
    (
        egui::ColorImage::from_rgba_unmultiplied(size, resized.as_raw()),
        scale,
    )
}
