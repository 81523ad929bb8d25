use approx::assert_relative_eq;

use quadview_core::geometry::{compute_source_rect, viewport_extent_normalized};
use quadview_core::pane::ImageDimensions;
use quadview_core::view::ViewState;

const TOL: f64 = 1e-9;

fn view(center_x: f64, center_y: f64, zoom: f64) -> ViewState {
    ViewState {
        center_x,
        center_y,
        zoom,
    }
}

#[test]
fn test_tall_image_full_zoom_fits_by_width() {
    let dims = ImageDimensions::new(1000, 2000);
    let rect = compute_source_rect(dims, &view(0.5, 0.5, 1.0), 1.0);

    assert_relative_eq!(rect.x, 0.0);
    assert_relative_eq!(rect.y, 500.0);
    assert_relative_eq!(rect.w, 1000.0);
    assert_relative_eq!(rect.h, 1000.0);
}

#[test]
fn test_wide_image_full_zoom_uses_full_height() {
    let dims = ImageDimensions::new(4000, 1000);
    let rect = compute_source_rect(dims, &view(0.5, 0.5, 1.0), 2.0);

    assert_relative_eq!(rect.h, 1000.0);
    assert_relative_eq!(rect.w, 2000.0);
    assert_relative_eq!(rect.x, 1000.0);
    assert_relative_eq!(rect.y, 0.0);
}

#[test]
fn test_zoom_scales_height() {
    let dims = ImageDimensions::new(2000, 1000);
    let rect = compute_source_rect(dims, &view(0.5, 0.5, 0.25), 1.0);

    assert_relative_eq!(rect.h, 250.0);
    assert_relative_eq!(rect.w, 250.0);
    assert_relative_eq!(rect.x, 875.0);
    assert_relative_eq!(rect.y, 375.0);
}

#[test]
fn test_position_clamped_at_edges() {
    let dims = ImageDimensions::new(1000, 1000);

    let rect = compute_source_rect(dims, &view(0.0, 0.0, 0.1), 1.0);
    assert_relative_eq!(rect.x, 0.0);
    assert_relative_eq!(rect.y, 0.0);

    let rect = compute_source_rect(dims, &view(1.0, 1.0, 0.1), 1.0);
    assert_relative_eq!(rect.x, 900.0);
    assert_relative_eq!(rect.y, 900.0);
}

#[test]
fn test_rect_always_inside_image() {
    let sizes = [(1, 1), (7, 3), (1000, 2000), (4000, 1000), (640, 480), (33, 977)];
    let centers = [0.0, 0.1, 0.5, 0.93, 1.0];
    let zooms = [0.001, 0.01, 0.3, 0.77, 1.0];
    let aspects = [0.25, 0.5, 1.0, 1200.0 / 700.0, 4.0];

    for &(w, h) in &sizes {
        let dims = ImageDimensions::new(w, h);
        for &cx in &centers {
            for &cy in &centers {
                for &zoom in &zooms {
                    for &aspect in &aspects {
                        let r = compute_source_rect(dims, &view(cx, cy, zoom), aspect);
                        let ctx = format!("{w}x{h} c=({cx},{cy}) z={zoom} a={aspect}: {r:?}");
                        assert!(r.x >= 0.0 && r.y >= 0.0, "{ctx}");
                        assert!(r.w > 0.0 && r.h > 0.0, "{ctx}");
                        assert!(r.right() <= w as f64 + TOL, "{ctx}");
                        assert!(r.bottom() <= h as f64 + TOL, "{ctx}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_rect_keeps_output_aspect() {
    let dims = ImageDimensions::new(1000, 2000);
    for &aspect in &[0.3, 1.0, 1.7, 3.0] {
        let r = compute_source_rect(dims, &view(0.5, 0.5, 0.6), aspect);
        assert_relative_eq!(r.w / r.h, aspect, epsilon = 1e-9);
    }
}

#[test]
fn test_extent_matches_rect() {
    let dims = ImageDimensions::new(1200, 800);
    let v = view(0.4, 0.6, 0.5);
    let r = compute_source_rect(dims, &v, 1.5);
    let (ew, eh) = viewport_extent_normalized(dims, &v, 1.5);

    assert_relative_eq!(ew, r.w / 1200.0);
    assert_relative_eq!(eh, r.h / 800.0);
    assert!(ew <= 1.0 && eh <= 1.0);
}

#[test]
fn test_same_view_same_region_across_resolutions() {
    let low = ImageDimensions::new(400, 300);
    let high = ImageDimensions::new(4000, 3000);
    let v = view(0.3, 0.7, 0.2);

    let a = compute_source_rect(low, &v, 4.0 / 3.0).to_uv(low);
    let b = compute_source_rect(high, &v, 4.0 / 3.0).to_uv(high);
    for i in 0..4 {
        assert_relative_eq!(a[i], b[i], epsilon = 1e-12);
    }
}
