use approx::assert_relative_eq;

use quadview_core::consts::{MAX_NORMALIZED_HEIGHT, MIN_NORMALIZED_HEIGHT, ZOOM_STEP};
use quadview_core::pane::ImageDimensions;
use quadview_core::view::{SurfacePoint, ViewState, ViewStore, ZoomLimits};

const EPS: f64 = 1e-9;

fn store(aspect: f64) -> ViewStore {
    ViewStore::new(ZoomLimits::default(), aspect)
}

fn square() -> Option<ImageDimensions> {
    Some(ImageDimensions::new(1000, 1000))
}

#[test]
fn test_default_state() {
    let s = store(1.0);
    assert_eq!(s.state(), ViewState::default());
    assert_eq!(s.state().center_x, 0.5);
    assert_eq!(s.state().center_y, 0.5);
    assert_eq!(s.state().zoom, 1.0);
}

#[test]
fn test_reset_to_default() {
    let mut s = store(1.0);
    s.set_zoom(4.0, None, square());
    s.set_center(0.2, 0.8, square());
    s.reset_to_default();
    assert_eq!(s.state(), ViewState::default());
}

#[test]
fn test_clamp_center_keeps_viewport_inside() {
    let mut s = store(1.0);
    s.set_zoom(5.0, None, square());
    s.set_center(0.0, 1.0, square());

    let state = s.state();
    assert_relative_eq!(state.center_x, 0.1, epsilon = EPS);
    assert_relative_eq!(state.center_y, 0.9, epsilon = EPS);
}

#[test]
fn test_clamp_center_centers_when_view_covers_image() {
    let mut s = store(1.0);
    s.set_center(0.1, 0.9, square());
    assert_relative_eq!(s.state().center_x, 0.5, epsilon = EPS);
    assert_relative_eq!(s.state().center_y, 0.5, epsilon = EPS);
}

#[test]
fn test_clamp_center_is_idempotent() {
    let reference = Some(ImageDimensions::new(1600, 900));
    let mut s = store(1200.0 / 700.0);
    s.set_zoom(3.0, None, reference);
    s.set_center(0.97, 0.02, reference);

    s.clamp_center(reference);
    let once = s.state();
    s.clamp_center(reference);
    assert_eq!(s.state(), once);
}

#[test]
fn test_clamp_without_reference_stays_in_unit_square() {
    let mut s = store(1.0);
    s.set_center(-0.5, 1.5, None);
    assert_eq!(s.state().center_x, 0.0);
    assert_eq!(s.state().center_y, 1.0);
}

#[test]
fn test_zoom_in_divides_zoom() {
    let mut s = store(1.0);
    assert!(s.set_zoom(2.0, None, square()));
    assert_relative_eq!(s.state().zoom, 0.5, epsilon = EPS);
}

#[test]
fn test_zoom_out_saturates_at_max() {
    let mut s = store(1.0);
    s.set_zoom(10.0, None, square());
    for _ in 0..50 {
        s.set_zoom(1.0 / ZOOM_STEP, None, square());
        assert!(s.state().zoom <= MAX_NORMALIZED_HEIGHT);
    }
    assert_eq!(s.state().zoom, MAX_NORMALIZED_HEIGHT);
}

#[test]
fn test_zoom_in_saturates_at_min() {
    let mut s = store(1.0);
    for _ in 0..200 {
        s.set_zoom(ZOOM_STEP, None, square());
    }
    assert_eq!(s.state().zoom, MIN_NORMALIZED_HEIGHT);
    assert!(!s.set_zoom(ZOOM_STEP, None, square()));
}

#[test]
fn test_zoom_change_below_epsilon_is_noop() {
    let mut s = store(1.0);
    assert!(!s.set_zoom(1.0, None, square()));
    assert!(!s.set_zoom(1.0 / ZOOM_STEP, None, square()));
    assert_eq!(s.state(), ViewState::default());
}

#[test]
fn test_invalid_zoom_factor_rejected() {
    let mut s = store(1.0);
    assert!(!s.set_zoom(0.0, None, square()));
    assert!(!s.set_zoom(-2.0, None, square()));
    assert!(!s.set_zoom(f64::NAN, None, square()));
    assert_eq!(s.state(), ViewState::default());
}

#[test]
fn test_unanchored_zoom_keeps_center() {
    let mut s = store(1.0);
    s.set_zoom(4.0, None, square());
    s.set_center(0.3, 0.6, square());
    s.set_zoom(1.5, None, square());
    assert_relative_eq!(s.state().center_x, 0.3, epsilon = EPS);
    assert_relative_eq!(s.state().center_y, 0.6, epsilon = EPS);
}

#[test]
fn test_anchored_zoom_keeps_point_under_cursor() {
    let reference = Some(ImageDimensions::new(2000, 1000));
    let mut s = store(1.5);
    s.set_zoom(2.0, None, reference);
    s.set_center(0.45, 0.5, reference);

    let anchor = SurfacePoint::new(0.8, 0.3);
    let before = s.image_point_at(anchor, reference).unwrap();
    assert!(s.set_zoom(ZOOM_STEP, Some(anchor), reference));
    let after = s.image_point_at(anchor, reference).unwrap();

    assert_relative_eq!(before.0, after.0, epsilon = EPS);
    assert_relative_eq!(before.1, after.1, epsilon = EPS);
}

#[test]
fn test_zoom_round_trip_restores_state() {
    let reference = Some(ImageDimensions::new(3000, 2000));
    let mut s = store(1.0);
    s.set_zoom(3.0, None, reference);
    s.set_center(0.4, 0.55, reference);
    let start = s.state();

    let anchor = SurfacePoint::new(0.25, 0.7);
    s.set_zoom(ZOOM_STEP, Some(anchor), reference);
    s.set_zoom(1.0 / ZOOM_STEP, Some(anchor), reference);

    let end = s.state();
    assert_relative_eq!(end.zoom, start.zoom, epsilon = EPS);
    assert_relative_eq!(end.center_x, start.center_x, epsilon = EPS);
    assert_relative_eq!(end.center_y, start.center_y, epsilon = EPS);
}

#[test]
fn test_anchored_zoom_without_reference_only_rescales() {
    let mut s = store(1.0);
    assert!(s.set_zoom(2.0, Some(SurfacePoint::new(0.9, 0.9)), None));
    assert_relative_eq!(s.state().zoom, 0.5);
    assert_relative_eq!(s.state().center_x, 0.5);
    assert_relative_eq!(s.state().center_y, 0.5);
}

#[test]
fn test_output_aspect_change_reclamps() {
    let reference = Some(ImageDimensions::new(1000, 1000));
    let mut s = store(1.0);
    s.set_zoom(2.0, None, reference);
    s.set_center(0.25, 0.5, reference);

    s.set_output_aspect(2.0, reference);
    // Viewport now spans the full width.
    assert_relative_eq!(s.state().center_x, 0.5, epsilon = EPS);
    assert_relative_eq!(s.output_aspect(), 2.0);
}
