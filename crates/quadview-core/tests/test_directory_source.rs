use std::path::Path;

use image::{GenericImageView, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

use quadview_core::config::{DirectoryConfig, SourceConfig};
use quadview_core::error::QuadviewError;
use quadview_core::pane::PaneKey;
use quadview_core::source::{open_source, DirectorySource, ImageSource};

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Three directories holding one complete set (0001), one set missing its
/// bottom-right file (0002) and some unrelated files.
fn fixture() -> (TempDir, DirectoryConfig) {
    let root = tempfile::tempdir().unwrap();
    let config = DirectoryConfig {
        reference_dir: root.path().join("reference"),
        image_dir_1: root.path().join("results_1"),
        image_dir_2: root.path().join("results_2"),
        ..DirectoryConfig::default()
    };
    for dir in [&config.reference_dir, &config.image_dir_1, &config.image_dir_2] {
        std::fs::create_dir_all(dir).unwrap();
    }

    for pane in PaneKey::ALL {
        let path = config.dir_for(pane).join(config.patterns.file_name(pane, "0001"));
        write_png(&path, 800, 600);
    }
    for pane in [PaneKey::TopLeft, PaneKey::TopRight, PaneKey::BottomLeft] {
        let path = config.dir_for(pane).join(config.patterns.file_name(pane, "0002"));
        write_png(&path, 64, 48);
    }
    std::fs::write(config.reference_dir.join("notes.txt"), "not an image").unwrap();
    write_png(&config.reference_dir.join("12-4x_cropped.png"), 8, 8);

    (root, config)
}

#[test]
fn test_only_complete_sets_are_listed() {
    let (_root, config) = fixture();
    let source = DirectorySource::new(config).unwrap();

    assert_eq!(source.list_sets().unwrap(), vec!["0001".to_string()]);
}

#[test]
fn test_missing_reference_dir_lists_nothing() {
    let root = tempfile::tempdir().unwrap();
    let config = DirectoryConfig {
        reference_dir: root.path().join("absent"),
        ..DirectoryConfig::default()
    };
    let source = DirectorySource::new(config).unwrap();

    assert!(source.list_sets().unwrap().is_empty());
}

#[test]
fn test_full_resolution_urls_point_at_pane_files() {
    let (_root, config) = fixture();
    let source = DirectorySource::new(config.clone()).unwrap();

    let urls = source.full_resolution_urls("0001").unwrap();
    for pane in PaneKey::ALL {
        assert!(Path::new(&urls[pane]).starts_with(config.dir_for(pane)), "{pane}");
    }
    assert!(urls[PaneKey::TopRight].ends_with("0001-20x.png"));

    let bytes = source.fetch_full(&urls[PaneKey::BottomRight]).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!(img.dimensions(), (800, 600));
}

#[test]
fn test_incomplete_set_is_unknown() {
    let (_root, config) = fixture();
    let source = DirectorySource::new(config).unwrap();

    let err = source.full_resolution_urls("0002").unwrap_err();
    assert!(matches!(err, QuadviewError::UnknownSet(ref s) if s == "0002"));
    assert!(source.fetch_preview("0002", PaneKey::BottomRight).is_err());
}

#[test]
fn test_preview_is_downscaled_jpeg() {
    let (_root, config) = fixture();
    let source = DirectorySource::new(config).unwrap();

    let bytes = source.fetch_preview("0001", PaneKey::BottomLeft).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!(img.dimensions(), (400, 300));

    // Served again from the decoded-image cache.
    let again = source.fetch_preview("0001", PaneKey::BottomLeft).unwrap();
    assert_eq!(again, bytes);
}

#[test]
fn test_preview_width_is_configurable() {
    let (_root, mut config) = fixture();
    config.preview_width = 200;
    config.normalize_previews = false;
    let source = DirectorySource::new(config).unwrap();

    let bytes = source.fetch_preview("0001", PaneKey::TopLeft).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!(img.dimensions(), (200, 150));
}

#[test]
fn test_open_source_builds_directory_source() {
    let (_root, config) = fixture();
    let source = open_source(&SourceConfig::Directory(config)).unwrap();

    assert_eq!(source.list_sets().unwrap().len(), 1);
    assert!(source.describe().contains("reference"));
}

#[test]
fn test_pattern_without_placeholder_is_rejected() {
    let mut config = DirectoryConfig::default();
    config.patterns.tl = "reference.png".into();

    assert!(matches!(
        DirectorySource::new(config),
        Err(QuadviewError::Config(_))
    ));
}
