use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PREVIEW_QUALITY, DEFAULT_PREVIEW_WIDTH, DEFAULT_QUADRANT_H, DEFAULT_QUADRANT_W,
    MAX_NORMALIZED_HEIGHT, MIN_NORMALIZED_HEIGHT, REDRAW_INTERVAL_MS, ZOOM_STEP,
};
use crate::error::{QuadviewError, Result};
use crate::pane::PaneKey;
use crate::view::ZoomLimits;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Where image sets come from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Http { base_url: String },
    Directory(DirectoryConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory(DirectoryConfig::default())
    }
}

impl fmt::Display for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceConfig::Http { base_url } => write!(f, "HTTP ({base_url})"),
            SourceConfig::Directory(dir) => {
                write!(f, "Directory ({})", dir.reference_dir.display())
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Holds the top-left and top-right images.
    pub reference_dir: PathBuf,
    /// Holds the bottom-left images.
    pub image_dir_1: PathBuf,
    /// Holds the bottom-right images.
    pub image_dir_2: PathBuf,
    #[serde(default)]
    pub patterns: PanePatterns,
    /// Apply CLAHE to previews before downscaling.
    #[serde(default = "default_true")]
    pub normalize_previews: bool,
    #[serde(default = "default_preview_width")]
    pub preview_width: u32,
    #[serde(default = "default_preview_quality")]
    pub preview_quality: u8,
}

fn default_true() -> bool {
    true
}

fn default_preview_width() -> u32 {
    DEFAULT_PREVIEW_WIDTH
}

fn default_preview_quality() -> u8 {
    DEFAULT_PREVIEW_QUALITY
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("data/reference"),
            image_dir_1: PathBuf::from("data/results_1"),
            image_dir_2: PathBuf::from("data/results_2"),
            patterns: PanePatterns::default(),
            normalize_previews: true,
            preview_width: DEFAULT_PREVIEW_WIDTH,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl DirectoryConfig {
    /// Directory a pane's files live in.
    pub fn dir_for(&self, pane: PaneKey) -> &Path {
        match pane {
            PaneKey::TopLeft | PaneKey::TopRight => &self.reference_dir,
            PaneKey::BottomLeft => &self.image_dir_1,
            PaneKey::BottomRight => &self.image_dir_2,
        }
    }
}

/// File name templates per pane. `{set}` is replaced by the set identifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PanePatterns {
    pub tl: String,
    pub tr: String,
    pub bl: String,
    pub br: String,
}

impl Default for PanePatterns {
    fn default() -> Self {
        Self {
            tl: "{set}-4x_cropped.png".into(),
            tr: "{set}-20x.png".into(),
            bl: "{set}-4x_cropped_HAT_RAW_FDL_grayscale_v2_TEST.png".into(),
            br: "{set}-4x_cropped_HAT_DUAL_earlyfusion_FDL_grayscale_v2_TEST.png".into(),
        }
    }
}

impl PanePatterns {
    pub fn get(&self, pane: PaneKey) -> &str {
        match pane {
            PaneKey::TopLeft => &self.tl,
            PaneKey::TopRight => &self.tr,
            PaneKey::BottomLeft => &self.bl,
            PaneKey::BottomRight => &self.br,
        }
    }

    pub fn file_name(&self, pane: PaneKey, set: &str) -> String {
        self.get(pane).replace("{set}", set)
    }
}

/// Size of one grid quadrant in screen pixels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub quadrant_w: u32,
    pub quadrant_h: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            quadrant_w: DEFAULT_QUADRANT_W,
            quadrant_h: DEFAULT_QUADRANT_H,
        }
    }
}

impl LayoutConfig {
    /// Output aspect ratio (width / height) shared by all panes.
    pub fn aspect_ratio(&self) -> f64 {
        self.quadrant_w as f64 / self.quadrant_h as f64
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub redraw_interval_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_NORMALIZED_HEIGHT,
            max_zoom: MAX_NORMALIZED_HEIGHT,
            zoom_step: ZOOM_STEP,
            redraw_interval_ms: REDRAW_INTERVAL_MS,
        }
    }
}

impl ViewConfig {
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_zoom,
            max: self.max_zoom,
        }
    }

    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }
}

impl ViewerConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)
            .map_err(|e| QuadviewError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| QuadviewError::Config(e.to_string()))
    }

    /// Defaults, overridden by `REFERENCE_DIR`, `IMAGE_DIR_1`, `IMAGE_DIR_2`,
    /// `QUADRANT_W` and `QUADRANT_H` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let SourceConfig::Directory(ref mut dir) = config.source {
            if let Some(v) = lookup("REFERENCE_DIR") {
                dir.reference_dir = PathBuf::from(v);
            }
            if let Some(v) = lookup("IMAGE_DIR_1") {
                dir.image_dir_1 = PathBuf::from(v);
            }
            if let Some(v) = lookup("IMAGE_DIR_2") {
                dir.image_dir_2 = PathBuf::from(v);
            }
        }
        if let Some(w) = lookup("QUADRANT_W").and_then(|v| v.parse().ok()) {
            config.layout.quadrant_w = w;
        }
        if let Some(h) = lookup("QUADRANT_H").and_then(|v| v.parse().ok()) {
            config.layout.quadrant_h = h;
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        let view = &self.view;
        if !(view.min_zoom > 0.0 && view.min_zoom <= view.max_zoom) {
            return Err(QuadviewError::Config(format!(
                "zoom range must satisfy 0 < min_zoom <= max_zoom (got {}..{})",
                view.min_zoom, view.max_zoom
            )));
        }
        if !(view.zoom_step > 1.0) {
            return Err(QuadviewError::Config(format!(
                "zoom_step must be greater than 1 (got {})",
                view.zoom_step
            )));
        }
        if self.layout.quadrant_w == 0 || self.layout.quadrant_h == 0 {
            return Err(QuadviewError::Config("quadrant size must be non-zero".into()));
        }
        if let SourceConfig::Directory(ref dir) = self.source {
            if dir.preview_width == 0 {
                return Err(QuadviewError::Config("preview_width must be non-zero".into()));
            }
            for pane in PaneKey::ALL {
                if !dir.patterns.get(pane).contains("{set}") {
                    return Err(QuadviewError::Config(format!(
                        "pattern for pane '{pane}' has no {{set}} placeholder"
                    )));
                }
            }
        }
        Ok(())
    }
}
