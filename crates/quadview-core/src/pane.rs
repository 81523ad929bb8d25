use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::QuadviewError;

/// One of the four fixed quadrants of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaneKey {
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
}

impl PaneKey {
    /// All panes in grid order (row-major).
    pub const ALL: [PaneKey; 4] = [
        PaneKey::TopLeft,
        PaneKey::TopRight,
        PaneKey::BottomLeft,
        PaneKey::BottomRight,
    ];

    /// The pane whose dimensions drive clamping and drag/zoom math.
    pub const REFERENCE: PaneKey = PaneKey::TopLeft;

    pub fn index(self) -> usize {
        match self {
            PaneKey::TopLeft => 0,
            PaneKey::TopRight => 1,
            PaneKey::BottomLeft => 2,
            PaneKey::BottomRight => 3,
        }
    }

    /// Short identifier used on the wire and in file patterns.
    pub fn as_str(self) -> &'static str {
        match self {
            PaneKey::TopLeft => "tl",
            PaneKey::TopRight => "tr",
            PaneKey::BottomLeft => "bl",
            PaneKey::BottomRight => "br",
        }
    }

    /// (column, row) of the pane inside the 2x2 grid.
    pub fn grid_position(self) -> (usize, usize) {
        let i = self.index();
        (i % 2, i / 2)
    }
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaneKey::TopLeft => "Top Left",
            PaneKey::TopRight => "Top Right",
            PaneKey::BottomLeft => "Bottom Left",
            PaneKey::BottomRight => "Bottom Right",
        };
        f.write_str(name)
    }
}

impl FromStr for PaneKey {
    type Err = QuadviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tl" => Ok(PaneKey::TopLeft),
            "tr" => Ok(PaneKey::TopRight),
            "bl" => Ok(PaneKey::BottomLeft),
            "br" => Ok(PaneKey::BottomRight),
            other => Err(QuadviewError::UnknownPane(other.to_string())),
        }
    }
}

/// Fixed four-slot map keyed by [`PaneKey`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaneMap<T> {
    slots: [T; 4],
}

impl<T> PaneMap<T> {
    pub fn from_fn(mut f: impl FnMut(PaneKey) -> T) -> Self {
        Self {
            slots: PaneKey::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaneKey, &T)> {
        PaneKey::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(PaneKey, &T) -> U) -> PaneMap<U> {
        PaneMap::from_fn(|pane| f(pane, &self.slots[pane.index()]))
    }
}

impl<T> Index<PaneKey> for PaneMap<T> {
    type Output = T;

    fn index(&self, pane: PaneKey) -> &T {
        &self.slots[pane.index()]
    }
}

impl<T> IndexMut<PaneKey> for PaneMap<T> {
    fn index_mut(&mut self, pane: PaneKey) -> &mut T {
        &mut self.slots[pane.index()]
    }
}

/// Native pixel size of the image currently occupying a pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which of the two progressive assets an image came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetStage {
    Preview,
    Full,
}

impl fmt::Display for AssetStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetStage::Preview => f.write_str("preview"),
            AssetStage::Full => f.write_str("full-resolution"),
        }
    }
}

/// Decoded raster handed from the pipeline to the renderer.
#[derive(Clone, Debug)]
pub struct PaneImage {
    pub pixels: Arc<RgbaImage>,
    pub dims: ImageDimensions,
}

impl PaneImage {
    pub fn new(pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            pixels: Arc::new(pixels),
            dims: ImageDimensions::new(width, height),
        }
    }
}

/// Per-pane record. Always replaced as a whole so image and dimensions never tear.
#[derive(Clone, Debug, Default)]
pub enum PaneSlot {
    #[default]
    Loading,
    Loaded { image: PaneImage, stage: AssetStage },
    Failed { reason: String },
}

impl PaneSlot {
    pub fn dims(&self) -> Option<ImageDimensions> {
        match self {
            PaneSlot::Loaded { image, .. } => Some(image.dims),
            _ => None,
        }
    }

    pub fn stage(&self) -> Option<AssetStage> {
        match self {
            PaneSlot::Loaded { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PaneSlot::Failed { .. })
    }
}
