/// Smallest normalized viewport height (fraction of the reference image height).
pub const MIN_NORMALIZED_HEIGHT: f64 = 0.001;

/// Largest normalized viewport height. 1.0 shows the full reference height.
pub const MAX_NORMALIZED_HEIGHT: f64 = 1.0;

/// Multiplicative zoom step applied per wheel notch or zoom key press.
pub const ZOOM_STEP: f64 = 1.2;

/// Zoom changes smaller than this are ignored.
pub const ZOOM_EPSILON: f64 = 1e-9;

/// Minimum interval between two paints of the grid (~60 Hz).
pub const REDRAW_INTERVAL_MS: u64 = 16;

/// Default pane width in screen pixels.
pub const DEFAULT_QUADRANT_W: u32 = 1200;

/// Default pane height in screen pixels.
pub const DEFAULT_QUADRANT_H: u32 = 700;

/// Width of generated preview assets, in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 400;

/// JPEG quality used when encoding preview assets.
pub const DEFAULT_PREVIEW_QUALITY: u8 = 80;

/// Number of decoded full-size images kept by the directory source.
pub const IMAGE_CACHE_CAPACITY: usize = 32;

/// CLAHE clip limit, relative to a uniform histogram.
pub const CLAHE_CLIP_LIMIT: f32 = 2.0;

/// CLAHE tile grid size along each axis.
pub const CLAHE_TILE_GRID: u32 = 8;

/// Number of histogram bins for 8-bit equalization.
pub const HISTOGRAM_BINS: usize = 256;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-10;
