//! Transform constants and runtime configuration defaults

/// Default tile size K for coded-exposure sensors with a 2x2 sub-pixel grid
pub const DEFAULT_TILE_SIZE: usize = 2;

// 8-bit captures are promoted to the 12-bit range of the sensor
/// Default multiplier applied to source intensities before the transform
pub const DEFAULT_INTENSITY_SCALE: f64 = 16.0;

/// Number of buckets in a side-by-side dual image
pub const BUCKET_COUNT: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 65_536;

/// Default edge length of synthetic test grids
pub const DEFAULT_SYNTHETIC_SIZE: usize = 320;

/// Fixed seed for reproducible synthetic noise
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Directory receiving frame files when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Zero-padded width of frame numbers in output filenames
pub const FRAME_NUMBER_WIDTH: usize = 5;
/// Stem used for output files when the source is synthetic
pub const SYNTHETIC_STEM: &str = "synthetic";
/// Last name segment of preview files, kept distinct from any source stem
pub const PREVIEW_SUFFIX: &str = "preview";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
