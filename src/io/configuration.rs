//! Algorithm constants and runtime configuration defaults

// Corner detection
/// Minimum index separation between two radial peaks
pub const PEAK_DISTANCE: usize = 50;
/// Contour index offset at which the radial drop-off is measured
pub const SHARPNESS_OFFSET: usize = 30;
/// Maximum deviation from a right angle accepted by the corner walk (π/8)
pub const RIGHT_ANGLE_TOLERANCE: f64 = std::f64::consts::FRAC_PI_8;
/// Contours shorter than this cannot be analysed
pub const MIN_CONTOUR_LEN: usize = 3;
/// Number of corners every piece must have
pub const CORNERS_PER_PIECE: usize = 4;

// Assembly
/// Number of edges on every piece
pub const EDGES_PER_PIECE: usize = 4;

// Synthetic puzzles
/// Default seed for reproducible synthetic puzzles
pub const DEFAULT_SEED: u64 = 42;
/// Side length in pixels of a synthetic piece body
pub const SYNTHETIC_PIECE_SIZE: i32 = 400;
/// Radius in pixels of a synthetic tab or blank
pub const SYNTHETIC_BUMP_RADIUS: i32 = 60;
/// Distance reported for a true mate in a synthetic puzzle
pub const SYNTHETIC_TRUE_DISTANCE: f64 = 1.0;
/// Lower bound of distances reported for false pairs in a synthetic puzzle
pub const SYNTHETIC_FALSE_DISTANCE: f64 = 100.0;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to solution document filenames
pub const OUTPUT_SUFFIX: &str = "_solution";
/// Side length in pixels of one cell in rendered layouts
pub const RENDER_CELL_SIZE: u32 = 32;
/// Thickness in pixels of the "up" edge marker in rendered layouts
pub const RENDER_MARKER_THICKNESS: u32 = 4;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 200;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
