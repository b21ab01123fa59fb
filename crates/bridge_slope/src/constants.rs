/// Fine raster cells per block along each axis
pub const DEFAULT_RESOLUTION: usize = 2;

/// Starting bridge parameters (span 20 blocks, level ends, 2 blocks of sag)
pub const DEFAULT_DISTANCE: f64 = 20.0;
pub const DEFAULT_OFFSET: f64 = 0.0;
pub const DEFAULT_SAG: f64 = 2.0;

/// Upper bound on fine raster cells for one computation
pub const MAX_RASTER_CELLS: usize = 1 << 26;

/// Output settings
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const ENV_OUTPUT_DIR: &str = "BRIDGE_SLOPE_OUTPUT_DIR";
pub const CSV_ROW_HEADER: &str = "Row"; // first column of the exported grid
pub const FILE_PREFIX: &str = "bridge";
