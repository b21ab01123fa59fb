pub mod bridge;
pub mod classify;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod export;
pub mod geometry;
pub mod raster;

pub use bridge::{Bridge, BridgeReport};
pub use classify::{BlockType, CellPattern, Tile, TileGrid, UnmappedPolicy, classify};
pub use config::{Config, ExportFormat, RasterConfig};
pub use constants::{DEFAULT_DISTANCE, DEFAULT_OFFSET, DEFAULT_RESOLUTION, DEFAULT_SAG};
pub use curve::Parabola;
pub use error::{Result, SlopeError};
pub use export::{export_grid_csv, export_report_json};
pub use geometry::{Anchors, BridgeParams, Point};
pub use raster::{Raster, raster_dims, rasterize};
