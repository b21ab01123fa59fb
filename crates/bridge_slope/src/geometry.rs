pub mod anchors;
pub mod types;

pub use anchors::{Anchors, left, right, vertex};
pub use types::{BridgeParams, Point};
