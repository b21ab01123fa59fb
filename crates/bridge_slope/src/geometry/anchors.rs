use super::types::{BridgeParams, Point};
use serde::{Deserialize, Serialize};

/// Left end of the span. Raised by a positive offset.
pub fn left(params: &BridgeParams) -> Point {
    let y = if params.offset < 0.0 {
        0.0
    } else {
        params.offset.abs()
    };
    Point::new(0.0, y)
}

/// Right end of the span. Raised by a negative offset.
pub fn right(params: &BridgeParams) -> Point {
    let y = if params.offset > 0.0 {
        0.0
    } else {
        params.offset.abs()
    };
    Point::new(params.distance.abs(), y)
}

/// Mid-span control point
pub fn vertex(params: &BridgeParams) -> Point {
    Point::new(
        params.distance.abs() / 2.0,
        params.offset.abs() + params.sag.abs(),
    )
}

/// The three points the parabola is fitted through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    pub left: Point,
    pub right: Point,
    pub vertex: Point,
}

impl Anchors {
    pub fn from_params(params: &BridgeParams) -> Self {
        Self {
            left: left(params),
            right: right(params),
            vertex: vertex(params),
        }
    }

    /// left, right, vertex
    pub fn points(&self) -> [Point; 3] {
        [self.left, self.right, self.vertex]
    }
}
