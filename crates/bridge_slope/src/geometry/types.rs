use crate::{
    constants::{DEFAULT_DISTANCE, DEFAULT_OFFSET, DEFAULT_SAG},
    error::{Result, SlopeError},
};
use serde::{Deserialize, Serialize};

/// Profile coordinate: x along the span, y upward (in blocks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Design parameters of a sagging bridge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeParams {
    /// Horizontal span in blocks (must be > 0)
    pub distance: f64,
    /// Height difference between the ends. Positive raises the left end,
    /// negative raises the right end.
    #[serde(alias = "slope")]
    pub offset: f64,
    /// Extra depth of the curve at mid-span
    pub sag: f64,
}

impl Default for BridgeParams {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            offset: DEFAULT_OFFSET,
            sag: DEFAULT_SAG,
        }
    }
}

impl BridgeParams {
    pub fn new(distance: f64, offset: f64, sag: f64) -> Self {
        Self {
            distance,
            offset,
            sag,
        }
    }

    /// Rejects non-finite values and a non-positive span
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("distance", self.distance),
            ("offset", self.offset),
            ("sag", self.sag),
        ] {
            if !value.is_finite() {
                return Err(SlopeError::InvalidParameter { name, value });
            }
        }

        if self.distance <= 0.0 {
            return Err(SlopeError::InvalidSpan {
                distance: self.distance,
            });
        }

        Ok(())
    }

    /// Block columns of the tile grid (fractional spans round up)
    pub fn width_blocks(&self) -> usize {
        self.distance.abs().ceil() as usize
    }

    /// Block rows of the tile grid: |offset| + |sag| + 1
    pub fn height_blocks(&self) -> usize {
        ((self.offset.abs() + self.sag.abs()).ceil() as usize).saturating_add(1)
    }
}
