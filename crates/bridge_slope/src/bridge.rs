//! Full computation: parameters → anchors → parabola → raster → tile grid.

use crate::{
    classify::{BlockType, Tile, TileGrid, classify},
    config::RasterConfig,
    curve::Parabola,
    error::Result,
    geometry::{Anchors, BridgeParams, Point},
    raster::{raster_dims, rasterize},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A computed bridge profile. Built from scratch for every parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Bridge {
    params: BridgeParams,
    anchors: Anchors,
    curve: Parabola,
    resolution: usize,
    grid: TileGrid,
}

impl Bridge {
    pub fn compute(params: BridgeParams, raster_config: &RasterConfig) -> Result<Self> {
        params.validate()?;
        raster_dims(&params, raster_config.resolution)?;

        let anchors = Anchors::from_params(&params);
        debug!(
            "anchors: left={:?} right={:?} vertex={:?}",
            anchors.left, anchors.right, anchors.vertex
        );

        let curve = Parabola::solve(&anchors.points())?;
        debug!("fitted y = {curve}");

        let raster = rasterize(&curve, &params, raster_config.resolution)?;
        let grid = classify(&raster, raster_config.unmapped)?;

        info!(
            "bridge {}x{} blocks: {} tiles placed",
            grid.cols(),
            grid.rows(),
            grid.rows() * grid.cols() - grid.empty_count()
        );

        Ok(Self {
            params,
            anchors,
            curve,
            resolution: raster_config.resolution,
            grid,
        })
    }

    /// Compute with the default 2×2 resolution and empty-cell fallback
    pub fn new(distance: f64, offset: f64, sag: f64) -> Result<Self> {
        Self::compute(
            BridgeParams::new(distance, offset, sag),
            &RasterConfig::default(),
        )
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn left(&self) -> Point {
        self.anchors.left
    }

    pub fn right(&self) -> Point {
        self.anchors.right
    }

    pub fn vertex(&self) -> Point {
        self.anchors.vertex
    }

    pub fn curve(&self) -> &Parabola {
        &self.curve
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn report(&self) -> BridgeReport {
        BridgeReport {
            params: self.params,
            anchors: self.anchors,
            coefficients: self.curve.coefficients(),
            equation: self.curve.to_string(),
            resolution: self.resolution,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            grid: self.grid.to_rows(),
        }
    }
}

/// Serializable snapshot of a computed bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeReport {
    pub params: BridgeParams,
    pub anchors: Anchors,
    /// [a, b, c]
    pub coefficients: [f64; 3],
    pub equation: String,
    pub resolution: usize,
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl BridgeReport {
    pub fn tile(&self, row: usize, col: usize) -> Option<BlockType> {
        self.grid.get(row).and_then(|r| r.get(col).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify::UnmappedPolicy, error::SlopeError};

    #[test]
    fn test_compute_small_arch() {
        let bridge = Bridge::new(4.0, 0.0, 1.0).unwrap();
        assert_eq!(bridge.grid().to_string(), "L..R\n.TT.");
        assert_eq!(bridge.vertex(), Point::new(2.0, 1.0));
    }

    #[test]
    fn test_compute_rejects_invalid_span_before_solving() {
        for distance in [0.0, -5.0] {
            let err = Bridge::new(distance, 0.0, 2.0).unwrap_err();
            assert!(matches!(err, SlopeError::InvalidSpan { .. }));
        }
    }

    #[test]
    fn test_strict_policy_fails_whole_computation() {
        let config = RasterConfig {
            unmapped: UnmappedPolicy::Error,
            ..Default::default()
        };
        let err = Bridge::compute(BridgeParams::new(20.0, 0.0, 2.0), &config).unwrap_err();
        assert!(matches!(
            err,
            SlopeError::UnclassifiedPattern { row: 1, col: 6, .. }
        ));
    }

    #[test]
    fn test_report_contents() {
        let bridge = Bridge::new(4.0, 0.0, 1.0).unwrap();
        let report = bridge.report();
        assert_eq!(report.rows, 2);
        assert_eq!(report.cols, 4);
        assert_eq!(report.resolution, 2);
        assert_eq!(report.equation, bridge.curve().to_string());
        assert_eq!(report.tile(0, 0), Some(BlockType::StairsLeft));
        assert_eq!(report.tile(0, 1), None);
        assert_eq!(report.tile(9, 9), None);
    }
}
