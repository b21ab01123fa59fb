//! Fine occupancy raster sampled from the fitted curve.

use crate::{
    constants::MAX_RASTER_CELLS,
    curve::Parabola,
    error::{Result, SlopeError},
    geometry::BridgeParams,
};
use log::debug;

/// Boolean grid, row-major. Row 0 is the lowest profile height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    rows: usize,
    cols: usize,
    resolution: usize,
    cells: Vec<bool>,
}

impl Raster {
    /// All-false raster of `rows x cols` fine cells. Callers size it through [`raster_dims`].
    pub(crate) fn new(rows: usize, cols: usize, resolution: usize) -> Self {
        Self {
            rows,
            cols,
            resolution,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = true;
    }

    /// Lowest occupied row of a column
    pub fn column_hit(&self, col: usize) -> Option<usize> {
        (0..self.rows).find(|&row| self.get(row, col))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Sample x for fine column `i`: `i/R + 1/R²`
#[inline]
pub fn sample_x(i: usize, resolution: usize) -> f64 {
    let r = resolution as f64;
    i as f64 / r + 1.0 / (r * r)
}

/// Fine raster `(rows, cols)`: `height_blocks·R` by `width_blocks·R`.
///
/// Fails with [`SlopeError::GridTooLarge`] on overflow or above [`MAX_RASTER_CELLS`].
pub fn raster_dims(params: &BridgeParams, resolution: usize) -> Result<(usize, usize)> {
    if resolution == 0 {
        return Err(SlopeError::InvalidResolution(resolution));
    }

    let too_large = || SlopeError::GridTooLarge {
        limit: MAX_RASTER_CELLS,
    };
    let rows = params
        .height_blocks()
        .checked_mul(resolution)
        .ok_or_else(too_large)?;
    let cols = params
        .width_blocks()
        .checked_mul(resolution)
        .ok_or_else(too_large)?;

    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_RASTER_CELLS => Ok((rows, cols)),
        _ => Err(too_large()),
    }
}

/// Sample the curve once per fine column and mark the nearest row.
///
/// The raster is `height_blocks·R` rows by `width_blocks·R` columns. Row
/// indices above the top are clamped to the top row, indices below zero to row 0.
pub fn rasterize(curve: &Parabola, params: &BridgeParams, resolution: usize) -> Result<Raster> {
    let (rows, cols) = raster_dims(params, resolution)?;
    let mut raster = Raster::new(rows, cols, resolution);
    if rows == 0 || cols == 0 {
        return Ok(raster);
    }

    let r = resolution as f64;
    for i in 0..cols {
        let x = sample_x(i, resolution);
        let y_scaled = curve.eval(x) * r;
        let row = row_index(y_scaled, rows);
        raster.set(row, i);
    }

    debug!(
        "rasterized {}x{} cells at resolution {} ({} occupied)",
        rows,
        cols,
        resolution,
        raster.occupied_count()
    );
    Ok(raster)
}

fn row_index(y_scaled: f64, rows: usize) -> usize {
    let rounded = y_scaled.round();
    let top = rows - 1;
    if rounded >= top as f64 {
        top
    } else if rounded > 0.0 {
        rounded as usize
    } else {
        if rounded < 0.0 {
            debug!("sample {y_scaled:.3} below baseline, clamped to row 0");
        }
        0
    }
}
