//! Reduce the fine raster to block tiles, one per R×R window.

use crate::{
    error::{Result, SlopeError},
    raster::Raster,
};
use itertools::{Itertools, iproduct};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Placeable tile shapes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    SlabTop,
    SlabBottom,
    StairsLeft,
    StairsRight,
}

impl BlockType {
    /// One-character glyph for text dumps
    pub fn symbol(self) -> char {
        match self {
            BlockType::SlabTop => 'T',
            BlockType::SlabBottom => 'B',
            BlockType::StairsLeft => 'L',
            BlockType::StairsRight => 'R',
        }
    }
}

/// `None` is an empty cell
pub type Tile = Option<BlockType>;

/// What to do with a window whose pattern has no tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Leave the cell empty
    #[default]
    Empty,
    /// Abort with `UnclassifiedPattern`
    Error,
}

/// Occupancy of one R×R window, row-major (sub-rows outer, sub-columns inner)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellPattern {
    bits: Vec<bool>,
}

impl CellPattern {
    pub fn from_window(raster: &Raster, row: usize, col: usize) -> Self {
        let res = raster.resolution();
        let bits = iproduct!(0..res, 0..res)
            .map(|(i, j)| raster.get(row * res + i, col * res + j))
            .collect();
        Self { bits }
    }

    /// Parse a `'1'`/`'0'` code such as `"1001"`
    pub fn from_code(code: &str) -> Option<Self> {
        code.chars()
            .map(|ch| match ch {
                '1' => Some(true),
                '0' => Some(false),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|bits| Self { bits })
    }

    /// R² for an R×R window
    pub fn cell_count(&self) -> usize {
        self.bits.len()
    }

    /// No occupied cell in the window
    pub fn is_clear(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }
}

impl fmt::Display for CellPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Result of looking a pattern up in the tile table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternMatch {
    Empty,
    Block(BlockType),
    Unmapped,
}

/// Tile table for 2×2 windows. Larger resolutions only map the empty window.
pub fn block_for_pattern(pattern: &CellPattern) -> PatternMatch {
    use BlockType::*;
    match pattern.bits.as_slice() {
        [false, false, false, false] => PatternMatch::Empty,
        [true, true, false, false] => PatternMatch::Block(SlabTop),
        [false, false, true, true] => PatternMatch::Block(SlabBottom),
        [true, false, false, true] => PatternMatch::Block(StairsLeft),
        [false, true, true, false] => PatternMatch::Block(StairsRight),
        _ if pattern.is_clear() => PatternMatch::Empty,
        _ => PatternMatch::Unmapped,
    }
}

/// Coarse tile grid, row-major. Row 0 matches raster row 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[Tile] {
        &self.tiles[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> {
        // chunks(0) panics, an empty grid has no rows anyway
        self.tiles.chunks(self.cols.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.iter_rows().map(<[Tile]>::to_vec).collect()
    }

    /// Number of placed tiles for every block type (zero when unused)
    pub fn counts(&self) -> BTreeMap<BlockType, usize> {
        let placed = self.tiles.iter().flatten().copied().counts();
        BlockType::iter()
            .map(|block| (block, placed.get(&block).copied().unwrap_or(0)))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_none()).count()
    }
}

impl fmt::Display for TileGrid {
    /// One line per row, row 0 first; `.` marks an empty cell
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|t| t.map_or('.', BlockType::symbol))
                    .collect::<String>()
            })
            .join("\n");
        f.write_str(&text)
    }
}

/// Classify every disjoint R×R window of the raster
pub fn classify(raster: &Raster, policy: UnmappedPolicy) -> Result<TileGrid> {
    let res = raster.resolution();
    if res == 0 {
        return Err(SlopeError::InvalidResolution(res));
    }

    let rows = raster.rows() / res;
    let cols = raster.cols() / res;
    let mut tiles = Vec::with_capacity(rows * cols);
    let mut unmapped = 0usize;

    for (r, c) in iproduct!(0..rows, 0..cols) {
        let pattern = CellPattern::from_window(raster, r, c);
        let tile = match block_for_pattern(&pattern) {
            PatternMatch::Empty => None,
            PatternMatch::Block(block) => Some(block),
            PatternMatch::Unmapped => match policy {
                UnmappedPolicy::Empty => {
                    debug!("pattern {pattern} at ({r}, {c}) has no tile, left empty");
                    unmapped += 1;
                    None
                }
                UnmappedPolicy::Error => {
                    return Err(SlopeError::UnclassifiedPattern {
                        row: r,
                        col: c,
                        pattern: pattern.to_string(),
                    });
                }
            },
        };
        tiles.push(tile);
    }

    if unmapped > 0 {
        warn!("{unmapped} cell(s) had no matching tile pattern and were left empty");
    }

    Ok(TileGrid { rows, cols, tiles })
}
