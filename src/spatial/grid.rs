//! Tile geometry of a mosaic grid and the phase/offset bookkeeping around it
//!
//! A grid of height H and width W is partitioned into (H/K) x (W/K) tiles of
//! K x K samples. Each of the K² positions inside a tile is a phase, numbered
//! row-major: phase `p` sits at offset `(p / K, p % K)`.

use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};

use crate::io::configuration::BUCKET_COUNT;
use crate::io::error::{Result, dimension_mismatch, invalid_source};

/// Validated (H, W, K) triple describing how a grid splits into tiles
///
/// Construction is the only place the divisibility precondition is checked;
/// holding a `TileGeometry` means H and W are exact multiples of K >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGeometry {
    height: usize,
    width: usize,
    tile_size: usize,
}

impl TileGeometry {
    /// Validate a grid shape against a tile size
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`](crate::ReshuffleError::DimensionMismatch)
    /// if `tile_size` is zero or does not divide both `height` and `width`.
    pub const fn new(height: usize, width: usize, tile_size: usize) -> Result<Self> {
        if tile_size == 0 || height % tile_size != 0 || width % tile_size != 0 {
            return Err(dimension_mismatch(height, width, tile_size));
        }

        Ok(Self {
            height,
            width,
            tile_size,
        })
    }

    /// Validate the shape of an existing grid
    ///
    /// # Errors
    ///
    /// Same conditions as [`TileGeometry::new`].
    pub fn of<S, T>(grid: &ArrayBase<S, Ix2>, tile_size: usize) -> Result<Self>
    where
        S: Data<Elem = T>,
    {
        let (height, width) = grid.dim();
        Self::new(height, width, tile_size)
    }

    /// Grid height H in samples
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Grid width W in samples
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Tile edge length K
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of tile rows, H/K
    pub const fn tile_rows(&self) -> usize {
        self.height / self.tile_size
    }

    /// Number of tile columns, W/K
    pub const fn tile_cols(&self) -> usize {
        self.width / self.tile_size
    }

    /// Number of phases and therefore frames, K²
    pub const fn phase_count(&self) -> usize {
        self.tile_size * self.tile_size
    }

    /// Shape (H/K, W/K) shared by every frame
    pub const fn frame_shape(&self) -> (usize, usize) {
        (self.tile_rows(), self.tile_cols())
    }

    /// Intra-tile offset `(dy, dx)` of a phase index
    pub const fn phase_offset(&self, phase: usize) -> Option<(usize, usize)> {
        if phase < self.phase_count() {
            Some((phase / self.tile_size, phase % self.tile_size))
        } else {
            None
        }
    }

    /// Phase index of an intra-tile offset
    pub const fn phase_index(&self, dy: usize, dx: usize) -> Option<usize> {
        if dy < self.tile_size && dx < self.tile_size {
            Some(dy * self.tile_size + dx)
        } else {
            None
        }
    }

    /// Source coordinate `(y, x)` of sample `(row, col)` in frame `phase`
    ///
    /// This is the index law of the transform:
    /// `frame[p][r][c] == grid[r * K + dy][c * K + dx]`.
    pub const fn source_position(&self, phase: usize, row: usize, col: usize) -> Option<(usize, usize)> {
        if row >= self.tile_rows() || col >= self.tile_cols() {
            return None;
        }
        match self.phase_offset(phase) {
            Some((dy, dx)) => Some((row * self.tile_size + dy, col * self.tile_size + dx)),
            None => None,
        }
    }

    /// Inverse of [`source_position`](Self::source_position): `(phase, row, col)` of a source sample
    pub const fn frame_position(&self, y: usize, x: usize) -> Option<(usize, usize, usize)> {
        if y >= self.height || x >= self.width {
            return None;
        }
        let phase = (y % self.tile_size) * self.tile_size + x % self.tile_size;
        Some((phase, y / self.tile_size, x / self.tile_size))
    }
}

/// Split a side-by-side dual image into its two buckets along the width
///
/// The halves are returned as owned grids, left bucket first. The split is a
/// plain column cut at W/2 and implies nothing about tiles or channels.
///
/// # Errors
///
/// Returns [`InvalidSourceData`](crate::ReshuffleError::InvalidSourceData) if
/// the width cannot be divided into two equal buckets.
pub fn split_halves<S, T>(grid: &ArrayBase<S, Ix2>) -> Result<(Array2<T>, Array2<T>)>
where
    S: Data<Elem = T>,
    T: Clone,
{
    let (height, width) = grid.dim();
    if width == 0 || width % BUCKET_COUNT != 0 {
        return Err(invalid_source(&format!(
            "dual image {height}x{width} cannot be split into {BUCKET_COUNT} equal buckets"
        )));
    }

    let (left, right) = grid.view().split_at(Axis(1), width / BUCKET_COUNT);
    Ok((left.to_owned(), right.to_owned()))
}
