//! Tile reshuffling between a mosaic grid and its per-phase frame stack
//!
//! A mosaic grid of shape (H, W) is viewed as (H/K, K, W/K, K): tile row,
//! offset within the tile row, tile column, offset within the tile column.
//! Moving both offset axes to the front groups every tile's sample at the
//! same offset together, and collapsing them yields K² frames of shape
//! (H/K, W/K). [`interleave`] runs the same permutation backwards.

use ndarray::{Array2, ArrayBase, Data, Ix2, Order};

use crate::io::error::Result;
use crate::spatial::frames::FrameStack;
use crate::spatial::grid::TileGeometry;

// (tile_row, dy, tile_col, dx) -> (dy, dx, tile_row, tile_col)
const TILES_TO_PHASES: [usize; 4] = [1, 3, 0, 2];
// (dy, dx, tile_row, tile_col) -> (tile_row, dy, tile_col, dx)
const PHASES_TO_TILES: [usize; 4] = [2, 0, 3, 1];

/// Split a mosaic grid into K² frames, one per intra-tile phase
///
/// Frame `p = dy * K + dx` satisfies `frame[p][r][c] == grid[r*K + dy][c*K + dx]`.
/// Samples are moved, never converted, so any element type round-trips
/// exactly. The result is always freshly allocated, including for `K = 1`
/// where the single frame equals the input. Any memory layout of `grid` is
/// accepted.
///
/// # Errors
///
/// Returns [`DimensionMismatch`](crate::ReshuffleError::DimensionMismatch)
/// before touching any data if `tile_size` is zero or does not divide both
/// grid dimensions.
pub fn reshuffle<S, T>(grid: &ArrayBase<S, Ix2>, tile_size: usize) -> Result<FrameStack<T>>
where
    S: Data<Elem = T>,
    T: Clone,
{
    let geometry = TileGeometry::of(grid, tile_size)?;
    let k = geometry.tile_size();
    let (rows, cols) = geometry.frame_shape();

    let tiled = grid.to_shape(((rows, k, cols, k), Order::RowMajor))?;
    let phases = tiled.permuted_axes(TILES_TO_PHASES);
    let frames = phases
        .to_shape(((geometry.phase_count(), rows, cols), Order::RowMajor))?
        .into_owned();

    Ok(FrameStack::from_parts(frames, k))
}

/// Reassemble the mosaic grid a frame stack was produced from
///
/// Exact inverse of [`reshuffle`]: `interleave(&reshuffle(&g, k)?)? == g`
/// for every grid `g` whose dimensions are divisible by `k`.
///
/// # Errors
///
/// Returns a computation error only if the stack's backing array disagrees
/// with its tile size, which cannot happen for stacks built by this crate.
pub fn interleave<T: Clone>(stack: &FrameStack<T>) -> Result<Array2<T>> {
    let k = stack.tile_size();
    let (rows, cols) = stack.frame_shape();

    let phases = stack
        .as_array()
        .to_shape(((k, k, rows, cols), Order::RowMajor))?;
    let tiled = phases.permuted_axes(PHASES_TO_TILES);
    let grid = tiled
        .to_shape(((rows * k, cols * k), Order::RowMajor))?
        .into_owned();

    Ok(grid)
}
