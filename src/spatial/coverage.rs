//! Coverage map proving the phase mapping is a bijection
//!
//! Walks every output position of a [`TileGeometry`], maps it back to its
//! source sample and marks one bit per source sample. A sample marked twice
//! or never means the mapping lost or duplicated data.

use bitvec::prelude::{BitVec, bitvec};

use crate::io::error::{Result, computation_error};
use crate::spatial::grid::TileGeometry;

/// One bit per source sample, set once its output position has been visited
pub struct CoverageMap {
    visited: BitVec,
    width: usize,
}

impl CoverageMap {
    /// Create an empty map for the given geometry
    pub fn new(geometry: &TileGeometry) -> Self {
        Self {
            visited: bitvec![0; geometry.height() * geometry.width()],
            width: geometry.width(),
        }
    }

    /// Mark a source sample as visited
    ///
    /// Returns `false` if the sample was already marked or lies outside the map.
    pub fn mark(&mut self, y: usize, x: usize) -> bool {
        if x >= self.width {
            return false;
        }
        match self.visited.get_mut(y * self.width + x) {
            Some(mut bit) if !*bit => {
                *bit = true;
                true
            }
            _ => false,
        }
    }

    /// Number of samples visited so far
    pub fn visited(&self) -> usize {
        self.visited.count_ones()
    }

    /// Whether every sample has been visited
    pub fn is_complete(&self) -> bool {
        self.visited.all()
    }
}

/// Check that every source sample maps to exactly one frame position
///
/// # Errors
///
/// Returns a computation error naming the first duplicated sample, or the
/// number of unvisited samples if coverage is incomplete.
pub fn verify_coverage(geometry: &TileGeometry) -> Result<()> {
    let mut map = CoverageMap::new(geometry);
    let (rows, cols) = geometry.frame_shape();

    for phase in 0..geometry.phase_count() {
        for row in 0..rows {
            for col in 0..cols {
                let (y, x) = geometry.source_position(phase, row, col).ok_or_else(|| {
                    computation_error(
                        "coverage check",
                        &format!("frame position ({phase}, {row}, {col}) has no source sample"),
                    )
                })?;
                if !map.mark(y, x) {
                    return Err(computation_error(
                        "coverage check",
                        &format!(
                            "source sample ({y}, {x}) reached twice, again from phase {phase} at ({row}, {col})"
                        ),
                    ));
                }
            }
        }
    }

    if map.is_complete() {
        Ok(())
    } else {
        let total = geometry.height() * geometry.width();
        Err(computation_error(
            "coverage check",
            &format!("{} of {total} source samples never reached", total - map.visited()),
        ))
    }
}
