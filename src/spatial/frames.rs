//! Phase-ordered stack of de-interleaved frames

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::io::error::{Result, invalid_source};

/// Ordered stack of K² frames, one per intra-tile phase
///
/// Backed by a single `(K², H/K, W/K)` array in standard layout. Frame `p`
/// holds every sample at offset `(p / K, p % K)` of its tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStack<T> {
    frames: Array3<T>,
    tile_size: usize,
}

impl<T> FrameStack<T> {
    // Callers guarantee the leading axis has length tile_size²
    pub(crate) const fn from_parts(frames: Array3<T>, tile_size: usize) -> Self {
        Self { frames, tile_size }
    }

    /// Wrap an existing `(N, h, w)` array as a frame stack
    ///
    /// # Errors
    ///
    /// Returns an error if `N` is zero or not a perfect square, since a stack
    /// must hold exactly K² frames for some K >= 1.
    pub fn from_array(frames: Array3<T>) -> Result<Self> {
        let count = frames.len_of(Axis(0));
        let tile_size = (1..=count)
            .take_while(|k| k * k <= count)
            .find(|k| k * k == count)
            .ok_or_else(|| {
                invalid_source(&format!(
                    "frame stack holds {count} frames, expected a non-zero perfect square"
                ))
            })?;

        Ok(Self { frames, tile_size })
    }

    /// Tile size K the stack was produced with
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of frames, K²
    pub fn len(&self) -> usize {
        self.frames.len_of(Axis(0))
    }

    /// Whether the stack holds no frames (never true for a constructed stack)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape `(H/K, W/K)` shared by every frame
    pub fn frame_shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.frames.dim();
        (rows, cols)
    }

    /// Frame for a linear phase index
    pub fn frame(&self, phase: usize) -> Option<ArrayView2<'_, T>> {
        (phase < self.len()).then(|| self.frames.index_axis(Axis(0), phase))
    }

    /// Frame for an intra-tile offset `(dy, dx)`
    pub fn frame_at(&self, dy: usize, dx: usize) -> Option<ArrayView2<'_, T>> {
        if dy < self.tile_size && dx < self.tile_size {
            self.frame(dy * self.tile_size + dx)
        } else {
            None
        }
    }

    /// Frames in phase order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ArrayView2<'_, T>> {
        self.frames.outer_iter()
    }

    /// Underlying `(K², H/K, W/K)` array
    pub const fn as_array(&self) -> &Array3<T> {
        &self.frames
    }

    /// Consume the stack, returning the underlying array
    pub fn into_array(self) -> Array3<T> {
        self.frames
    }
}

impl<T: Clone> FrameStack<T> {
    /// Consume the stack into independently owned frames
    pub fn into_frames(self) -> Vec<Array2<T>> {
        self.frames
            .outer_iter()
            .map(|frame| frame.to_owned())
            .collect()
    }
}

impl<'a, T> IntoIterator for &'a FrameStack<T> {
    type Item = ArrayView2<'a, T>;
    type IntoIter = ndarray::iter::AxisIter<'a, T, ndarray::Ix2>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.outer_iter()
    }
}
