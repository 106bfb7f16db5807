//! Deinterleaving of spatially multiplexed mosaic images into per-phase frames
//!
//! A coded-exposure or spatial-multiplexing sensor interleaves K² sub-frames
//! across the image plane in a repeating K x K pattern. [`reshuffle`] splits
//! such a mosaic into its K² low-resolution frames and [`interleave`] puts
//! them back together. Both are pure, lossless repartitions of the samples.
//!
//! ```
//! use mosaic_frames::reshuffle;
//! use ndarray::{Array2, array};
//!
//! let grid = Array2::from_shape_vec((4, 4), (0..16).collect::<Vec<i32>>()).unwrap();
//! let frames = reshuffle(&grid, 2).unwrap();
//!
//! assert_eq!(frames.len(), 4);
//! assert_eq!(frames.frame(0).unwrap(), array![[0, 2], [8, 10]]);
//! assert_eq!(frames.frame_at(1, 1).unwrap(), array![[5, 7], [13, 15]]);
//! ```

#![forbid(unsafe_code)]

/// Input/output operations, command-line flow and error handling
pub mod io;
/// Intensity scaling and bit-depth conversion
pub mod math;
/// Tile geometry, the reshuffle transform and frame storage
pub mod spatial;

pub use io::error::{ReshuffleError, Result};
pub use spatial::{FrameStack, TileGeometry, interleave, reshuffle};
