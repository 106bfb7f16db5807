//! Spatial data structures and the reshuffle transform
//!
//! This module contains spatial-related functionality including:
//! - Tile geometry validation and phase bookkeeping
//! - The reshuffle transform and its inverse
//! - Frame stack storage
//! - Bijection coverage checking

/// Bit-set coverage check of the phase mapping
pub mod coverage;
/// Phase-ordered frame stack container
pub mod frames;
/// Tile geometry, phase offsets and bucket splitting
pub mod grid;
/// Reshuffle and interleave transforms
pub mod tiles;

pub use frames::FrameStack;
pub use grid::TileGeometry;
pub use tiles::{interleave, reshuffle};
