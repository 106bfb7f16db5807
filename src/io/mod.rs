//! Input/output collaborators around the reshuffle core
//!
//! Image decoding and export, synthetic sources, the command-line flow and
//! the crate-wide error type live here. None of it is needed to call
//! [`crate::spatial::tiles::reshuffle`].

/// Command-line interface and batch orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Grayscale image loading and frame export
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// Synthetic mosaic generation for testing
pub mod synthetic;
