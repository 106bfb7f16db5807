//! Numeric utilities applied around the transform

/// Intensity scaling, quantisation and normalisation
pub mod intensity;
