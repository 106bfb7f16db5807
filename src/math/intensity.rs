//! Intensity scaling and bit-depth conversion around the transform
//!
//! The reshuffle itself never touches sample values; these helpers prepare
//! captured data before it and make frames viewable after it.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use num_traits::ToPrimitive;

/// Multiply every sample by `factor`, widening to `f64`
///
/// Samples that cannot be represented as `f64` become `NaN`.
pub fn scale_intensity<S, T>(grid: &ArrayBase<S, Ix2>, factor: f64) -> Array2<f64>
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    grid.map(|value| value.to_f64().map_or(f64::NAN, |v| v * factor))
}

/// Round and clamp samples into the 16-bit range
///
/// `NaN` maps to zero.
pub fn quantize_u16<S, T>(grid: &ArrayBase<S, Ix2>) -> Array2<u16>
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    grid.map(|value| {
        let v = value.to_f64().unwrap_or(0.0);
        if v.is_nan() {
            0
        } else {
            v.round().clamp(0.0, f64::from(u16::MAX)) as u16
        }
    })
}

/// Number of samples `quantize_u16` clamps into the 16-bit range
///
/// `NaN` samples are not counted.
pub fn clipped_samples<S, T>(grid: &ArrayBase<S, Ix2>) -> usize
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    grid.iter()
        .filter_map(ToPrimitive::to_f64)
        .filter(|v| !v.is_nan() && !(0.0..=f64::from(u16::MAX)).contains(&v.round()))
        .count()
}

/// Stretch samples linearly so the grid's minimum maps to 0 and maximum to 255
///
/// A flat grid, or one without finite samples, maps to zeros.
pub fn normalize_u8<S, T>(grid: &ArrayBase<S, Ix2>) -> Array2<u8>
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    let values = grid.map(|value| value.to_f64().unwrap_or(f64::NAN));
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return Array2::zeros(values.raw_dim());
    }

    values.mapv(|v| {
        if v.is_finite() {
            ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8
        } else {
            0
        }
    })
}
