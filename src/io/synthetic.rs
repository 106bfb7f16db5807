//! Synthetic mosaic sources for exercising the transform without a camera

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayBase, ArrayView2, Axis, Data, Ix2, concatenate};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::TileGeometry;

/// Pattern written into a synthetic mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticPattern {
    /// Every sample holds the phase index of its position, so frame `p` is constant `p`
    PhaseRamp,
    /// Uniform 8-bit noise from a seeded generator
    Random {
        /// Generator seed
        seed: u64,
    },
}

impl fmt::Display for SyntheticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhaseRamp => f.write_str("ramp"),
            Self::Random { seed } => write!(f, "random(seed={seed})"),
        }
    }
}

/// Pattern family selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternKind {
    /// See [`SyntheticPattern::PhaseRamp`]
    #[default]
    Ramp,
    /// See [`SyntheticPattern::Random`]
    Random,
}

impl PatternKind {
    /// Bind a seed to the pattern family
    pub const fn with_seed(self, seed: u64) -> SyntheticPattern {
        match self {
            Self::Ramp => SyntheticPattern::PhaseRamp,
            Self::Random => SyntheticPattern::Random { seed },
        }
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ramp" => Ok(Self::Ramp),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown pattern '{other}' (expected 'ramp' or 'random')")),
        }
    }
}

/// Generate a square `size x size` mosaic for tile size `tile_size`
///
/// # Errors
///
/// Returns an error if:
/// - `size` exceeds the maximum grid dimension
/// - `size` is not divisible by `tile_size`, or `tile_size` is zero
pub fn generate_test_grid(
    tile_size: usize,
    size: usize,
    pattern: SyntheticPattern,
) -> Result<Array2<u16>> {
    if size > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "size",
            &size,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    let geometry = TileGeometry::new(size, size, tile_size)?;

    let grid = match pattern {
        SyntheticPattern::PhaseRamp => Array2::from_shape_fn((size, size), |(y, x)| {
            geometry
                .frame_position(y, x)
                .map_or(0, |(phase, _, _)| u16::try_from(phase).unwrap_or(u16::MAX))
        }),
        SyntheticPattern::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            Array2::from_shape_simple_fn((size, size), || u16::from(rng.random::<u8>()))
        }
    };

    Ok(grid)
}

/// Place `copies` of a grid side by side to form a multi-bucket image
///
/// # Errors
///
/// Returns an error if `copies` is zero.
pub fn tile_horizontally<S, T>(grid: &ArrayBase<S, Ix2>, copies: usize) -> Result<Array2<T>>
where
    S: Data<Elem = T>,
    T: Clone,
{
    if copies == 0 {
        return Err(invalid_parameter("copies", &copies, &"must be at least 1"));
    }

    let views: Vec<ArrayView2<'_, T>> = std::iter::repeat_n(grid.view(), copies).collect();
    Ok(concatenate(Axis(1), &views)?)
}
