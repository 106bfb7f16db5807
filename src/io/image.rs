//! Grayscale image loading and PNG export of grids and frames

use std::path::Path;

use image::{ImageBuffer, Luma};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use num_traits::ToPrimitive;

use crate::io::error::{ReshuffleError, Result, invalid_source};
use crate::math::intensity::{normalize_u8, quantize_u16};

/// How sample values are turned into pixel values on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Round and clamp to 16 bits, written as 16-bit grayscale
    #[default]
    Raw,
    /// Stretch the grid's value range onto 8-bit grayscale
    Normalized,
}

/// Load an image as a single-channel sample grid
///
/// Color images are reduced to luma. 8-bit sources keep their 0..=255
/// values; 16-bit sources keep full precision.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded buffer does not match the reported dimensions
pub fn load_grid(path: &Path) -> Result<Array2<u16>> {
    let img = image::open(path).map_err(|e| ReshuffleError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let color = img.color();
    let (width, height, samples): (u32, u32, Vec<u16>) =
        if color.bytes_per_pixel() / color.channel_count() > 1 {
            let luma = img.to_luma16();
            let (w, h) = luma.dimensions();
            (w, h, luma.into_raw())
        } else {
            let luma = img.to_luma8();
            let (w, h) = luma.dimensions();
            (w, h, luma.into_raw().into_iter().map(u16::from).collect())
        };
    let (width, height) = (width as usize, height as usize);

    Array2::from_shape_vec((height, width), samples).map_err(|e| {
        invalid_source(&format!(
            "decoded '{}' does not fill a {height}x{width} grid: {e}",
            path.display()
        ))
    })
}

/// Export a grid as a grayscale PNG
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if:
/// - The grid is larger than an image can address
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png<S, T>(grid: &ArrayBase<S, Ix2>, output_path: &Path, mode: ExportMode) -> Result<()>
where
    S: Data<Elem = T>,
    T: ToPrimitive,
{
    let (height, width) = grid.dim();
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(invalid_source(&format!(
            "grid {height}x{width} exceeds image dimension limits"
        )));
    };

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReshuffleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let saved = match mode {
        ExportMode::Raw => {
            let pixels = quantize_u16(grid).iter().copied().collect();
            ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width, height, pixels)
                .ok_or_else(|| invalid_source(&"pixel buffer does not match image size"))?
                .save(output_path)
        }
        ExportMode::Normalized => {
            let pixels = normalize_u8(grid).iter().copied().collect();
            ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(width, height, pixels)
                .ok_or_else(|| invalid_source(&"pixel buffer does not match image size"))?
                .save(output_path)
        }
    };

    saved.map_err(|e| ReshuffleError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
