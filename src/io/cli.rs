//! Command-line interface for batch reshuffling of mosaic images into frames

use crate::io::configuration::{
    BUCKET_COUNT, DEFAULT_INTENSITY_SCALE, DEFAULT_OUTPUT_DIR, DEFAULT_SEED, DEFAULT_TILE_SIZE,
    FRAME_NUMBER_WIDTH, PREVIEW_SUFFIX, SYNTHETIC_STEM,
};
use crate::io::error::{Result, WithContext, computation_error, invalid_parameter};
use crate::io::image::{ExportMode, export_grid_as_png, load_grid};
use crate::io::progress::ProgressManager;
use crate::io::synthetic::{PatternKind, SyntheticPattern, generate_test_grid, tile_horizontally};
use crate::math::intensity::{clipped_samples, scale_intensity};
use crate::spatial::coverage::verify_coverage;
use crate::spatial::grid::{TileGeometry, split_halves};
use crate::spatial::tiles::{interleave, reshuffle};
use clap::Parser;
use ndarray::{Array2, ArrayView2};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "mosaic-frames")]
#[command(
    author,
    version,
    about = "Split K x K mosaic images into per-phase frame stacks"
)]
/// Command-line arguments for the reshuffle tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory of PNG files
    #[arg(value_name = "TARGET", required_unless_present = "synthetic")]
    pub target: Option<PathBuf>,

    /// Tile size K; each K x K tile yields one sample per output frame
    #[arg(short = 'k', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Multiplier applied to source intensities before reshuffling
    #[arg(short, long, default_value_t = DEFAULT_INTENSITY_SCALE)]
    pub scale: f64,

    /// Treat each input as a side-by-side dual image and reshuffle both halves
    #[arg(long)]
    pub split: bool,

    /// Directory receiving previews and numbered frames
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Stretch each written image to the full 8-bit range
    #[arg(long)]
    pub normalize: bool,

    /// Interleave frames back and check they reproduce the source exactly
    #[arg(long)]
    pub verify: bool,

    /// Generate a SIZE x SIZE synthetic mosaic instead of reading TARGET
    #[arg(long, value_name = "SIZE", conflicts_with = "target")]
    pub synthetic: Option<usize>,

    /// Synthetic pattern: 'ramp' or 'random'
    #[arg(long, default_value = "ramp")]
    pub pattern: PatternKind,

    /// Seed for the random synthetic pattern
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process sources even if their frames already exist
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Export mode selected by the flags
    pub const fn export_mode(&self) -> ExportMode {
        if self.normalize {
            ExportMode::Normalized
        } else {
            ExportMode::Raw
        }
    }

    /// Number of buckets each source is split into
    pub const fn bucket_count(&self) -> usize {
        if self.split { BUCKET_COUNT } else { 1 }
    }
}

/// Where a mosaic comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Image file on disk
    File(PathBuf),
    /// Generated in memory
    Synthetic {
        /// Edge length of each bucket
        size: usize,
        /// Pattern to generate
        pattern: SyntheticPattern,
    },
}

impl Source {
    /// Stem used to name every output of this source
    pub fn stem(&self) -> String {
        match self {
            Self::File(path) => path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            Self::Synthetic { .. } => SYNTHETIC_STEM.to_string(),
        }
    }
}

/// Orchestrates batch reshuffling with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process all sources according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, loading, reshuffling or
    /// writing fails for any source. Processing stops at the first failure.
    pub fn process(&mut self) -> Result<()> {
        if !self.cli.scale.is_finite() {
            return Err(invalid_parameter(
                "scale",
                &self.cli.scale,
                &"must be a finite number",
            ));
        }

        let sources = self.collect_sources()?;
        if sources.is_empty() {
            info!("Nothing to process");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sources.len());
        }

        for (index, source) in sources.iter().enumerate() {
            self.process_source(source, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Resolve the target argument into the list of sources to process
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing, is neither a PNG file nor a
    /// directory, or the directory cannot be read.
    pub fn collect_sources(&self) -> Result<Vec<Source>> {
        if let Some(size) = self.cli.synthetic {
            let source = Source::Synthetic {
                size,
                pattern: self.cli.pattern.with_seed(self.cli.seed),
            };
            return Ok(self
                .should_process(&source)
                .then_some(source)
                .into_iter()
                .collect());
        }

        let Some(target) = &self.cli.target else {
            return Err(invalid_parameter(
                "target",
                &"<none>",
                &"a target path or --synthetic is required",
            ));
        };

        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ));
            }
            let source = Source::File(target.clone());
            Ok(self
                .should_process(&source)
                .then_some(source)
                .into_iter()
                .collect())
        } else if target.is_dir() {
            // Frames and previews from earlier runs are not sources
            let scanning_output = same_location(target, &self.cli.output);
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if is_png(&path) && !(scanning_output && is_generated_output(&path)) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files
                .into_iter()
                .map(Source::File)
                .filter(|source| self.should_process(source))
                .collect())
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process(&self, source: &Source) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let bucket = self.cli.split.then_some(0);
        let first_frame = Self::frame_path(&self.cli.output, &source.stem(), bucket, 0);
        if first_frame.exists() {
            warn!(
                source = %source.stem(),
                output = %first_frame.display(),
                "Skipping source, frames already exist"
            );
            false
        } else {
            true
        }
    }

    fn load_source(&self, source: &Source) -> Result<Array2<u16>> {
        match source {
            Source::File(path) => load_grid(path),
            Source::Synthetic { size, pattern } => {
                let bucket = generate_test_grid(self.cli.tile_size, *size, *pattern)?;
                if self.cli.split {
                    tile_horizontally(&bucket, BUCKET_COUNT)
                } else {
                    Ok(bucket)
                }
            }
        }
    }

    fn process_source(&mut self, source: &Source, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let stem = source.stem();
        let mode = self.cli.export_mode();
        let tile_size = self.cli.tile_size;

        let raw = self.load_source(source)?;
        let image = scale_intensity(&raw, self.cli.scale);
        debug!(source = %stem, height = image.nrows(), width = image.ncols(), "Loaded mosaic");

        if mode == ExportMode::Raw {
            let clipped = clipped_samples(&image);
            if clipped > 0 {
                warn!(
                    source = %stem,
                    clipped,
                    scale = self.cli.scale,
                    "Scaled samples exceed the 16-bit range and will be clamped"
                );
            }
        }

        let halves = if self.cli.split {
            let (left, right) = split_halves(&image)?;
            vec![left, right]
        } else {
            Vec::new()
        };
        let buckets: Vec<(Option<usize>, ArrayView2<'_, f64>)> = if self.cli.split {
            halves
                .iter()
                .enumerate()
                .map(|(b, half)| (Some(b), half.view()))
                .collect()
        } else {
            vec![(None, image.view())]
        };

        // Validate every bucket before writing anything for this source
        for (_, bucket) in &buckets {
            TileGeometry::of(bucket, tile_size)?;
        }

        let total_frames = self.cli.bucket_count() * tile_size * tile_size;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_source(index, &stem, total_frames);
        }

        let preview = Self::preview_path(&self.cli.output, &stem, None);
        ensure_not_source(source, &preview)?;
        export_grid_as_png(&image, &preview, mode)?;

        let mut written = 0;
        for (bucket_index, bucket) in &buckets {
            if bucket_index.is_some() {
                let preview = Self::preview_path(&self.cli.output, &stem, *bucket_index);
                ensure_not_source(source, &preview)?;
                export_grid_as_png(bucket, &preview, mode)?;
            }

            let frames = reshuffle(bucket, tile_size)?;
            debug!(
                source = %stem,
                bucket = ?bucket_index,
                frames = frames.len(),
                frame_shape = ?frames.frame_shape(),
                "Reshuffled bucket"
            );

            if self.cli.verify {
                verify_coverage(&TileGeometry::of(bucket, tile_size)?)?;
                let restored = interleave(&frames)?;
                // Bitwise comparison so NaN samples still count as preserved
                let identical = restored
                    .iter()
                    .zip(bucket.iter())
                    .all(|(a, b)| a.to_bits() == b.to_bits());
                if restored.dim() != bucket.dim() || !identical {
                    return Err(computation_error(
                        "verify",
                        &format!("interleaved frames of '{stem}' differ from the source"),
                    ));
                }
            }

            for (frame_index, frame) in frames.iter().enumerate() {
                let path = Self::frame_path(&self.cli.output, &stem, *bucket_index, frame_index);
                ensure_not_source(source, &path)?;
                export_grid_as_png(&frame, &path, mode)?;
                written += 1;
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_frames(index, written);
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_source(index);
        }
        info!(
            source = %stem,
            frames = written,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Wrote frames"
        );

        Ok(())
    }

    /// Path of a numbered frame: `{stem}_{bucket}_{index:05}.png` or `{stem}_{index:05}.png`
    pub fn frame_path(output_dir: &Path, stem: &str, bucket: Option<usize>, index: usize) -> PathBuf {
        let width = FRAME_NUMBER_WIDTH;
        let name = match bucket {
            Some(b) => format!("{stem}_{b}_{index:0width$}.png"),
            None => format!("{stem}_{index:0width$}.png"),
        };
        output_dir.join(name)
    }

    /// Path of a source preview (`{stem}_preview.png`) or bucket preview (`{stem}_{bucket}_preview.png`)
    pub fn preview_path(output_dir: &Path, stem: &str, bucket: Option<usize>) -> PathBuf {
        let name = match bucket {
            Some(b) => format!("{stem}_{b}_{PREVIEW_SUFFIX}.png"),
            None => format!("{stem}_{PREVIEW_SUFFIX}.png"),
        };
        output_dir.join(name)
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

// Names written by `frame_path` or `preview_path`
fn is_generated_output(path: &Path) -> bool {
    let Some((_, last)) = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.rsplit_once('_'))
    else {
        return false;
    };
    last == PREVIEW_SUFFIX
        || (last.len() == FRAME_NUMBER_WIDTH && last.bytes().all(|b| b.is_ascii_digit()))
}

// False when either path does not exist yet
fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn ensure_not_source(source: &Source, output_path: &Path) -> Result<()> {
    match source {
        Source::File(path) if same_location(path, output_path) => Err(invalid_parameter(
            "output",
            &output_path.display(),
            &format!("output would overwrite source '{}'", path.display()),
        )),
        _ => Ok(()),
    }
}
