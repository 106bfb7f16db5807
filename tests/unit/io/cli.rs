//! Tests for CLI parsing, output naming and the batch reshuffle flow

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{GrayImage, Luma};
    use mosaic_frames::ReshuffleError;
    use mosaic_frames::io::cli::{Cli, FileProcessor, Source};
    use mosaic_frames::io::image::{ExportMode, load_grid};
    use mosaic_frames::io::synthetic::{PatternKind, SyntheticPattern};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mosaic-frames").chain(args.iter().copied())).unwrap()
    }

    fn output_arg(dir: &TempDir) -> String {
        dir.path().join("out").to_string_lossy().to_string()
    }

    // Tests defaults when only a target is given
    // Verified by changing the default tile size
    #[test]
    fn test_cli_defaults() {
        let cli = parse(&["capture.png"]);

        assert_eq!(cli.target, Some(PathBuf::from("capture.png")));
        assert_eq!(cli.tile_size, 2);
        assert!((cli.scale - 16.0).abs() < f64::EPSILON);
        assert_eq!(cli.output, PathBuf::from("outputs"));
        assert_eq!(cli.pattern, PatternKind::Ramp);
        assert_eq!(cli.export_mode(), ExportMode::Raw);
        assert_eq!(cli.bucket_count(), 1);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests a target or synthetic source is required, not both
    // Verified by dropping required_unless_present
    #[test]
    fn test_cli_source_arguments() {
        assert!(Cli::try_parse_from(["mosaic-frames"]).is_err());
        assert!(Cli::try_parse_from(["mosaic-frames", "a.png", "--synthetic", "8"]).is_err());

        let cli = parse(&["--synthetic", "8", "--pattern", "random", "-k", "4", "--split"]);
        assert_eq!(cli.synthetic, Some(8));
        assert_eq!(cli.pattern, PatternKind::Random);
        assert_eq!(cli.tile_size, 4);
        assert_eq!(cli.bucket_count(), 2);
    }

    // Tests numbered frame and preview naming
    // Verified by dropping the zero padding
    #[test]
    fn test_output_paths() {
        let out = Path::new("out");

        assert_eq!(
            FileProcessor::frame_path(out, "frame", Some(1), 3),
            PathBuf::from("out/frame_1_00003.png")
        );
        assert_eq!(
            FileProcessor::frame_path(out, "frame", None, 12),
            PathBuf::from("out/frame_00012.png")
        );
        assert_eq!(
            FileProcessor::preview_path(out, "frame", Some(0)),
            PathBuf::from("out/frame_0_preview.png")
        );
        assert_eq!(
            FileProcessor::preview_path(out, "frame", None),
            PathBuf::from("out/frame_preview.png")
        );
    }

    // Tests source stems for files and synthetic grids
    // Verified by keeping the file extension in the stem
    #[test]
    fn test_source_stem() {
        assert_eq!(Source::File(PathBuf::from("dir/cap_01.png")).stem(), "cap_01");
        let synthetic = Source::Synthetic {
            size: 8,
            pattern: SyntheticPattern::PhaseRamp,
        };
        assert_eq!(synthetic.stem(), "synthetic");
    }

    // Tests the split synthetic flow writes previews and numbered frames per bucket
    // Verified by writing bucket frames without the bucket index
    #[test]
    fn test_synthetic_split_flow_writes_frames() {
        let dir = TempDir::new().unwrap();
        let out = output_arg(&dir);
        let cli = parse(&[
            "--synthetic", "8", "--split", "--verify", "--quiet", "--scale", "1", "-o", &out,
        ]);
        let mut processor = FileProcessor::new(cli);
        processor.process().unwrap();

        let out = PathBuf::from(out);
        assert!(out.join("synthetic_preview.png").exists());
        assert!(out.join("synthetic_0_preview.png").exists());
        assert!(out.join("synthetic_1_preview.png").exists());
        for bucket in 0..2 {
            for index in 0..4 {
                let path = FileProcessor::frame_path(&out, "synthetic", Some(bucket), index);
                let frame = load_grid(&path).unwrap();
                assert_eq!(frame.dim(), (4, 4));
                assert!(frame.iter().all(|&v| usize::from(v) == index));
            }
        }
        assert!(!FileProcessor::frame_path(&out, "synthetic", Some(0), 4).exists());
    }

    // Tests a PNG directory is processed in sorted order and scaled
    // Verified by ignoring the intensity scale
    #[test]
    fn test_directory_flow_scales_and_reshuffles() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        GrayImage::from_fn(4, 4, |x, y| Luma([(y * 4 + x) as u8]))
            .save(input.join("b.png"))
            .unwrap();
        GrayImage::from_pixel(2, 2, Luma([3]))
            .save(input.join("a.png"))
            .unwrap();
        std::fs::write(input.join("notes.txt"), "ignored").unwrap();

        let out = output_arg(&dir);
        let target = input.to_string_lossy().to_string();
        let cli = parse(&[&target, "-q", "-o", &out]);
        let processor = FileProcessor::new(cli);

        let sources = processor.collect_sources().unwrap();
        assert_eq!(
            sources,
            vec![
                Source::File(input.join("a.png")),
                Source::File(input.join("b.png"))
            ]
        );

        let mut processor = processor;
        processor.process().unwrap();

        let frame = load_grid(&FileProcessor::frame_path(Path::new(&out), "b", None, 3)).unwrap();
        assert_eq!(frame, ndarray::array![[5_u16 * 16, 7 * 16], [13 * 16, 15 * 16]]);
    }

    // Tests sources with existing frames are skipped unless forced
    // Verified by ignoring the skip flag
    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        let out = output_arg(&dir);
        let first = FileProcessor::frame_path(Path::new(&out), "synthetic", None, 0);
        std::fs::create_dir_all(Path::new(&out)).unwrap();
        std::fs::write(&first, b"placeholder").unwrap();

        let skipping = FileProcessor::new(parse(&["--synthetic", "4", "-q", "-o", &out]));
        assert!(skipping.collect_sources().unwrap().is_empty());

        let forcing = FileProcessor::new(parse(&["--synthetic", "4", "-q", "-n", "-o", &out]));
        assert_eq!(forcing.collect_sources().unwrap().len(), 1);
    }

    // Tests indivisible sources fail before any output is written
    // Verified by writing the preview before validation
    #[test]
    fn test_indivisible_source_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("odd.png");
        GrayImage::from_pixel(3, 4, Luma([1])).save(&input).unwrap();

        let out = output_arg(&dir);
        let target = input.to_string_lossy().to_string();
        let mut processor = FileProcessor::new(parse(&[&target, "-q", "-o", &out]));

        assert!(matches!(
            processor.process(),
            Err(ReshuffleError::DimensionMismatch {
                height: 4,
                width: 3,
                tile_size: 2
            })
        ));
        assert!(!Path::new(&out).join("odd_preview.png").exists());
    }

    // Tests non-PNG targets and non-finite scales are rejected
    // Verified by accepting any file extension
    #[test]
    fn test_invalid_targets_and_scale() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("capture.txt");
        std::fs::write(&text, "not an image").unwrap();

        let target = text.to_string_lossy().to_string();
        let processor = FileProcessor::new(parse(&[&target, "-q"]));
        assert!(matches!(
            processor.collect_sources(),
            Err(ReshuffleError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));

        let mut processor = FileProcessor::new(parse(&["--synthetic", "4", "-q", "--scale", "inf"]));
        assert!(matches!(
            processor.process(),
            Err(ReshuffleError::InvalidParameter {
                parameter: "scale",
                ..
            })
        ));
    }

    // Tests a source inside the output directory is left intact across runs
    // Verified by naming the source preview {stem}.png
    #[test]
    fn test_source_inside_output_is_preserved() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("outputs");
        std::fs::create_dir_all(&out).unwrap();
        let input = out.join("cap.png");
        GrayImage::from_pixel(4, 4, Luma([10])).save(&input).unwrap();

        let target = input.to_string_lossy().to_string();
        let out_arg = out.to_string_lossy().to_string();
        let mut processor = FileProcessor::new(parse(&[&target, "-q", "-o", &out_arg]));
        processor.process().unwrap();

        assert!(load_grid(&input).unwrap().iter().all(|&v| v == 10));
        assert!(out.join("cap_preview.png").exists());
        let frame = load_grid(&FileProcessor::frame_path(&out, "cap", None, 0)).unwrap();
        assert!(frame.iter().all(|&v| v == 160));

        let mut rerun = FileProcessor::new(parse(&[&out_arg, "-q", "-n", "-o", &out_arg]));
        assert_eq!(rerun.collect_sources().unwrap(), vec![Source::File(input.clone())]);
        rerun.process().unwrap();
        assert!(load_grid(&input).unwrap().iter().all(|&v| v == 10));
    }

    // Tests written frames and previews are only ignored when scanning the output directory
    // Verified by filtering generated names in every directory
    #[test]
    fn test_generated_names_kept_outside_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        for name in ["cap_00001.png", "cap_preview.png"] {
            GrayImage::from_pixel(2, 2, Luma([1])).save(input.join(name)).unwrap();
        }

        let target = input.to_string_lossy().to_string();
        let out = output_arg(&dir);
        let elsewhere = FileProcessor::new(parse(&[&target, "-q", "-o", &out]));
        assert_eq!(elsewhere.collect_sources().unwrap().len(), 2);

        let in_place = FileProcessor::new(parse(&[&target, "-q", "-o", &target]));
        assert!(in_place.collect_sources().unwrap().is_empty());
    }

    // Tests an output path resolving to the source is refused before writing
    // Verified by exporting without comparing canonical paths
    #[cfg(unix)]
    #[test]
    fn test_output_resolving_to_source_is_refused() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cap.png");
        GrayImage::from_pixel(4, 4, Luma([10])).save(&input).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::os::unix::fs::symlink(&input, out.join("cap_preview.png")).unwrap();

        let target = input.to_string_lossy().to_string();
        let out_arg = out.to_string_lossy().to_string();
        let mut processor = FileProcessor::new(parse(&[&target, "-q", "-o", &out_arg]));

        assert!(matches!(
            processor.process(),
            Err(ReshuffleError::InvalidParameter {
                parameter: "output",
                ..
            })
        ));
        assert!(load_grid(&input).unwrap().iter().all(|&v| v == 10));
    }
}
