//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use jigsolve::SolverError;
    use jigsolve::algorithm::assembler::{CandidateScope, ConflictPolicy};
    use jigsolve::io::cli::{BoardSize, Cli, FileProcessor};
    use jigsolve::io::configuration::{DEFAULT_SEED, PEAK_DISTANCE, SHARPNESS_OFFSET};
    use jigsolve::io::input::SolutionDocument;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn quiet_cli(args: &[&str]) -> Cli {
        let mut full = vec!["program"];
        full.extend_from_slice(args);
        full.push("--quiet");
        Cli::parse_from(full)
    }

    fn synthesize(path: &Path, size: &str) {
        let target = path.to_str().unwrap();
        let mut processor = FileProcessor::new(quiet_cli(&[target, "--synthesize", size]));
        processor.process().unwrap();
    }

    // Tests CLI parsing with only the target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "puzzle.json"]);

        assert_eq!(cli.target, PathBuf::from("puzzle.json"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.peak_distance, PEAK_DISTANCE);
        assert_eq!(cli.sharpness_offset, SHARPNESS_OFFSET);
        assert!(cli.max_distance.is_none());
        assert!(cli.synthesize.is_none());
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with every option set
    // Verified by swapping short flag definitions
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "puzzles",
            "-q",
            "-n",
            "-r",
            "-v",
            "-j",
            "-m",
            "2.5",
            "--peak-distance",
            "20",
            "--sharpness-offset",
            "12",
            "--skip-conflicts",
            "-s",
            "9",
        ]);

        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert!(cli.render && cli.visualize);
        assert_eq!(cli.seed, 9);

        let corners = cli.corner_config();
        assert_eq!(corners.peak_distance, 20);
        assert_eq!(corners.sharpness_offset, 12);

        let assembly = cli.assembly_config();
        assert_eq!(assembly.max_match_distance, Some(2.5));
        assert_eq!(assembly.conflict_policy, ConflictPolicy::Skip);
        assert_eq!(assembly.candidate_scope, CandidateScope::All);
    }

    // Tests board sizes parse in either case and reject garbage
    // Verified by splitting on lowercase x only
    #[test]
    fn test_board_size() {
        assert_eq!(
            "3x4".parse::<BoardSize>(),
            Ok(BoardSize { rows: 3, cols: 4 })
        );
        assert_eq!(
            " 2X5".parse::<BoardSize>(),
            Ok(BoardSize { rows: 2, cols: 5 })
        );
        assert!("34".parse::<BoardSize>().is_err());
        assert!("3xfour".parse::<BoardSize>().is_err());
    }

    // Tests a synthesized document is solved into a complete solution
    // Verified by writing the solution next to the wrong stem
    #[test]
    fn test_synthesize_then_solve() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("board.json");
        synthesize(&input, "2x3");
        assert!(input.exists());

        let mut processor =
            FileProcessor::new(quiet_cli(&[input.to_str().unwrap(), "--render"]));
        processor.process().unwrap();

        let solution = SolutionDocument::load(&temp_dir.path().join("board_solution.json")).unwrap();
        assert_eq!(solution.cells.len(), 6);
        assert!(solution.unplaced.is_empty());
        assert_eq!(solution.corners.len(), 6);
        assert!(!solution.cancelled);
        assert!(temp_dir.path().join("board_solution.png").exists());
        assert!(!temp_dir.path().join("board_visualization.gif").exists());
    }

    // Tests directories are scanned for documents and solutions are skipped
    // Verified by treating solution files as inputs
    #[test]
    fn test_process_directory() {
        let temp_dir = TempDir::new().unwrap();
        synthesize(&temp_dir.path().join("a.json"), "2x2");
        synthesize(&temp_dir.path().join("b.json"), "3x2");
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let dir = temp_dir.path().to_str().unwrap();
        FileProcessor::new(quiet_cli(&[dir, "--visualize"]))
            .process()
            .unwrap();
        assert!(temp_dir.path().join("a_solution.json").exists());
        assert!(temp_dir.path().join("b_solution.json").exists());
        assert!(temp_dir.path().join("b_visualization.gif").exists());
        assert!(!temp_dir.path().join("a_solution_solution.json").exists());

        // A second pass finds every solution present and does nothing
        FileProcessor::new(quiet_cli(&[dir])).process().unwrap();
    }

    // Tests an existing solution is kept unless skipping is disabled
    // Verified by inverting the skip check
    #[test]
    fn test_skip_existing_solution() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("p.json");
        let output = temp_dir.path().join("p_solution.json");
        synthesize(&input, "2x2");
        fs::write(&output, "placeholder").unwrap();

        let target = input.to_str().unwrap();
        FileProcessor::new(quiet_cli(&[target])).process().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "placeholder");

        FileProcessor::new(quiet_cli(&[target, "--no-skip"]))
            .process()
            .unwrap();
        assert!(SolutionDocument::load(&output).is_ok());
    }

    // Tests targets that are neither documents nor directories are refused
    // Verified by removing target validation
    #[test]
    fn test_invalid_targets() {
        let temp_dir = TempDir::new().unwrap();
        let txt_file = temp_dir.path().join("notes.txt");
        fs::write(&txt_file, "not a puzzle").unwrap();

        let err = FileProcessor::new(quiet_cli(&[txt_file.to_str().unwrap()]))
            .process()
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));

        let missing = temp_dir.path().join("missing.json");
        let err = FileProcessor::new(quiet_cli(&[missing.to_str().unwrap()]))
            .process()
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }

    // Tests a broken document fails with its path attached
    // Verified by dropping the path from parse errors
    #[test]
    fn test_broken_document() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.json");
        fs::write(&input, "{ not json").unwrap();

        let err = FileProcessor::new(quiet_cli(&[input.to_str().unwrap()]))
            .process()
            .unwrap_err();
        match err {
            SolverError::Parse { path, .. } => assert_eq!(path, input),
            other => unreachable!("unexpected error: {other}"),
        }
    }

    // Tests an invalid synthetic board size surfaces as a parameter error
    // Verified by clamping dimensions to two
    #[test]
    fn test_synthesize_too_small() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("tiny.json");
        let err = FileProcessor::new(quiet_cli(&[target.to_str().unwrap(), "--synthesize", "1x5"]))
            .process()
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidParameter { .. }));
        assert!(!target.exists());
    }
}
