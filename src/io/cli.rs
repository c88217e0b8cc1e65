//! Command-line interface for solving one puzzle file or a directory of them

use crate::algorithm::solver::PuzzleSolver;
use crate::analysis::patterns::ReferencePattern;
use crate::io::configuration::{IMAGE_SUFFIX, PUZZLE_EXTENSION};
use crate::io::error::{Result, WithPath, io_error};
use crate::io::image::export_image_as_png;
use crate::io::logging::level_filter;
use crate::io::parse::parse_tile_file;
use crate::io::progress::{ProgressManager, Stage};
use crate::spatial::tiles::TileId;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Reassemble square image tiles and count the pixels outside a reference pattern"
)]
/// Command-line arguments for the puzzle solver
pub struct Cli {
    /// Puzzle text file or directory of `.txt` puzzles
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Reference pattern file (`#` marks a required active cell)
    #[arg(short, long, value_name = "FILE")]
    pub pattern: Option<PathBuf>,

    /// Export each assembled image as PNG next to its input
    #[arg(short, long)]
    pub export: bool,

    /// Suppress progress output and non-error logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        level_filter(self.verbose, self.quiet)
    }

    /// Load the reference pattern, falling back to the sea monster
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file cannot be read or holds no
    /// active cell
    pub fn load_pattern(&self) -> Result<ReferencePattern> {
        match &self.pattern {
            Some(path) => std::fs::read_to_string(path)
                .with_path(path)?
                .parse::<ReferencePattern>(),
            None => ReferencePattern::sea_monster(),
        }
    }
}

/// The two results of one solved puzzle file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// Input file
    pub path: PathBuf,
    /// Product of the four corner tile ids
    pub corner_product: TileId,
    /// Active pixels outside every pattern match
    pub roughness: usize,
}

/// Orchestrates solving of puzzle files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every puzzle file named by the CLI target
    ///
    /// Reports are returned in file order; processing stops at the first
    /// file that fails.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, pattern loading or any puzzle
    /// fails
    pub fn process(&mut self) -> Result<Vec<FileReport>> {
        let pattern = self.cli.load_pattern()?;
        let files = self.collect_files()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            reports.push(self.process_file(file, &pattern)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            Ok(vec![self.cli.target.clone()])
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target).with_path(&self.cli.target)? {
                let path = entry.with_path(&self.cli.target)?.path();
                if path.is_file()
                    && path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be a puzzle file or directory"))
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        pattern: &ReferencePattern,
    ) -> Result<FileReport> {
        let start_time = Instant::now();
        log::info!("processing {}", input_path.display());

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
            pm.enter_stage(Stage::Parse);
        }
        let tiles = parse_tile_file(input_path)?;

        self.enter_stage(Stage::Index);
        let solution = PuzzleSolver::new(tiles)?
            .solve_with_progress(pattern, |stage| self.enter_stage(stage))?;

        if self.cli.export {
            let image_path = Self::get_image_path(input_path);
            export_image_as_png(&solution.image, Some(&solution.scan), &image_path)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed());
            log::debug!("solved {} of {} files", pm.completed(), pm.file_count());
        }

        Ok(FileReport {
            path: input_path.to_path_buf(),
            corner_product: solution.corner_product,
            roughness: solution.roughness,
        })
    }

    fn enter_stage(&self, stage: Stage) {
        if let Some(ref pm) = self.progress_manager {
            pm.enter_stage(stage);
        }
    }

    /// Path of the PNG exported for `input_path`
    pub fn get_image_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let image_name = format!("{}{IMAGE_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(image_name)
        } else {
            PathBuf::from(image_name)
        }
    }
}
