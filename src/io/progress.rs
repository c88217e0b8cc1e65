//! Batch progress display with a per-file stage bar

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Steps of solving one puzzle file, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading tile text
    Parse,
    /// Building the border index and finding corners
    Index,
    /// Placing and stitching tiles
    Assemble,
    /// Searching the image for the reference pattern
    Scan,
}

impl Stage {
    /// Every stage in execution order
    pub const ALL: [Self; 4] = [Self::Parse, Self::Index, Self::Assemble, Self::Scan];

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parse => "parsing",
            Self::Index => "indexing borders",
            Self::Assemble => "assembling",
            Self::Scan => "scanning",
        }
    }

    /// Number of stages finished once this one starts
    pub const fn position(self) -> u64 {
        match self {
            Self::Parse => 0,
            Self::Index => 1,
            Self::Assemble => 2,
            Self::Scan => 3,
        }
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] Files: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for a batch of puzzle files
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    stage_bar: Option<ProgressBar>,
    file_count: usize,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            stage_bar: None,
            file_count: 0,
            completed: 0,
        }
    }

    /// Create the batch and stage bars for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        self.completed = 0;

        // A single file needs no batch bar
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let stage_bar = ProgressBar::new(Stage::ALL.len() as u64);
        stage_bar.set_style(STAGE_STYLE.clone());
        self.stage_bar = Some(self.multi_progress.add(stage_bar));
    }

    /// Reset the stage bar for a new file
    pub fn start_file(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if let Some(ref bar) = self.stage_bar {
            bar.set_prefix(display_name);
            bar.set_position(0);
            bar.set_message(String::new());
        }
    }

    /// Show that `stage` of the current file has started
    pub fn enter_stage(&self, stage: Stage) {
        if let Some(ref bar) = self.stage_bar {
            bar.set_position(stage.position());
            bar.set_message(stage.label());
        }
    }

    /// Mark the current file as solved
    pub fn complete_file(&mut self, elapsed: Duration) {
        self.completed += 1;
        if let Some(ref bar) = self.stage_bar {
            bar.set_position(Stage::ALL.len() as u64);
            bar.set_message(format!("✓ {elapsed:.1?}"));
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Number of files completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Number of files in the batch
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        if let Some(ref bar) = self.stage_bar {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
