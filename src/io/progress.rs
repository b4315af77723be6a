//! Multi-file progress tracking with automatic batching for large sets

use crate::algorithm::assembler::{AssemblyObserver, Placement};
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::grid::PuzzleGrid;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on file count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `placed`, `pieces`) for rolling window display
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress bar for a new puzzle
    pub fn start_file(&mut self, index: usize, path: &Path, piece_count: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, piece_count);
        }
        self.update_bars();
    }

    /// Report how many pieces are on the grid
    pub fn update_placed(&mut self, file_index: usize, placed: usize) {
        if let Some(state) = self.file_states.get_mut(file_index) {
            state.1 = placed;
        }
        self.update_bars();
    }

    /// Mark a puzzle as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, placed: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = placed;
        }
        self.update_bars();
    }

    /// Observer feeding a file's bar from assembly placements
    pub const fn observer(&mut self, file_index: usize) -> FileProgress<'_> {
        FileProgress {
            manager: self,
            file_index,
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<&(String, usize, usize)> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, placed, pieces)) in visible_files.iter().copied().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(*pieces as u64);
                bar.set_position(*placed as u64);
                let max_width = pieces.to_string().len();
                bar.set_message(format!("{placed:>max_width$}/{pieces}"));
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar in self.file_bars.iter().skip(visible_files.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}

/// Assembly observer that advances one file's progress bar
pub struct FileProgress<'a> {
    manager: &'a mut ProgressManager,
    file_index: usize,
}

impl AssemblyObserver for FileProgress<'_> {
    fn on_placement(&mut self, _placement: &Placement, grid: &PuzzleGrid) -> ControlFlow<()> {
        self.manager.update_placed(self.file_index, grid.len());
        ControlFlow::Continue(())
    }
}
