//! Multi-source progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use tracing::debug;

/// Display state of one source: label, frames written, frames expected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceProgress {
    /// Label shown next to the bar
    pub label: String,
    /// Frames written so far
    pub written: usize,
    /// Frames the source will produce
    pub total: usize,
}

/// Coordinates progress display for batch reshuffles
///
/// Shows one bar per source for small batches, keeping the most recent
/// sources visible, and adds a batch bar once the source count grows large.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    source_bars: Vec<ProgressBar>,
    sources: Vec<SourceProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FRAME_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Sources: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            source_bars: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Create bars for a batch of `source_count` sources
    pub fn initialize(&mut self, source_count: usize) {
        if source_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(source_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..source_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let pb = ProgressBar::new(0);
            pb.set_style(FRAME_STYLE.clone());
            self.source_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a source that will write `total_frames` frames
    pub fn start_source(&mut self, index: usize, label: &str, total_frames: usize) {
        if index >= self.sources.len() {
            self.sources.resize(index + 1, SourceProgress::default());
        }
        if let Some(state) = self.sources.get_mut(index) {
            *state = SourceProgress {
                label: label.to_string(),
                written: 0,
                total: total_frames,
            };
        }
        self.update_bars();
    }

    /// Report how many frames of a source have been written
    pub fn update_frames(&mut self, index: usize, written: usize) {
        if let Some(state) = self.sources.get_mut(index) {
            state.written = written.min(state.total);
        }
        self.update_bars();
    }

    /// Mark a source as completed and advance the batch bar
    pub fn complete_source(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.sources.get_mut(index) {
            state.label = format!("✓ {}", state.label);
            state.written = state.total;
        }
        self.update_bars();
    }

    /// Sources registered so far, in registration order
    pub fn sources(&self) -> &[SourceProgress] {
        &self.sources
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All sources processed");
        }
        if let Err(e) = self.multi_progress.clear() {
            debug!(error = %e, "Failed to clear progress bars");
        }
    }

    // Rolling window over the most recently started sources
    fn update_bars(&self) {
        let active: Vec<&SourceProgress> = self
            .sources
            .iter()
            .filter(|state| !state.label.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, state) in self.source_bars.iter().zip(visible) {
            bar.set_length(state.total as u64);
            bar.set_position(state.written as u64);
            let width = state.total.to_string().len();
            bar.set_message(format!("{:>width$}/{}", state.written, state.total));
            bar.set_prefix(state.label.clone());
        }

        for bar in self.source_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
