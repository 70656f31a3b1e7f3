//! Terminal progress display for solves and benchmark runs

use crate::algorithm::executor::{SearchObserver, SolveReport};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::spatial::GridState;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

// Redrawing on every assignment would dominate small solves
const SOLVE_REFRESH_INTERVAL: usize = 256;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Runs: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress bar tracking collapsed cells during one solve
///
/// Implements [`SearchObserver`]; pass it to
/// [`crate::algorithm::executor::Solver::solve_observed`].
pub struct SolveProgress {
    bar: ProgressBar,
    events: usize,
    backtracks: usize,
}

impl SolveProgress {
    /// Create a bar for a grid with `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(SOLVE_STYLE.clone());
        Self {
            bar,
            events: 0,
            backtracks: 0,
        }
    }

    /// Number of backtracks observed so far
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Clear the bar and show a final message
    pub fn finish(&self, report: &SolveReport) {
        self.bar.finish_with_message(format!(
            "{:.2} ms, {} backtracks",
            report.metrics.duration_ms(),
            report.metrics.backtracks
        ));
    }

    fn refresh(&mut self, grid: &GridState) {
        self.events += 1;
        if self.events % SOLVE_REFRESH_INTERVAL == 0 {
            self.bar.set_position(grid.collapsed_count() as u64);
            self.bar
                .set_message(format!("{} backtracks", self.backtracks));
        }
    }
}

impl SearchObserver for SolveProgress {
    fn on_choice(&mut self, _cell: usize, _variant: usize, grid: &GridState) {
        self.refresh(grid);
    }

    fn on_backtrack(&mut self, _cell: usize, _variant: usize, grid: &GridState) {
        self.backtracks += 1;
        self.refresh(grid);
    }
}

/// Progress bar over benchmark runs
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Create a bar for `runs` solves
    pub fn new(runs: usize) -> Self {
        let bar = ProgressBar::new(runs as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar }
    }

    /// Record a finished run
    pub fn complete_run(&self, report: &SolveReport) {
        self.bar.inc(1);
        self.bar
            .set_message(format!("last {:.2} ms", report.metrics.duration_ms()));
    }

    /// Clean up the display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
