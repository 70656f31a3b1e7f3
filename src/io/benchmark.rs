//! Repeated solves with timing statistics

use crate::algorithm::executor::{SolveConfig, SolveOutcome, SolveReport, Solver};
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Aggregate results over a benchmark run
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkSummary {
    /// Number of solves performed
    pub runs: usize,
    /// Solves that produced a layout
    pub solved: usize,
    /// Solves that proved no layout exists
    pub unsatisfiable: usize,
    /// Solves stopped by cancellation or a budget
    pub stopped: usize,
    /// Fastest solve in milliseconds
    pub min_ms: f64,
    /// Median solve time in milliseconds
    pub median_ms: f64,
    /// Mean solve time in milliseconds
    pub mean_ms: f64,
    /// Slowest solve in milliseconds
    pub max_ms: f64,
    /// Mean backtracks per solve
    pub mean_backtracks: f64,
    /// Most backtracks in a single solve
    pub max_backtracks: usize,
}

impl BenchmarkSummary {
    /// Summarise a set of solve reports
    pub fn from_reports(reports: &[SolveReport]) -> Self {
        let runs = reports.len();
        let mut durations: Vec<f64> = reports.iter().map(|r| r.metrics.duration_ms()).collect();
        durations.sort_by(f64::total_cmp);

        let count = |predicate: fn(&SolveOutcome) -> bool| {
            reports.iter().filter(|r| predicate(&r.outcome)).count()
        };
        let solved = count(|outcome| matches!(outcome, SolveOutcome::Solved(_)));
        let unsatisfiable = count(|outcome| matches!(outcome, SolveOutcome::Unsatisfiable));

        let mean = |values: &[f64]| {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        };
        let backtracks: Vec<f64> = reports
            .iter()
            .map(|r| r.metrics.backtracks as f64)
            .collect();

        Self {
            runs,
            solved,
            unsatisfiable,
            stopped: runs - solved - unsatisfiable,
            min_ms: durations.first().copied().unwrap_or(0.0),
            median_ms: median(&durations),
            mean_ms: mean(&durations),
            max_ms: durations.last().copied().unwrap_or(0.0),
            mean_backtracks: mean(&backtracks),
            max_backtracks: reports
                .iter()
                .map(|r| r.metrics.backtracks)
                .max()
                .unwrap_or(0),
        }
    }
}

// Expects sorted input
fn median(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    let upper = sorted.get(len / 2).copied().unwrap_or(0.0);
    if len % 2 == 1 {
        upper
    } else {
        let lower = sorted.get(len / 2 - 1).copied().unwrap_or(0.0);
        f64::midpoint(lower, upper)
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "runs: {} (solved {}, unsatisfiable {}, stopped {})",
            self.runs, self.solved, self.unsatisfiable, self.stopped
        )?;
        writeln!(
            f,
            "time ms: min {:.2}, median {:.2}, mean {:.2}, max {:.2}",
            self.min_ms, self.median_ms, self.mean_ms, self.max_ms
        )?;
        write!(
            f,
            "backtracks: mean {:.1}, max {}",
            self.mean_backtracks, self.max_backtracks
        )
    }
}

/// Solve `runs` grids and summarise them
///
/// `make_solver` receives the run index, so callers can reuse one solver or
/// generate a fresh catalog per run. `on_run` sees each report as it finishes.
///
/// # Errors
///
/// Returns an error if `runs` is zero or if building a solver or solving fails
pub fn run_benchmark(
    runs: usize,
    width: usize,
    height: usize,
    config: &SolveConfig,
    mut make_solver: impl FnMut(usize) -> Result<Solver>,
    mut on_run: impl FnMut(usize, &SolveReport),
) -> Result<BenchmarkSummary> {
    if runs == 0 {
        return Err(invalid_parameter("runs", &runs, &"must be positive"));
    }

    let mut reports = Vec::with_capacity(runs);
    for run in 0..runs {
        let solver = make_solver(run)?;
        let report = solver.solve(width, height, config)?;
        on_run(run, &report);
        reports.push(report);
    }

    let summary = BenchmarkSummary::from_reports(&reports);
    log::debug!("benchmark finished: {} of {runs} solved", summary.solved);
    Ok(summary)
}
