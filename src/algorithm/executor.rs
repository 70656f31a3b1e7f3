use crate::{
    algorithm::compatibility::{CompatibilityTable, ConnectorRule},
    algorithm::propagation::{PropagationResult, propagate},
    algorithm::selection::{order_candidates, select_cell},
    algorithm::trail::Trail,
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{Result, invalid_catalog, invalid_parameter},
    spatial::GridState,
    spatial::layout::SolvedGrid,
    spatial::tiles::TileCatalog,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Validated grid size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    width: usize,
    height: usize,
}

impl GridDimensions {
    /// Validate a grid size
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero or exceeds the maximum dimension
    pub fn new(width: usize, height: usize) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("exceeds maximum grid dimension {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self { width, height })
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.height
    }
}

/// Shared flag for cooperative cancellation
///
/// Clones observe the same flag, so a UI or worker thread can keep one clone
/// and hand another to the solve. The search checks it once per cell selection.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that running solves stop at their next step
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Optional limits on a single solve
#[derive(Clone, Debug, Default)]
pub struct SolveConfig {
    /// Stop with [`SolveOutcome::Timeout`] once more candidates than this were rejected
    pub max_backtracks: Option<usize>,
    /// Stop with [`SolveOutcome::Timeout`] once this much wall-clock time has passed
    pub time_budget: Option<Duration>,
    /// Stop with [`SolveOutcome::Cancelled`] once this token is cancelled
    pub cancellation: Option<CancellationToken>,
}

impl SolveConfig {
    /// Unbounded search
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of rejected candidates
    #[must_use]
    pub fn with_max_backtracks(mut self, max_backtracks: usize) -> Self {
        self.max_backtracks = Some(max_backtracks);
        self
    }

    /// Limit wall-clock time in milliseconds
    #[must_use]
    pub fn with_time_budget_ms(mut self, milliseconds: u64) -> Self {
        self.time_budget = Some(Duration::from_millis(milliseconds));
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Which configured budget ended a search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Budget {
    /// `max_backtracks` was exceeded
    Backtracks,
    /// `time_budget` elapsed
    Time,
}

/// Terminal state of a solve
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every cell was assigned consistently
    Solved(SolvedGrid),
    /// The whole search tree was exhausted; no layout exists
    Unsatisfiable,
    /// The cancellation token stopped the search
    Cancelled,
    /// A configured budget stopped the search; nothing was proven
    Timeout(Budget),
}

/// Counters collected during one solve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveMetrics {
    /// Number of rejected candidates
    pub backtracks: usize,
    /// Number of speculative assignments made
    pub assignments: usize,
    /// Number of cell selections (search steps)
    pub steps: usize,
    /// Deepest choice stack reached
    pub max_depth: usize,
    /// Wall-clock duration of the solve
    pub duration: Duration,
}

impl SolveMetrics {
    /// Solve duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Outcome and metrics of one solve
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    /// How the search ended
    pub outcome: SolveOutcome,
    /// Counters for the whole search
    pub metrics: SolveMetrics,
}

impl SolveReport {
    /// The solved grid, if the search succeeded
    pub const fn grid(&self) -> Option<&SolvedGrid> {
        match &self.outcome {
            SolveOutcome::Solved(grid) => Some(grid),
            _ => None,
        }
    }

    /// Whether the search succeeded
    pub const fn is_solved(&self) -> bool {
        matches!(self.outcome, SolveOutcome::Solved(_))
    }
}

/// Hooks into the search driver
///
/// All methods default to doing nothing. `on_choice` sees the grid just before
/// the assignment; `on_backtrack` sees it just after the rejected candidate was
/// undone, so the two states are equal when the trail is correct.
pub trait SearchObserver {
    /// A candidate is about to be assigned to `cell`
    fn on_choice(&mut self, _cell: usize, _variant: usize, _grid: &GridState) {}

    /// The candidate `variant` at `cell` was rejected and undone
    fn on_backtrack(&mut self, _cell: usize, _variant: usize, _grid: &GridState) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

// One choice point on the explicit search stack
#[derive(Debug)]
struct ChoiceFrame {
    cell: usize,
    candidates: Vec<usize>,
    next: usize,
}

impl ChoiceFrame {
    // Candidate currently assigned at this frame's cell
    fn current(&self) -> Option<usize> {
        self.next
            .checked_sub(1)
            .and_then(|index| self.candidates.get(index))
            .copied()
    }
}

/// Backtracking search over a tile catalog
///
/// Owns the catalog and a shared compatibility table. Each call to
/// [`Solver::solve`] builds its own grid and trail, so one solver can serve
/// concurrent solves from several threads.
#[derive(Clone, Debug)]
pub struct Solver {
    catalog: Arc<TileCatalog>,
    table: Arc<CompatibilityTable>,
}

impl Solver {
    /// Build a solver with exact connector matching
    ///
    /// # Errors
    ///
    /// Returns an error if the compatibility table cannot be built
    pub fn new(catalog: TileCatalog) -> Result<Self> {
        let table = CompatibilityTable::build(&catalog)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            table: Arc::new(table),
        })
    }

    /// Build a solver with a custom connector rule
    ///
    /// # Errors
    ///
    /// Returns an error if the rule fails validation against the catalog
    pub fn with_rule(catalog: TileCatalog, rule: &impl ConnectorRule) -> Result<Self> {
        let table = CompatibilityTable::build_with(&catalog, rule)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            table: Arc::new(table),
        })
    }

    /// Reuse an already built table
    ///
    /// # Errors
    ///
    /// Returns an error if the table was built for a different catalog size
    pub fn from_parts(catalog: Arc<TileCatalog>, table: Arc<CompatibilityTable>) -> Result<Self> {
        if table.variant_count() != catalog.variant_count() {
            return Err(invalid_catalog(&format!(
                "table covers {} variants but catalog has {}",
                table.variant_count(),
                catalog.variant_count()
            )));
        }
        Ok(Self { catalog, table })
    }

    /// The catalog being solved
    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// The compatibility table used for propagation
    pub fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Solve a grid of the given size
    ///
    /// # Errors
    ///
    /// Returns an error for invalid dimensions or if the search breaks a grid
    /// invariant. Unsatisfiable, cancelled and timed-out searches are reported
    /// through [`SolveOutcome`], not as errors.
    pub fn solve(&self, width: usize, height: usize, config: &SolveConfig) -> Result<SolveReport> {
        self.solve_observed(width, height, config, &mut NoopObserver)
    }

    /// Solve while reporting choices and backtracks to an observer
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`]
    pub fn solve_observed(
        &self,
        width: usize,
        height: usize,
        config: &SolveConfig,
        observer: &mut impl SearchObserver,
    ) -> Result<SolveReport> {
        let dimensions = GridDimensions::new(width, height)?;
        let start = Instant::now();
        let mut grid = GridState::new(
            dimensions.width(),
            dimensions.height(),
            self.table.variant_count(),
        );
        let mut trail = Trail::new();
        let mut frames: Vec<ChoiceFrame> = Vec::new();
        let mut metrics = SolveMetrics::default();

        log::debug!(
            "solving {width}x{height} grid with {} variants",
            self.table.variant_count()
        );

        let outcome = 'search: loop {
            let Some(cell) = select_cell(&grid) else {
                break SolveOutcome::Solved(SolvedGrid::from_grid(&grid, &self.catalog)?);
            };
            metrics.steps += 1;
            if let Some(stop) = Self::check_interrupt(config, start) {
                break stop;
            }

            let candidates = order_candidates(&grid, &self.table, cell);
            trail.checkpoint();
            frames.push(ChoiceFrame {
                cell,
                candidates,
                next: 0,
            });
            metrics.max_depth = metrics.max_depth.max(frames.len());

            // Try candidates at the top frame, unwinding exhausted frames
            loop {
                let Some(frame) = frames.last_mut() else {
                    break 'search SolveOutcome::Unsatisfiable;
                };
                let cell = frame.cell;

                let Some(variant) = frame.candidates.get(frame.next).copied() else {
                    frames.pop();
                    trail.pop_frame();
                    let Some(parent) = frames.last() else {
                        continue;
                    };
                    // The parent's current candidate has no completion below it
                    let (parent_cell, parent_variant) =
                        (parent.cell, parent.current().unwrap_or_default());
                    trail.undo_frame(&mut grid);
                    metrics.backtracks += 1;
                    observer.on_backtrack(parent_cell, parent_variant, &grid);
                    if Self::backtracks_exhausted(config, &metrics) {
                        break 'search SolveOutcome::Timeout(Budget::Backtracks);
                    }
                    continue;
                };
                frame.next += 1;

                observer.on_choice(cell, variant, &grid);
                grid.assign(cell, variant, &mut trail)?;
                metrics.assignments += 1;

                match propagate(&mut grid, &self.table, &mut trail, cell)? {
                    PropagationResult::Consistent { .. } => continue 'search,
                    PropagationResult::Conflict { .. } => {
                        trail.undo_frame(&mut grid);
                        metrics.backtracks += 1;
                        observer.on_backtrack(cell, variant, &grid);
                        if Self::backtracks_exhausted(config, &metrics) {
                            break 'search SolveOutcome::Timeout(Budget::Backtracks);
                        }
                    }
                }
            }
        };

        metrics.duration = start.elapsed();
        Self::log_outcome(&outcome, &metrics);

        Ok(SolveReport { outcome, metrics })
    }

    // Cancellation first, then the time budget
    fn check_interrupt(config: &SolveConfig, start: Instant) -> Option<SolveOutcome> {
        if config
            .cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
        {
            return Some(SolveOutcome::Cancelled);
        }
        if config
            .time_budget
            .is_some_and(|budget| start.elapsed() >= budget)
        {
            return Some(SolveOutcome::Timeout(Budget::Time));
        }
        None
    }

    fn backtracks_exhausted(config: &SolveConfig, metrics: &SolveMetrics) -> bool {
        config
            .max_backtracks
            .is_some_and(|max| metrics.backtracks > max)
    }

    fn log_outcome(outcome: &SolveOutcome, metrics: &SolveMetrics) {
        match outcome {
            SolveOutcome::Solved(_) => log::info!(
                "solved in {:.2} ms with {} backtracks",
                metrics.duration_ms(),
                metrics.backtracks
            ),
            SolveOutcome::Unsatisfiable => log::info!(
                "no layout exists; search exhausted after {} backtracks",
                metrics.backtracks
            ),
            SolveOutcome::Cancelled => log::info!(
                "solve cancelled after {} steps",
                metrics.steps
            ),
            SolveOutcome::Timeout(budget) => log::warn!(
                "solve stopped by {budget:?} budget after {} backtracks",
                metrics.backtracks
            ),
        }
    }
}

/// Build a solver for `catalog` and solve one grid with exact connector matching
///
/// # Errors
///
/// Returns an error for a malformed catalog or invalid dimensions
pub fn solve(
    catalog: TileCatalog,
    width: usize,
    height: usize,
    config: &SolveConfig,
) -> Result<SolveReport> {
    Solver::new(catalog)?.solve(width, height, config)
}
