//! Command-line interface for solving, benchmarking and exporting catalogs

use crate::algorithm::executor::{SolveConfig, SolveOutcome, SolveReport, Solver};
use crate::algorithm::verification::find_violations;
use crate::io::benchmark::run_benchmark;
use crate::io::catalog::{CatalogFile, LayoutFile, RuleSpec};
use crate::io::configuration::{
    DEFAULT_BENCHMARK_LABELS, DEFAULT_BENCHMARK_RUNS, DEFAULT_BENCHMARK_TILES, DEFAULT_HEIGHT,
    DEFAULT_SEED, DEFAULT_WIDTH, OUTPUT_SUFFIX, PREVIEW_CELL_PIXELS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_layout_as_png;
use crate::io::presets::{preset_catalog, random_catalog};
use crate::io::progress::{BatchProgress, SolveProgress};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tileforge")]
#[command(
    author,
    version,
    about = "Solve tile adjacency layouts with backtracking wave function collapse"
)]
/// Command-line arguments for the layout solver
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Solve one grid and write the layout as JSON (and optionally PNG)
    Solve(SolveArgs),
    /// Time repeated solves
    Benchmark(BenchmarkArgs),
    /// Write a built-in catalog to a JSON file
    ExportPreset {
        /// Preset name (terrain, single)
        name: String,
        /// Destination JSON file
        output: PathBuf,
    },
}

/// Where the tile catalog comes from
#[derive(Args, Clone)]
pub struct CatalogSource {
    /// Catalog JSON file
    #[arg(short, long, conflicts_with = "preset")]
    pub catalog: Option<PathBuf>,

    /// Built-in catalog name (terrain, single)
    #[arg(short, long, default_value = "terrain")]
    pub preset: String,
}

impl CatalogSource {
    /// Build a solver from the file or preset
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or validated
    pub fn solver(&self) -> Result<Solver> {
        match &self.catalog {
            Some(path) => CatalogFile::load(path)?.to_solver(),
            None => Solver::new(preset_catalog(&self.preset)?),
        }
    }

    /// Stem used to name output files
    pub fn stem(&self) -> String {
        self.catalog
            .as_ref()
            .and_then(|path| path.file_stem())
            .map_or_else(
                || self.preset.clone(),
                |stem| stem.to_string_lossy().to_string(),
            )
    }
}

/// Budgets shared by solve and benchmark
#[derive(Args, Clone, Default)]
pub struct BudgetArgs {
    /// Give up after this many rejected candidates
    #[arg(long)]
    pub max_backtracks: Option<usize>,

    /// Give up after this many milliseconds
    #[arg(long)]
    pub time_budget_ms: Option<u64>,
}

impl BudgetArgs {
    /// Solve configuration for these budgets
    pub fn config(&self) -> SolveConfig {
        let mut config = SolveConfig::new();
        if let Some(max) = self.max_backtracks {
            config = config.with_max_backtracks(max);
        }
        if let Some(ms) = self.time_budget_ms {
            config = config.with_time_budget_ms(ms);
        }
        config
    }
}

/// Arguments of `solve`
#[derive(Args, Clone)]
pub struct SolveArgs {
    /// Catalog selection
    #[command(flatten)]
    pub source: CatalogSource,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Search budgets
    #[command(flatten)]
    pub budget: BudgetArgs,

    /// Layout JSON destination (defaults to <catalog>_layout.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render a PNG preview to this path
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Preview pixels per cell
    #[arg(long, default_value_t = PREVIEW_CELL_PIXELS)]
    pub cell_pixels: u32,
}

impl SolveArgs {
    /// Destination of the layout JSON
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let name = format!("{}{OUTPUT_SUFFIX}.json", self.source.stem());
            match self.source.catalog.as_deref().and_then(Path::parent) {
                Some(parent) => parent.join(name),
                None => PathBuf::from(name),
            }
        })
    }
}

/// Arguments of `benchmark`
#[derive(Args, Clone)]
pub struct BenchmarkArgs {
    /// Catalog selection
    #[command(flatten)]
    pub source: CatalogSource,

    /// Generate a random catalog per run instead of using the selected one
    #[arg(short, long)]
    pub random: bool,

    /// Seed for the first generated catalog (incremented per run)
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Tile types per generated catalog
    #[arg(long, default_value_t = DEFAULT_BENCHMARK_TILES)]
    pub tiles: usize,

    /// Distinct connector labels per generated catalog
    #[arg(long, default_value_t = DEFAULT_BENCHMARK_LABELS)]
    pub labels: usize,

    /// Number of solves
    #[arg(short = 'n', long, default_value_t = DEFAULT_BENCHMARK_RUNS)]
    pub runs: usize,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Search budgets
    #[command(flatten)]
    pub budget: BudgetArgs,
}

/// Executes the parsed command
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if catalog loading, solving or writing outputs fails.
    /// An unsatisfiable or interrupted solve is reported, not treated as an error.
    pub fn run(&self) -> Result<()> {
        let show_progress = self.cli.should_show_progress();
        match &self.cli.command {
            Command::Solve(args) => Self::solve(args, show_progress),
            Command::Benchmark(args) => Self::benchmark(args, show_progress),
            Command::ExportPreset { name, output } => {
                let catalog = preset_catalog(name)?;
                CatalogFile::from_catalog(&catalog, RuleSpec::Exact).save(output)
            }
        }
    }

    // Allow print for user-facing solve results
    #[allow(clippy::print_stdout)]
    fn solve(args: &SolveArgs, show_progress: bool) -> Result<()> {
        let solver = args.source.solver()?;
        let config = args.budget.config();

        let report = if show_progress {
            let mut progress = SolveProgress::new(args.width.saturating_mul(args.height));
            let report = solver.solve_observed(args.width, args.height, &config, &mut progress)?;
            progress.finish(&report);
            report
        } else {
            solver.solve(args.width, args.height, &config)?
        };

        match &report.outcome {
            SolveOutcome::Solved(grid) => {
                let violations = find_violations(grid, solver.catalog(), solver.table());
                if !violations.is_empty() {
                    return Err(invalid_parameter(
                        "layout",
                        &violations.len(),
                        &"solved layout breaks adjacency constraints",
                    ));
                }

                let output = args.output_path();
                LayoutFile::new(grid.clone(), &report.metrics).save(&output)?;
                if let Some(png) = &args.png {
                    export_layout_as_png(grid, solver.catalog(), args.cell_pixels, png)?;
                }
                println!(
                    "Solved {}x{} in {:.2} ms ({} backtracks) -> {}",
                    args.width,
                    args.height,
                    report.metrics.duration_ms(),
                    report.metrics.backtracks,
                    output.display()
                );
            }
            outcome => println!("{}", Self::describe_failure(outcome, &report)),
        }
        Ok(())
    }

    fn describe_failure(outcome: &SolveOutcome, report: &SolveReport) -> String {
        match outcome {
            SolveOutcome::Unsatisfiable => format!(
                "No layout exists for this catalog and grid ({} backtracks)",
                report.metrics.backtracks
            ),
            SolveOutcome::Cancelled => "Solve cancelled".to_string(),
            SolveOutcome::Timeout(budget) => format!(
                "Stopped by {budget:?} budget after {:.2} ms; satisfiability unknown",
                report.metrics.duration_ms()
            ),
            SolveOutcome::Solved(_) => "Solved".to_string(),
        }
    }

    // Allow print for user-facing benchmark summary
    #[allow(clippy::print_stdout)]
    fn benchmark(args: &BenchmarkArgs, show_progress: bool) -> Result<()> {
        let config = args.budget.config();
        let progress = show_progress.then(|| BatchProgress::new(args.runs));

        let shared = if args.random {
            None
        } else {
            Some(args.source.solver()?)
        };
        let make_solver = |run: usize| -> Result<Solver> {
            match &shared {
                Some(solver) => Ok(solver.clone()),
                None => Solver::new(random_catalog(
                    args.seed.wrapping_add(run as u64),
                    args.tiles,
                    args.labels,
                )?),
            }
        };
        let on_run = |_run: usize, report: &SolveReport| {
            if let Some(progress) = &progress {
                progress.complete_run(report);
            }
        };

        let summary = run_benchmark(
            args.runs,
            args.width,
            args.height,
            &config,
            make_solver,
            on_run,
        )?;

        if let Some(progress) = &progress {
            progress.finish();
        }
        println!("{summary}");
        Ok(())
    }
}
