//! Tests for the search driver, its budgets and its outcome reporting

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tileforge::ForgeError;
    use tileforge::algorithm::compatibility::{CompatibilityTable, OverlapMatch};
    use tileforge::algorithm::executor::{
        Budget, CancellationToken, GridDimensions, SolveConfig, SolveOutcome, Solver, solve,
    };
    use tileforge::spatial::tiles::{EdgeLabels, TileCatalog, TileType};

    fn single_tile() -> TileCatalog {
        TileCatalog::new(vec![TileType::symmetric(0, "a")]).unwrap()
    }

    // One tile whose four edges are all different; no two copies can touch
    fn distinct_edges() -> TileCatalog {
        TileCatalog::new(vec![TileType::new(
            0,
            vec![EdgeLabels::new("a", "b", "c", "d")],
        )])
        .unwrap()
    }

    // Tests grid dimensions must be positive and bounded
    #[test]
    fn test_grid_dimensions_validation() {
        let dims = GridDimensions::new(4, 3).unwrap();
        assert_eq!((dims.width(), dims.height()), (4, 3));

        assert!(matches!(
            GridDimensions::new(0, 3),
            Err(ForgeError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
        assert!(matches!(
            GridDimensions::new(3, 10_001),
            Err(ForgeError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    // Tests a single self-compatible tile fills the grid without backtracking
    #[test]
    fn test_solve_single_tile() {
        let report = solve(single_tile(), 3, 2, &SolveConfig::new()).unwrap();
        let grid = report.grid().unwrap();

        assert_eq!(grid.cells().len(), 6);
        assert!(grid.cells().iter().all(|cell| cell.tile_id == 0 && cell.rotation == 0));
        assert_eq!(report.metrics.backtracks, 0);
        assert_eq!(report.metrics.assignments, 6);
        assert_eq!(report.metrics.steps, 6);
    }

    // Tests exhausting the search reports unsatisfiable with the rejected count
    // Verified by reporting Solved when the root frame is exhausted
    #[test]
    fn test_unsatisfiable_pair() {
        let report = solve(distinct_edges(), 2, 1, &SolveConfig::new()).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Unsatisfiable);
        assert_eq!(report.metrics.backtracks, 1);
        assert!(report.grid().is_none());

        // A lone cell has no neighbours to conflict with
        assert!(solve(distinct_edges(), 1, 1, &SolveConfig::new())
            .unwrap()
            .is_solved());
    }

    // Tests the backtrack budget stops with a timeout, not unsatisfiable
    #[test]
    fn test_backtrack_budget() {
        let config = SolveConfig::new().with_max_backtracks(0);
        let report = solve(distinct_edges(), 2, 1, &config).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Timeout(Budget::Backtracks));

        // The budget is only exceeded when the count goes past it
        let config = SolveConfig::new().with_max_backtracks(1);
        let report = solve(distinct_edges(), 2, 1, &config).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Unsatisfiable);
    }

    // Tests a cancelled token stops the search before any assignment
    #[test]
    fn test_cancellation() {
        let token = CancellationToken::new();
        let config = SolveConfig::new().with_cancellation(token.clone());
        token.cancel();

        let report = solve(single_tile(), 4, 4, &config).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Cancelled);
        assert_eq!(report.metrics.assignments, 0);
    }

    // Tests an elapsed time budget reports a timeout
    #[test]
    fn test_time_budget() {
        let config = SolveConfig::new().with_time_budget_ms(0);
        let report = solve(single_tile(), 4, 4, &config).unwrap();
        assert_eq!(report.outcome, SolveOutcome::Timeout(Budget::Time));
    }

    // Tests invalid dimensions are errors rather than outcomes
    #[test]
    fn test_invalid_dimensions_error() {
        let solver = Solver::new(single_tile()).unwrap();
        let err = solver.solve(0, 5, &SolveConfig::new()).unwrap_err();
        assert!(err.is_config_error());
    }

    // Tests a shared table must match the catalog it is paired with
    #[test]
    fn test_from_parts_checks_sizes() {
        let catalog = Arc::new(single_tile());
        let other = distinct_edges();
        let table = Arc::new(CompatibilityTable::build(&catalog).unwrap());
        assert!(Solver::from_parts(Arc::clone(&catalog), Arc::clone(&table)).is_ok());

        let wide = TileCatalog::new(vec![TileType::with_turns(
            1,
            &EdgeLabels::new("a", "b", "c", "d"),
            &[0, 1],
        )])
        .unwrap();
        let wide_table = Arc::new(CompatibilityTable::build(&wide).unwrap());
        assert!(Solver::from_parts(Arc::new(other), wide_table).is_err());
    }

    // Tests a custom connector rule changes what can be solved
    #[test]
    fn test_custom_rule() {
        let catalog = TileCatalog::new(vec![TileType::new(
            0,
            vec![EdgeLabels::new("n", "x|y", "n", "y|z")],
        )])
        .unwrap();
        let config = SolveConfig::new();

        let exact = Solver::new(catalog.clone()).unwrap();
        assert_eq!(
            exact.solve(2, 1, &config).unwrap().outcome,
            SolveOutcome::Unsatisfiable
        );

        let overlap = Solver::with_rule(catalog, &OverlapMatch).unwrap();
        assert!(overlap.solve(2, 1, &config).unwrap().is_solved());
    }
}
