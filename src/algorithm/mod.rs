/// Fixed-size bitsets for domains and compatibility rows
pub mod bitset;
/// Connector rules and the precomputed compatibility table
pub mod compatibility;
/// Search driver with explicit choice stack and solve configuration
pub mod executor;
/// Neighbour domain pruning after a collapse
pub mod propagation;
/// Minimum remaining values and least constraining value heuristics
pub mod selection;
/// Undo log for exact backtracking
pub mod trail;
/// Adjacency checks for finished layouts
pub mod verification;
