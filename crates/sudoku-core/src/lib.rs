//! Core Sudoku engine: an immutable 9x9 grid model with on-demand
//! constraint queries, and a solver combining naked-single propagation
//! with minimum-remaining-candidates backtracking.
//!
//! The solver is a pure function from a [`Grid`] to a solved `Grid` or
//! a defined no-solution outcome. All file and console handling lives
//! in the `sudoku-batch` binary crate.

mod grid;
mod solver;

pub use grid::{CandidateSet, Grid, Position, BOXES_PER_SIDE, BOX_SIZE, GRID_SIZE};
pub use solver::Solver;
