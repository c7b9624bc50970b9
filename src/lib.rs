//! Solvers for the N×N sliding-tile puzzle (the 15-puzzle and its relatives).
//!
//! [`solve_optimal`] runs IDA* with Manhattan distance plus linear conflict
//! and returns a shortest path. [`solve_fast`] runs greedy best-first search
//! on Manhattan distance alone: much quicker, not optimal. Neither checks
//! solvability, so boards from outside should go through [`is_solvable`] first.

mod board;
mod error;
mod greedy;
mod heuristics;
mod ida;
mod solvability;
mod worker;

pub use board::{
    parse_board, Direction, Path, PuzzleState, BLANK, DIRECTIONS, MAX_HEX_CELLS, MAX_SIZE,
};
pub use error::{PuzzleError, WorkerError};
pub use greedy::{solve_fast, StepSolver};
pub use heuristics::{enhanced_heuristic, linear_conflict, manhattan_distance};
pub use ida::{solve_optimal, solve_optimal_with_stats, SearchStats};
pub use solvability::{inversion_count, is_solvable};
pub use worker::SolverWorker;
