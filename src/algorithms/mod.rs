//! Implementation of search algorithms.
//!
//! These algorithms can solve any [`Puzzle`](crate::puzzle::Puzzle) and share
//! the [`Solver`](crate::solver::Solver) interface.

pub mod bfs;
pub mod dfs;
