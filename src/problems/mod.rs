//! Puzzles to solve.
//!
//! The solvers only need the [`Puzzle`](crate::puzzle::Puzzle) interface.
//! These are ready-made puzzles to exercise them.

pub mod graph;
pub mod maze_2d;
pub mod word_ladder;
