use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod debug;
pub mod stats;

// Search space and puzzles
// ------------------------
pub mod path;
pub mod puzzle;
pub mod search;
pub mod solver;
pub mod visited;

// Puzzles
// -------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
