use derive_more::Display;

use crate::path::SolutionPath;
use crate::puzzle::Puzzle;
use crate::stats::SearchStats;
use crate::visited::Visited;

/// How solvers treat states the puzzle asks to prune.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum PrunePolicy {
    /// Goal checks happen before prune checks.
    ///
    /// A pruned state that is also solved is still accepted as the end of a
    /// solution. Other pruned states are marked visited and never expanded.
    #[default]
    #[display("reference")]
    Reference,
    /// Pruned states never take part in a solution, solved or not.
    #[display("strict")]
    Strict,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub prune: PrunePolicy,
}

impl SolverConfig {
    #[must_use]
    pub fn with_prune(mut self, prune: PrunePolicy) -> Self {
        self.prune = prune;
        self
    }

    /// Whether `p` is accepted as the end of a solution, ignoring `visited`.
    #[inline(always)]
    pub(crate) fn accepts_goal<P: Puzzle>(&self, p: &P) -> bool {
        match self.prune {
            PrunePolicy::Reference => p.is_goal(),
            PrunePolicy::Strict => p.is_goal() && !p.should_prune(),
        }
    }
}

/// A search strategy for [`Puzzle`]s.
pub trait Solver<P: Puzzle> {
    /// Finds a path from `start` to a solved state.
    ///
    /// States in `visited` won't be part of the path, and every state explored
    /// is added to it. Returns an empty path when there's no solution.
    fn solve_with_visited(
        &mut self,
        start: P,
        visited: &mut Visited<P::Fingerprint>,
    ) -> SolutionPath<P>;

    /// Finds a path from `start` to a solved state.
    fn solve(&mut self, start: P) -> SolutionPath<P> {
        let mut visited = Visited::new();
        self.solve_with_visited(start, &mut visited)
    }

    fn config(&self) -> &SolverConfig;

    /// Stats of the last search.
    fn stats(&self) -> &SearchStats;

    fn print_stats(&self) -> std::io::Result<()> {
        self.stats()
            .write_stats(std::io::stdout().lock(), std::mem::size_of::<P>())
    }
}
