//! Depth-first search.

use std::marker::PhantomData;

use crate::path::SolutionPath;
use crate::puzzle::Puzzle;
use crate::solver::PrunePolicy;
use crate::solver::Solver;
use crate::solver::SolverConfig;
use crate::stats::SearchStats;
use crate::visited::Visited;

/// A state on the current branch and the successors not tried yet.
#[derive(Debug)]
struct DfsFrame<P: Puzzle> {
    state: P,
    successors: std::vec::IntoIter<P>,
}

/// What happened when a state was reached.
enum Reach<P: Puzzle> {
    /// A solved state, ending the search.
    Goal(P),
    /// A new state to explore.
    Open(DfsFrame<P>),
    /// A state that must not be explored.
    Refused,
}

/// Depth-first search.
///
/// Tries successors in the order the puzzle produces them, backtracking when
/// a branch runs out. Every fingerprint is explored at most once across all
/// branches, which bounds the work on finite puzzles.
///
/// Branches are kept on an explicit stack, so deep puzzles don't exhaust the
/// call stack.
#[derive(Debug)]
pub struct DfsSolver<P: Puzzle> {
    config: SolverConfig,
    stats: SearchStats,

    _phantom_puzzle: PhantomData<P>,
}

impl<P: Puzzle> DfsSolver<P> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            _phantom_puzzle: PhantomData,
        }
    }

    /// Decides what to do with a newly reached state.
    fn reach(&mut self, state: P, visited: &mut Visited<P::Fingerprint>) -> Reach<P> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("ReachState");

        let fingerprint = state.fingerprint();

        if self.config.prune == PrunePolicy::Strict && state.should_prune() {
            self.stats.pruned += 1;
            visited.insert(fingerprint);
            return Reach::Refused;
        }
        if state.is_goal() && !visited.contains(&fingerprint) {
            return Reach::Goal(state);
        }
        // NOTE: Pruned states are only poisoned here, the visited check below
        // is what refuses them.
        if state.should_prune() {
            self.stats.pruned += 1;
            visited.insert(fingerprint.clone());
        } else if visited.contains(&fingerprint) {
            self.stats.skipped += 1;
        }
        if !visited.insert(fingerprint) {
            return Reach::Refused;
        }

        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");
        let mut successors = state.expand();
        self.stats.expanded += 1;
        let generated = successors.len();
        successors.retain(|s| !visited.contains(&s.fingerprint()));
        self.stats.generated += generated;
        self.stats.skipped += generated - successors.len();

        Reach::Open(DfsFrame {
            state,
            successors: successors.into_iter(),
        })
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify_path(&self, _path: &SolutionPath<P>, _visited: &Visited<P::Fingerprint>) {
        // All good... (hopefully)
    }
    /// Checks the path without expanding its states again.
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify_path(&self, path: &SolutionPath<P>, visited: &Visited<P::Fingerprint>) {
        debug_assert!(path.is_consistent(), "DFS produced an invalid path: {path}");
        // Only the goal may have skipped expansion.
        debug_assert!(
            path.iter()
                .rev()
                .skip(1)
                .all(|s| visited.contains(&s.fingerprint())),
            "DFS returned unexpanded states: {path}"
        );
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<P: Puzzle> Default for DfsSolver<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Puzzle> Solver<P> for DfsSolver<P> {
    fn solve_with_visited(
        &mut self,
        start: P,
        visited: &mut Visited<P::Fingerprint>,
    ) -> SolutionPath<P> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("DfsSolve");

        log::debug!(
            "DFS from {:?} ({} visited)",
            start.fingerprint(),
            visited.len()
        );
        self.stats = SearchStats::default();

        let mut branch: Vec<DfsFrame<P>> = Vec::new();
        let mut next = Some(start);
        loop {
            if let Some(state) = next.take() {
                match self.reach(state, visited) {
                    Reach::Goal(goal) => {
                        debug_assert!(goal.is_goal() && !visited.contains(&goal.fingerprint()));
                        self.stats.visited = visited.len();

                        let states: Vec<P> = branch
                            .into_iter()
                            .map(|frame| frame.state)
                            .chain(std::iter::once(goal))
                            .collect();
                        let path = SolutionPath::from_states(states);
                        log::debug!("DFS found {path}");
                        self.verify_path(&path, visited);
                        return path;
                    }
                    Reach::Open(frame) => {
                        branch.push(frame);
                        self.stats.observe_frontier(branch.len());
                    }
                    Reach::Refused => {}
                }
            }

            // Backtrack until some branch still has successors to try.
            let Some(frame) = branch.last_mut() else {
                break;
            };
            match frame.successors.next() {
                Some(successor) => next = Some(successor),
                None => {
                    log::trace!("DFS backtracks from {:?}", frame.state.fingerprint());
                    branch.pop();
                }
            }
        }

        self.stats.visited = visited.len();
        log::debug!("DFS exhausted {} states", self.stats.expanded);
        SolutionPath::empty()
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
