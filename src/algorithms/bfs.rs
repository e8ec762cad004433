//! Breadth-first search.

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::path::SolutionPath;
use crate::puzzle::Puzzle;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::solver::Solver;
use crate::solver::SolverConfig;
use crate::stats::SearchStats;
use crate::visited::Visited;

/// Breadth-first search.
///
/// Explores states in order of the number of moves needed to reach them, so
/// the solution found uses as few moves as possible. Among equally short
/// solutions, the one reached through earlier successors wins.
///
/// The frontier holds search tree leaves, each standing for the path that
/// leads to it.
#[derive(Debug)]
pub struct BfsSolver<P: Puzzle> {
    config: SolverConfig,
    stats: SearchStats,

    _phantom_puzzle: PhantomData<P>,
}

impl<P: Puzzle> BfsSolver<P> {
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

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Expands the node at `index`, queueing its unvisited successors.
    fn expand(
        &mut self,
        tree: &mut SearchTree<P>,
        frontier: &mut VecDeque<SearchTreeIndex>,
        index: SearchTreeIndex,
        visited: &mut Visited<P::Fingerprint>,
    ) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        let state = tree[index].state();
        visited.insert(state.fingerprint());
        let successors = state.expand();
        self.stats.expanded += 1;
        self.stats.generated += successors.len();

        for successor in successors {
            if visited.contains(&successor.fingerprint()) {
                self.stats.skipped += 1;
                continue;
            }
            let child = tree.push(SearchTreeNode::new(successor, Some(index)));
            frontier.push_back(child);
        }
        self.stats.observe_frontier(frontier.len());
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
        debug_assert!(path.is_consistent(), "BFS produced an invalid path: {path}");
        // Only the goal may have skipped expansion.
        debug_assert!(
            path.iter()
                .rev()
                .skip(1)
                .all(|s| visited.contains(&s.fingerprint())),
            "BFS returned unexpanded states: {path}"
        );
    }
}

impl<P: Puzzle> Default for BfsSolver<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Puzzle> Solver<P> for BfsSolver<P> {
    fn solve_with_visited(
        &mut self,
        start: P,
        visited: &mut Visited<P::Fingerprint>,
    ) -> SolutionPath<P> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("BfsSolve");

        self.stats = SearchStats::default();
        if visited.contains(&start.fingerprint()) {
            log::debug!("BFS start {:?} was already visited", start.fingerprint());
            self.stats.skipped += 1;
            self.stats.visited = visited.len();
            return SolutionPath::empty();
        }
        log::debug!(
            "BFS from {:?} ({} visited)",
            start.fingerprint(),
            visited.len()
        );

        let mut tree = SearchTree::<P>::new();
        let mut frontier = VecDeque::<SearchTreeIndex>::new();
        frontier.push_back(tree.push(SearchTreeNode::new(start, None)));
        self.stats.observe_frontier(frontier.len());

        while let Some(&head) = frontier.front() {
            let state = tree[head].state();
            if self.config.accepts_goal(state) {
                break;
            }
            frontier.pop_front();

            if visited.contains(&state.fingerprint()) {
                self.stats.skipped += 1;
            } else if state.should_prune() {
                self.stats.pruned += 1;
            } else {
                self.expand(&mut tree, &mut frontier, head, visited);
            }
        }
        self.stats.visited = visited.len();

        let Some(&head) = frontier.front() else {
            log::debug!("BFS exhausted {} states", self.stats.expanded);
            return SolutionPath::empty();
        };
        // A lone start can only be returned if it wasn't visited meanwhile.
        let node = &tree[head];
        if node.is_root() && visited.contains(&node.state().fingerprint()) {
            return SolutionPath::empty();
        }

        log::trace!("BFS search tree: {tree:?}");
        let path = tree.into_path(head);
        log::debug!("BFS found {path}");
        self.verify_path(&path, visited);
        path
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problems::graph::Graph;
    use crate::problems::graph::GraphPuzzle;
    use crate::solver::PrunePolicy;

    fn graph(s: &str, start: &str) -> GraphPuzzle {
        Graph::try_from(s).unwrap().start(start)
    }

    #[test]
    fn goal_start() {
        let start = graph("goal: a", "a");
        let mut bfs = BfsSolver::new();
        let path = bfs.solve(start);
        assert_eq!(path.fingerprints(), vec!["a"]);
        assert_eq!(bfs.stats().expanded, 0);
    }

    #[test]
    fn finds_shortest_path() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> d
                c -> g
                d -> g
                goal: g
            "},
            "a",
        );
        let path = BfsSolver::new().solve(start);
        assert_eq!(path.fingerprints(), vec!["a", "c", "g"]);
        assert!(path.is_valid());
    }

    #[test]
    fn ties_follow_expansion_order() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> h
                c -> g
                goal: g h
            "},
            "a",
        );
        let path = BfsSolver::new().solve(start);
        assert_eq!(path.fingerprints(), vec!["a", "b", "h"]);
    }

    #[test]
    fn expands_each_state_once() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> d
                c -> d
                d -> e
                e -> a
            "},
            "a",
        );
        let mut bfs = BfsSolver::new();
        let path = bfs.solve(start.clone());
        assert!(path.is_empty());
        for node in ["a", "b", "c", "d", "e"] {
            assert_eq!(start.graph().expansions(node), 1, "{node}");
        }
        // `d` is queued twice, but only expanded once.
        assert_eq!(bfs.stats().expanded, 5);
        assert_eq!(bfs.stats().visited, 5);
    }

    #[test]
    fn solving_expands_path_states_once() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> d
                c -> d
                d -> g
                goal: g
            "},
            "a",
        );
        let path = BfsSolver::new().solve(start.clone());
        assert_eq!(path.fingerprints(), vec!["a", "b", "d", "g"]);
        for node in ["a", "b", "c", "d"] {
            assert_eq!(start.graph().expansions(node), 1, "{node}");
        }
        assert_eq!(start.graph().expansions("g"), 0);
    }

    #[test]
    fn pruned_states_are_discarded() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> g
                c -> x
                x -> g
                goal: g
                prune: b
            "},
            "a",
        );
        let mut bfs = BfsSolver::new();
        let path = bfs.solve(start.clone());
        assert_eq!(path.fingerprints(), vec!["a", "c", "x", "g"]);
        assert_eq!(start.graph().expansions("b"), 0);
        assert_eq!(bfs.stats().pruned, 1);
    }

    #[test]
    fn prune_policy_on_pruned_goal() {
        let text = indoc! {"
            a -> g b
            b -> h
            goal: g h
            prune: g
        "};

        let path = BfsSolver::new().solve(graph(text, "a"));
        assert_eq!(path.fingerprints(), vec!["a", "g"]);

        let strict = SolverConfig::default().with_prune(PrunePolicy::Strict);
        let path = BfsSolver::with_config(strict).solve(graph(text, "a"));
        assert_eq!(path.fingerprints(), vec!["a", "b", "h"]);
    }

    #[test]
    fn seeded_start_is_refused() {
        let start = graph("a -> g\ngoal: g", "a");
        let mut visited: Visited<String> = ["a".to_string()].into_iter().collect();
        let path = BfsSolver::new().solve_with_visited(start, &mut visited);
        assert!(path.is_empty());
    }

    #[test]
    fn seeded_states_are_avoided() {
        let start = graph(
            indoc! {"
                a -> b c
                b -> g
                c -> x
                x -> g
                goal: g
            "},
            "a",
        );
        let mut visited: Visited<String> = ["b".to_string()].into_iter().collect();
        let path = BfsSolver::new().solve_with_visited(start, &mut visited);
        assert_eq!(path.fingerprints(), vec!["a", "c", "x", "g"]);
    }
}
