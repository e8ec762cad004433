use rustc_hash::FxHashSet;

use crate::puzzle::Puzzle;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A sequence of states from a start to a solved state.
///
/// Every state is one move away from the previous one. An empty path means no
/// solution was found.
#[derive(Debug, PartialEq, Eq)]
pub struct SolutionPath<P: Puzzle> {
    states: Vec<P>,
}

impl<P: Puzzle> SolutionPath<P> {
    #[inline(always)]
    pub fn empty() -> Self {
        Self { states: vec![] }
    }

    /// Wraps states already known to form a path.
    pub(crate) fn from_states(states: Vec<P>) -> Self {
        Self { states }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of states, including the start.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Number of moves taken.
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn end(&self) -> Option<&P> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.states.iter()
    }

    pub fn fingerprints(&self) -> Vec<P::Fingerprint> {
        self.states.iter().map(Puzzle::fingerprint).collect()
    }

    /// Checks the path ends in a goal and never repeats a state.
    ///
    /// Never expands any state. Empty paths are fine.
    pub fn is_consistent(&self) -> bool {
        let Some(end) = self.states.last() else {
            return true;
        };
        if !end.is_goal() {
            return false;
        }

        let mut seen = FxHashSet::default();
        self.states.iter().all(|s| seen.insert(s.fingerprint()))
    }

    /// Verifies this is a solution.
    ///
    /// - The last state is a goal.
    /// - Each state is an expansion of the previous one.
    /// - No state is repeated.
    ///
    /// Empty paths are fine.
    ///
    /// NOTE: Every state but the last one is expanded again, which is as
    /// expensive as the search steps that found them and is observable by
    /// puzzles that count their expansions.
    pub fn is_valid(&self) -> bool {
        if !self.is_consistent() {
            return false;
        }

        self.states.windows(2).all(|step| {
            let next = step[1].fingerprint();
            step[0].expand().iter().any(|s| s.fingerprint() == next)
        })
    }
}

impl<P: Puzzle> Default for SolutionPath<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: Puzzle> std::ops::Deref for SolutionPath<P> {
    type Target = [P];

    fn deref(&self) -> &Self::Target {
        &self.states
    }
}

impl<P: Puzzle> IntoIterator for SolutionPath<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<P: Puzzle> std::fmt::Display for SolutionPath<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.states.first(), self.states.last()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {:?}:{:?}:{:?})",
                    self.moves(),
                    start.fingerprint(),
                    self.states
                        .iter()
                        .skip(1)
                        .take(MAX_ELEMENTS_DISPLAYED)
                        .map(Puzzle::fingerprint)
                        .collect::<Vec<_>>(),
                    end.fingerprint()
                )
            }
            _ => write!(f, "Path()"),
        }
    }
}
