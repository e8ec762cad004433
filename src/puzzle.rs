use std::fmt::Debug;
use std::hash::Hash;

/// The identity of a puzzle state.
///
/// Two states with the same fingerprint are the same configuration, even if
/// they are distinct values.
pub trait Fingerprint: Clone + Debug + PartialEq + Eq + Hash {}
impl<T> Fingerprint for T where T: Clone + Debug + PartialEq + Eq + Hash {}

/// A full-information, deterministic puzzle state.
///
/// Solvers only read states. They ask whether a state is solved, whether it's
/// worth exploring, and which states are one move away.
pub trait Puzzle: Debug + Sized {
    type Fingerprint: Fingerprint;

    /// Whether this state is solved.
    fn is_goal(&self) -> bool;

    /// Whether this state must not be expanded any further.
    ///
    /// Puzzles can use this to reject unsolvable configurations or to bound
    /// the search depth. It's independent from [`Puzzle::is_goal`], a state
    /// may be neither solved nor pruned.
    fn should_prune(&self) -> bool {
        false
    }

    /// Canonical identity of this state.
    fn fingerprint(&self) -> Self::Fingerprint;

    /// States reachable with a single move.
    ///
    /// Must not include `self`. The order is the exploration preference.
    fn expand(&self) -> Vec<Self>;
}
