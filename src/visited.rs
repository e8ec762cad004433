use rustc_hash::FxHashSet;

use crate::puzzle::Fingerprint;

/// Fingerprints already explored within one search.
///
/// Fingerprints are never removed. Callers may seed it with states that must
/// not show up in a solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visited<F: Fingerprint> {
    seen: FxHashSet<F>,
}

impl<F: Fingerprint> Visited<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn contains(&self, f: &F) -> bool {
        self.seen.contains(f)
    }

    /// Marks a fingerprint as visited.
    ///
    /// Returns whether it was new.
    #[inline(always)]
    pub fn insert(&mut self, f: F) -> bool {
        self.seen.insert(f)
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

}

impl<F: Fingerprint> Default for Visited<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fingerprint> FromIterator<F> for Visited<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            seen: FxHashSet::from_iter(iter),
        }
    }
}

impl<F: Fingerprint> Extend<F> for Visited<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        self.seen.extend(iter);
    }
}
