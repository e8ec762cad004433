use std::fmt::Debug;

use crate::path::SolutionPath;
use crate::puzzle::Puzzle;

/// A reference to a `SearchTreeNode<P>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchTreeIndex {
    index: usize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }
}

/// A state reached during search, along with how it was reached.
#[derive(Debug)]
pub struct SearchTreeNode<P: Puzzle> {
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: P,
}

impl<P: Puzzle> SearchTreeNode<P> {
    pub fn new(state: P, parent: Option<SearchTreeIndex>) -> Self {
        Self { parent, state }
    }

    pub(crate) fn state(&self) -> &P {
        &self.state
    }

    /// Whether this node is the root of the tree.
    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Every state reached by a search, linked to its parent.
///
/// Each node stands for the whole path that leads to it, so frontiers can hold
/// plain indices instead of copies of partial paths.
pub(crate) struct SearchTree<P: Puzzle> {
    nodes: Vec<SearchTreeNode<P>>,
}

impl<P: Puzzle> SearchTree<P> {
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, node: SearchTreeNode<P>) -> SearchTreeIndex {
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Takes the path from the root to `node_index` out of the tree.
    #[must_use]
    pub fn into_path(self, mut node_index: SearchTreeIndex) -> SolutionPath<P> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut indices = vec![node_index];
        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(parent_index.index < node_index.index);
            indices.push(parent_index);
            node_index = parent_index;
        }
        indices.reverse();

        let mut slots: Vec<Option<P>> = self.nodes.into_iter().map(|n| Some(n.state)).collect();
        let states: Vec<P> = indices
            .into_iter()
            .filter_map(|i| slots[i.index].take())
            .collect();

        SolutionPath::from_states(states)
    }
}

impl<P: Puzzle> Default for SearchTree<P> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Puzzle> std::ops::Index<SearchTreeIndex> for SearchTree<P> {
    type Output = SearchTreeNode<P>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl<P: Puzzle> std::fmt::Debug for SearchTree<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Word(&'static str);

    impl Puzzle for Word {
        type Fingerprint = &'static str;

        fn is_goal(&self) -> bool {
            false
        }
        fn fingerprint(&self) -> &'static str {
            self.0
        }
        fn expand(&self) -> Vec<Self> {
            vec![]
        }
    }

    #[test]
    fn path_follows_parents() {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(Word("a"), None));
        let _sibling = tree.push(SearchTreeNode::new(Word("b"), Some(root)));
        let child = tree.push(SearchTreeNode::new(Word("c"), Some(root)));
        let leaf = tree.push(SearchTreeNode::new(Word("d"), Some(child)));
        assert_eq!(tree.len(), 4);
        assert!(tree[root].is_root());
        assert_eq!(tree[leaf].state().0, "d");

        let path = tree.into_path(leaf);
        assert_eq!(path.fingerprints(), vec!["a", "c", "d"]);
    }
}
