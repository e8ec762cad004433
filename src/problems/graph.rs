//! Puzzles given as an explicit graph.
//!
//! Handy to describe small state spaces by hand:
//!
//! ```text
//! # Edges, in exploration order
//! a -> b c
//! b -> d
//! c -> d
//! goal: d
//! prune: c
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::puzzle::Puzzle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphParseError {
    #[error("Line {line}: expected `node -> successors...`, `goal: nodes...` or `prune: nodes...`, found {text:?}")]
    InvalidLine { line: usize, text: String },
    #[error("Line {line}: node {node:?} lists itself as a successor")]
    SelfLoop { line: usize, node: String },
}

/// A directed graph with goal and pruned nodes.
#[derive(Debug, Default)]
pub struct Graph {
    edges: FxHashMap<String, Vec<String>>,
    goals: FxHashSet<String>,
    pruned: FxHashSet<String>,

    /// How many times each node was expanded.
    expansions: RefCell<FxHashMap<String, usize>>,
}

impl Graph {
    /// Wraps the graph into a puzzle starting at `node`.
    pub fn start(self, node: &str) -> GraphPuzzle {
        GraphPuzzle {
            graph: Rc::new(self),
            node: node.to_string(),
        }
    }

    pub fn successors(&self, node: &str) -> &[String] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// How many times `node` was expanded.
    ///
    /// Counts every call to [`Puzzle::expand`], including the ones made by
    /// [`SolutionPath::is_valid`](crate::path::SolutionPath::is_valid).
    pub fn expansions(&self, node: &str) -> usize {
        self.expansions.borrow().get(node).copied().unwrap_or(0)
    }
}

impl std::convert::TryFrom<&str> for Graph {
    type Error = GraphParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut graph = Graph::default();

        for (i, text) in s.lines().enumerate() {
            let line = i + 1;
            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            if let Some((node, successors)) = text.split_once("->") {
                let node = node.trim();
                if node.is_empty() || node.contains(char::is_whitespace) {
                    return Err(GraphParseError::InvalidLine {
                        line,
                        text: text.to_string(),
                    });
                }
                let edges = graph.edges.entry(node.to_string()).or_default();
                for successor in successors.split_whitespace() {
                    if successor == node {
                        return Err(GraphParseError::SelfLoop {
                            line,
                            node: node.to_string(),
                        });
                    }
                    edges.push(successor.to_string());
                }
                continue;
            }

            match text.split_once(':').map(|(key, nodes)| (key.trim(), nodes)) {
                Some(("goal" | "goals", nodes)) => {
                    graph
                        .goals
                        .extend(nodes.split_whitespace().map(str::to_string));
                }
                Some(("prune", nodes)) => {
                    graph
                        .pruned
                        .extend(nodes.split_whitespace().map(str::to_string));
                }
                _ => {
                    return Err(GraphParseError::InvalidLine {
                        line,
                        text: text.to_string(),
                    });
                }
            }
        }

        Ok(graph)
    }
}

/// A node in a [`Graph`].
#[derive(Clone, Debug)]
pub struct GraphPuzzle {
    graph: Rc<Graph>,
    node: String,
}

impl GraphPuzzle {
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl Puzzle for GraphPuzzle {
    type Fingerprint = String;

    fn is_goal(&self) -> bool {
        self.graph.goals.contains(&self.node)
    }

    fn should_prune(&self) -> bool {
        self.graph.pruned.contains(&self.node)
    }

    fn fingerprint(&self) -> String {
        self.node.clone()
    }

    fn expand(&self) -> Vec<Self> {
        *self
            .graph
            .expansions
            .borrow_mut()
            .entry(self.node.clone())
            .or_default() += 1;

        self.graph
            .successors(&self.node)
            .iter()
            .map(|node| GraphPuzzle {
                graph: Rc::clone(&self.graph),
                node: node.clone(),
            })
            .collect()
    }
}

impl std::fmt::Display for GraphPuzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.node)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn parse() {
        let graph = Graph::try_from(indoc! {"
            # comment
            a -> b c
            a -> d

            goals: d
            prune: c
        "})
        .unwrap();

        assert_eq!(graph.successors("a"), ["b", "c", "d"]);
        assert!(graph.successors("b").is_empty());

        let a = graph.start("a");
        assert!(!a.is_goal());
        let successors = a.expand();
        assert_eq!(
            successors.iter().map(GraphPuzzle::node).collect::<Vec<_>>(),
            vec!["b", "c", "d"]
        );
        assert!(successors[1].should_prune());
        assert!(successors[2].is_goal());
        assert_eq!(a.graph().expansions("a"), 1);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Graph::try_from("a b").unwrap_err(),
            GraphParseError::InvalidLine {
                line: 1,
                text: "a b".to_string()
            }
        );
        assert_eq!(
            Graph::try_from("\na -> a").unwrap_err(),
            GraphParseError::SelfLoop {
                line: 2,
                node: "a".to_string()
            }
        );
    }
}
