//! Core types for the actor trace library
//!
//! This module defines the identifiers, per-node annotations and errors shared by
//! the event grammar, the model builder and the renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor identifier as written inside `Node[...]`
pub type NodeId = u64;

/// Result type for trace operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Text used for any node annotation that was never observed
pub const PLACEHOLDER: &str = "-";

/// Errors that can occur while reading a trace or rendering its model
///
/// Line-level mismatches are never errors: an unrecognized line is simply skipped.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render graph: {0}")]
    Render(String),
}

/// A directed edge recorded by a port-open event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Actor that opened the port
    pub source: NodeId,
    /// Actor the port was opened to
    pub destination: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, destination: NodeId) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.destination)
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, destination): (NodeId, NodeId)) -> Self {
        Self::new(source, destination)
    }
}

/// Last GrowTree request seen by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowTree {
    /// Root of the tree being grown
    pub root: NodeId,
    /// Requested target
    pub target: u64,
    /// Node the request came from
    pub ancestor: NodeId,
}

impl fmt::Display for GrowTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.root, self.target, self.ancestor)
    }
}

/// Last TreeVote response sent by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeVote {
    /// Root the vote is for
    pub root: NodeId,
    /// Subtree contribution counted so far
    pub inbound: u64,
    /// Target count the vote answers
    pub outbound: u64,
    /// Node the vote is sent to
    pub ancestor: NodeId,
}

impl fmt::Display for TreeVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.root, self.inbound, self.outbound, self.ancestor
        )
    }
}

/// Latest known protocol state of one actor
///
/// Every field holds the most recent observation in trace order, except
/// `terminal`, which only ever goes from `false` to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub candidacy: Option<NodeId>,
    pub growtree: Option<GrowTree>,
    pub treevote: Option<TreeVote>,
    pub terminal: bool,
}

impl NodeState {
    /// Compose the human-readable annotation: `candidacy | growtree | treevote`
    pub fn label(&self) -> String {
        format!(
            "{} | {} | {}",
            display_or_placeholder(self.candidacy.as_ref()),
            display_or_placeholder(self.growtree.as_ref()),
            display_or_placeholder(self.treevote.as_ref()),
        )
    }

    /// Mark the node terminal (never reset)
    pub fn mark_terminal(&mut self) {
        self.terminal = true;
    }
}

fn display_or_placeholder<T: fmt::Display>(value: Option<&T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_label() {
        assert_eq!(NodeState::default().label(), "- | - | -");
    }

    #[test]
    fn test_full_state_label() {
        let state = NodeState {
            candidacy: Some(5),
            growtree: Some(GrowTree {
                root: 10,
                target: 20,
                ancestor: 3,
            }),
            treevote: Some(TreeVote {
                root: 10,
                inbound: 2,
                outbound: 3,
                ancestor: 3,
            }),
            terminal: false,
        };
        assert_eq!(state.label(), "5 | (10, 20, 3) | (10, 2, 3, 3)");
    }

    #[test]
    fn test_terminal_is_sticky() {
        let mut state = NodeState::default();
        state.mark_terminal();
        state.mark_terminal();
        assert!(state.terminal);
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::from((1, 2)).to_string(), "(1, 2)");
    }
}
