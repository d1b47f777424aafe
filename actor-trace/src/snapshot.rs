//! Immutable view of a parsed trace
//!
//! A snapshot carries exactly what a renderer needs: the node set, the edge
//! multiset, one label per node and one terminal flag per node. Nothing in it is
//! layout specific.

use crate::builder::TraceModelBuilder;
use crate::types::{Edge, NodeId};
use serde::{Deserialize, Serialize};

/// One node of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub label: String,
    pub terminal: bool,
}

/// Owned copy of the accumulated model, taken after parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSnapshot {
    /// Nodes in order of first appearance
    pub nodes: Vec<SnapshotNode>,
    /// Edges in trace order, duplicates preserved
    pub edges: Vec<Edge>,
}

impl TraceSnapshot {
    pub(crate) fn capture(builder: &TraceModelBuilder) -> Self {
        let nodes = builder
            .nodes()
            .into_iter()
            .map(|id| SnapshotNode {
                id,
                label: builder.label(id),
                terminal: builder.is_terminal(id),
            })
            .collect();

        Self {
            nodes,
            edges: builder.edges(),
        }
    }

    /// Node ids only
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&SnapshotNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
