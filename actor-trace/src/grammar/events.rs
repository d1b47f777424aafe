//! Typed event records produced by the grammar

use crate::types::{GrowTree, NodeId, TreeVote};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six event kinds, in the order the grammar tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    PortOpen,
    CandidacySent,
    DoneSent,
    Terminate,
    GrowTreeReceived,
    TreeVoteSent,
}

impl EventKind {
    /// Every kind in recognition order
    pub const ALL: [EventKind; 6] = [
        EventKind::PortOpen,
        EventKind::CandidacySent,
        EventKind::DoneSent,
        EventKind::Terminate,
        EventKind::GrowTreeReceived,
        EventKind::TreeVoteSent,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::PortOpen => write!(f, "PortOpen"),
            EventKind::CandidacySent => write!(f, "CandidacySent"),
            EventKind::DoneSent => write!(f, "DoneSent"),
            EventKind::Terminate => write!(f, "Terminate"),
            EventKind::GrowTreeReceived => write!(f, "GrowTreeReceived"),
            EventKind::TreeVoteSent => write!(f, "TreeVoteSent"),
        }
    }
}

/// One recognized trace line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// `source` opened a port to `destination`
    PortOpen {
        source: NodeId,
        destination: NodeId,
    },

    /// `sender` answered `recipient` proposing `candidate`
    CandidacySent {
        sender: NodeId,
        candidate: NodeId,
        recipient: NodeId,
    },

    /// `sender` answered `recipient` with Done
    DoneSent {
        sender: NodeId,
        /// Raw text between the Done brackets
        payload: String,
        recipient: NodeId,
    },

    /// `node` terminated
    Terminate { node: NodeId },

    /// `recipient` received a GrowTree request from `sender`
    GrowTreeReceived {
        recipient: NodeId,
        root: NodeId,
        target: u64,
        sender: NodeId,
    },

    /// `sender` voted to `recipient` in the tree-building phase
    TreeVoteSent {
        sender: NodeId,
        root: NodeId,
        inbound: u64,
        outbound: u64,
        recipient: NodeId,
    },
}

impl TraceEvent {
    /// Get the kind tag of this event
    pub fn kind(&self) -> EventKind {
        match self {
            TraceEvent::PortOpen { .. } => EventKind::PortOpen,
            TraceEvent::CandidacySent { .. } => EventKind::CandidacySent,
            TraceEvent::DoneSent { .. } => EventKind::DoneSent,
            TraceEvent::Terminate { .. } => EventKind::Terminate,
            TraceEvent::GrowTreeReceived { .. } => EventKind::GrowTreeReceived,
            TraceEvent::TreeVoteSent { .. } => EventKind::TreeVoteSent,
        }
    }

    /// All actor ids (`Node[...]` fields) this event mentions
    ///
    /// Payload values such as the proposed candidate or the tree root are not actors
    /// of the line and are not listed.
    pub fn actors(&self) -> Vec<NodeId> {
        match self {
            TraceEvent::PortOpen {
                source,
                destination,
            } => vec![*source, *destination],
            TraceEvent::CandidacySent {
                sender, recipient, ..
            } => vec![*sender, *recipient],
            TraceEvent::DoneSent {
                sender, recipient, ..
            } => vec![*sender, *recipient],
            TraceEvent::Terminate { node } => vec![*node],
            TraceEvent::GrowTreeReceived {
                recipient, sender, ..
            } => vec![*recipient, *sender],
            TraceEvent::TreeVoteSent {
                sender, recipient, ..
            } => vec![*sender, *recipient],
        }
    }

    /// The GrowTree descriptor carried by this event, if any
    pub fn growtree(&self) -> Option<GrowTree> {
        match self {
            TraceEvent::GrowTreeReceived {
                root,
                target,
                sender,
                ..
            } => Some(GrowTree {
                root: *root,
                target: *target,
                ancestor: *sender,
            }),
            _ => None,
        }
    }

    /// The TreeVote descriptor carried by this event, if any
    pub fn treevote(&self) -> Option<TreeVote> {
        match self {
            TraceEvent::TreeVoteSent {
                root,
                inbound,
                outbound,
                recipient,
                ..
            } => Some(TreeVote {
                root: *root,
                inbound: *inbound,
                outbound: *outbound,
                ancestor: *recipient,
            }),
            _ => None,
        }
    }
}

/// Re-emits the canonical trace line for the event
impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::PortOpen {
                source,
                destination,
            } => write!(
                f,
                "PORT: Node[{}] opened a port to Node[{}]",
                source, destination
            ),
            TraceEvent::CandidacySent {
                sender,
                candidate,
                recipient,
            } => write!(
                f,
                "SEND_RESPONSE: Node[{}] sent response Candidacy[{}] to Node[{}]",
                sender, candidate, recipient
            ),
            TraceEvent::DoneSent {
                sender,
                payload,
                recipient,
            } => write!(
                f,
                "SEND_RESPONSE: Node[{}] sent response Done[{}] to Node[{}]",
                sender, payload, recipient
            ),
            TraceEvent::Terminate { node } => {
                write!(f, "TERMINATE: Node[{}] has terminated", node)
            }
            TraceEvent::GrowTreeReceived {
                recipient,
                root,
                target,
                sender,
            } => write!(
                f,
                "RECV_REQUEST: Node[{}] received request GrowTree[{}: {}] from Node[{}]",
                recipient, root, target, sender
            ),
            TraceEvent::TreeVoteSent {
                sender,
                root,
                inbound,
                outbound,
                recipient,
            } => write!(
                f,
                "SEND_RESPONSE: Node[{}] sent response TreeVote[{}: {}/{}] to Node[{}]",
                sender, root, inbound, outbound, recipient
            ),
        }
    }
}
