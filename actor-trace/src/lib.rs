//! Actor Trace Library
//!
//! Reconstructs the communication topology and the latest protocol state of each
//! actor from the textual trace of a distributed actor simulation.
//!
//! # Architecture
//!
//! - The event grammar recognizes six line kinds (port-open, Candidacy, Done,
//!   terminate, GrowTree, TreeVote) and extracts typed fields from them
//! - The model builder folds recognized events into a node/edge graph with
//!   per-node annotations and answers queries over it
//! - A snapshot of the finished model is handed to a renderer
//!
//! The library does NOT:
//! - Validate a trace against the protocol
//! - Recover malformed lines (they are skipped)
//! - Lay out graphs itself (the DOT renderer delegates to Graphviz)
//!
//! # Example Usage
//!
//! ```
//! use actor_trace::{Edge, TraceModelBuilder};
//!
//! let mut model = TraceModelBuilder::new();
//! model.ingest("PORT: Node[1] opened a port to Node[2]");
//! model.ingest("SEND_RESPONSE: Node[1] sent response Candidacy[5] to Node[2]");
//! model.ingest("SEND_RESPONSE: Node[2] sent response Done[ok] to Node[1]");
//! model.ingest("some unrelated log line");
//!
//! assert_eq!(model.nodes(), vec![1, 2]);
//! assert_eq!(model.edges(), vec![Edge::new(1, 2)]);
//! assert_eq!(model.label(1), "5 | - | -");
//! assert!(model.is_terminal(2));
//! ```

// Public modules
pub mod builder;
pub mod config;
pub mod grammar;
pub mod render;
pub mod snapshot;
pub mod types;

// Re-export main types for convenience
pub use builder::{TraceModelBuilder, TraceStats};
pub use config::RenderConfig;
pub use grammar::{EventGrammar, EventKind, TraceEvent};
pub use render::{DotRenderer, GraphRenderer};
pub use snapshot::{SnapshotNode, TraceSnapshot};
pub use types::{Edge, GrowTree, NodeId, NodeState, Result, TraceError, TreeVote, PLACEHOLDER};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
