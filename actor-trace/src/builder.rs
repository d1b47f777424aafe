//! Trace model builder
//!
//! Folds trace lines, in order, into a directed actor graph with per-node
//! protocol annotations. The builder owns all of its state exclusively and every
//! mutation goes through [`TraceModelBuilder::ingest`].

use crate::grammar::{EventGrammar, EventKind, TraceEvent};
use crate::snapshot::TraceSnapshot;
use crate::types::{Edge, NodeId, NodeState, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Accumulates the actor graph described by a trace
pub struct TraceModelBuilder {
    grammar: &'static EventGrammar,

    /// Node ids in order of first appearance
    node_order: Vec<NodeId>,

    /// Per-node annotations, one entry for every id in `node_order`
    states: HashMap<NodeId, NodeState>,

    /// Port-open edges in trace order, duplicates kept
    edges: Vec<Edge>,

    lines_seen: usize,
    lines_ignored: usize,
    events_by_kind: BTreeMap<EventKind, usize>,
}

impl TraceModelBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            grammar: EventGrammar::shared(),
            node_order: Vec::new(),
            states: HashMap::new(),
            edges: Vec::new(),
            lines_seen: 0,
            lines_ignored: 0,
            events_by_kind: BTreeMap::new(),
        }
    }

    /// Open a trace file and ingest every line
    ///
    /// # Arguments
    /// * `path` - Path to the trace file
    ///
    /// # Returns
    /// * `Result<TraceModelBuilder>` - Err only if the file cannot be opened or read
    ///
    /// # Example
    /// ```no_run
    /// use actor_trace::TraceModelBuilder;
    /// use std::path::Path;
    ///
    /// let model = TraceModelBuilder::from_path(Path::new("run.log")).unwrap();
    /// println!("{:?}", model.nodes());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        log::info!("Reading trace file: {:?}", path);
        let file = File::open(path)?;

        let mut builder = Self::new();
        builder.ingest_reader(BufReader::new(file))?;

        let stats = builder.stats();
        log::info!(
            "Trace loaded: {} lines, {} nodes, {} edges ({} lines ignored)",
            stats.lines_seen,
            stats.num_nodes,
            stats.num_edges,
            stats.lines_ignored
        );
        Ok(builder)
    }

    /// Ingest every line from a reader
    ///
    /// Bytes that are not valid UTF-8 are replaced, so such a line is ingested
    /// like any other noise. Only a failing read aborts with `TraceError::Io`.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            while matches!(buf.last(), Some(b'\n' | b'\r')) {
                buf.pop();
            }
            let line = String::from_utf8_lossy(&buf);
            self.ingest(&line);
        }
    }

    /// Apply one trace line to the model
    ///
    /// Never fails: a line that matches no event kind, or whose numeric fields are
    /// malformed, leaves the model untouched.
    pub fn ingest(&mut self, line: &str) {
        self.lines_seen += 1;

        let events = self.grammar.recognize_all(line);
        if events.is_empty() {
            log::trace!("Ignoring line {}: {:?}", self.lines_seen, line);
            self.lines_ignored += 1;
            return;
        }

        for event in events {
            self.apply(event);
        }
    }

    /// Apply an already recognized event
    fn apply(&mut self, event: TraceEvent) {
        log::debug!("Applying {}: {}", event.kind(), event);

        for actor in event.actors() {
            self.ensure_node(actor);
        }
        *self.events_by_kind.entry(event.kind()).or_insert(0) += 1;

        match event {
            TraceEvent::PortOpen {
                source,
                destination,
            } => {
                self.edges.push(Edge::new(source, destination));
            }
            TraceEvent::CandidacySent {
                sender, candidate, ..
            } => {
                self.ensure_node(sender).candidacy = Some(candidate);
            }
            TraceEvent::DoneSent { sender, .. } => {
                self.ensure_node(sender).mark_terminal();
            }
            TraceEvent::Terminate { node } => {
                self.ensure_node(node).mark_terminal();
            }
            TraceEvent::GrowTreeReceived { recipient, .. } => {
                let growtree = event.growtree();
                self.ensure_node(recipient).growtree = growtree;
            }
            TraceEvent::TreeVoteSent { sender, .. } => {
                let treevote = event.treevote();
                self.ensure_node(sender).treevote = treevote;
            }
        }
    }

    /// Register a node on first mention
    fn ensure_node(&mut self, node: NodeId) -> &mut NodeState {
        if !self.states.contains_key(&node) {
            self.node_order.push(node);
        }
        self.states.entry(node).or_default()
    }

    /// All known nodes, without duplicates, in order of first appearance
    pub fn nodes(&self) -> Vec<NodeId> {
        self.node_order.clone()
    }

    /// All port-open edges in trace order, duplicates preserved
    pub fn edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }

    /// Composed annotation text for a node: `candidacy | growtree | treevote`
    ///
    /// Fields never observed, and nodes never referenced, show the `-` placeholder.
    pub fn label(&self, node: NodeId) -> String {
        self.states
            .get(&node)
            .map(NodeState::label)
            .unwrap_or_else(|| NodeState::default().label())
    }

    /// Whether the node has sent Done or terminated
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.states.get(&node).map_or(false, |s| s.terminal)
    }

    /// Typed annotations of a node, if it has been referenced
    pub fn node_state(&self, node: NodeId) -> Option<&NodeState> {
        self.states.get(&node)
    }

    /// Take an owned, immutable copy of the model for rendering
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot::capture(self)
    }

    /// Get statistics about the ingested trace
    pub fn stats(&self) -> TraceStats {
        TraceStats {
            lines_seen: self.lines_seen,
            lines_ignored: self.lines_ignored,
            events_by_kind: self.events_by_kind.clone(),
            num_nodes: self.node_order.len(),
            num_edges: self.edges.len(),
            num_terminal: self.states.values().filter(|s| s.terminal).count(),
        }
    }
}

impl Default for TraceModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ingestion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Lines fed to the builder
    pub lines_seen: usize,
    /// Lines that matched no event kind
    pub lines_ignored: usize,
    /// Applied events per kind
    pub events_by_kind: BTreeMap<EventKind, usize>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_terminal: usize,
}

impl TraceStats {
    /// Applied events of one kind
    pub fn events(&self, kind: EventKind) -> usize {
        self.events_by_kind.get(&kind).copied().unwrap_or(0)
    }
}
