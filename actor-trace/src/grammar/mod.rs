//! Event grammar
//!
//! Recognizes the fixed vocabulary of trace lines emitted by the actor simulation.
//! Each recognizer is a pure function of one line: it either yields a typed
//! [`TraceEvent`] or reports "no match". Numeric fields are validated while
//! extracting; a field that does not fit a `u64` turns the whole line into a
//! non-match instead of an error.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub mod events;

pub use events::{EventKind, TraceEvent};

const PORT_PATTERN: &str = r"^PORT: Node\[([0-9]+)\] opened a port to Node\[([0-9]+)\]";
const CANDIDACY_PATTERN: &str =
    r"^SEND_RESPONSE: Node\[([0-9]+)\] sent response Candidacy\[([0-9]+)\] to Node\[([0-9]+)\]";
const DONE_PATTERN: &str =
    r"^SEND_RESPONSE: Node\[([0-9]+)\] sent response Done\[([^\]]*)\] to Node\[([0-9]+)\]";
const TERMINATE_PATTERN: &str = r"^TERMINATE: Node\[([0-9]+)\] has terminated";
const GROWTREE_PATTERN: &str = r"^RECV_REQUEST: Node\[([0-9]+)\] received request GrowTree\[([0-9]+): ([0-9]+)\] from Node\[([0-9]+)\]";
const TREEVOTE_PATTERN: &str = r"^SEND_RESPONSE: Node\[([0-9]+)\] sent response TreeVote\[([0-9]+): ([0-9]+)/([0-9]+)\] to Node\[([0-9]+)\]";

/// A single line recognizer: one pattern tagged with the kind it extracts
struct Recognizer {
    kind: EventKind,
    pattern: Regex,
}

impl Recognizer {
    fn new(kind: EventKind, source: &str) -> Self {
        Self {
            kind,
            // Constant patterns, checked by test_all_patterns_compile
            pattern: Regex::new(source).expect("built-in trace pattern must compile"),
        }
    }

    fn recognize(&self, line: &str) -> Option<TraceEvent> {
        let caps = self.pattern.captures(line)?;
        extract(self.kind, &caps)
    }
}

/// The complete event grammar, tried in a fixed order:
/// port-open, candidacy, done, terminate, growtree, treevote
pub struct EventGrammar {
    recognizers: Vec<Recognizer>,
}

impl EventGrammar {
    /// Compile all recognizers
    pub fn new() -> Self {
        let recognizers = EventKind::ALL
            .iter()
            .map(|&kind| Recognizer::new(kind, pattern_for(kind)))
            .collect();
        Self { recognizers }
    }

    /// Process-wide grammar instance, compiled on first use
    pub fn shared() -> &'static EventGrammar {
        static GRAMMAR: OnceLock<EventGrammar> = OnceLock::new();
        GRAMMAR.get_or_init(EventGrammar::new)
    }

    /// Return the first event kind that matches the line
    pub fn recognize(&self, line: &str) -> Option<TraceEvent> {
        self.recognizers.iter().find_map(|r| r.recognize(line))
    }

    /// Return every event encoded on the line, in recognition order
    pub fn recognize_all(&self, line: &str) -> Vec<TraceEvent> {
        self.recognizers
            .iter()
            .filter_map(|r| r.recognize(line))
            .collect()
    }
}

impl Default for EventGrammar {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern_for(kind: EventKind) -> &'static str {
    match kind {
        EventKind::PortOpen => PORT_PATTERN,
        EventKind::CandidacySent => CANDIDACY_PATTERN,
        EventKind::DoneSent => DONE_PATTERN,
        EventKind::Terminate => TERMINATE_PATTERN,
        EventKind::GrowTreeReceived => GROWTREE_PATTERN,
        EventKind::TreeVoteSent => TREEVOTE_PATTERN,
    }
}

/// Parse capture group `idx` as an unsigned integer
fn int(caps: &Captures<'_>, idx: usize) -> Option<u64> {
    caps.get(idx)?.as_str().parse().ok()
}

/// Build the typed event from a successful pattern match
fn extract(kind: EventKind, caps: &Captures<'_>) -> Option<TraceEvent> {
    let event = match kind {
        EventKind::PortOpen => TraceEvent::PortOpen {
            source: int(caps, 1)?,
            destination: int(caps, 2)?,
        },
        EventKind::CandidacySent => TraceEvent::CandidacySent {
            sender: int(caps, 1)?,
            candidate: int(caps, 2)?,
            recipient: int(caps, 3)?,
        },
        EventKind::DoneSent => TraceEvent::DoneSent {
            sender: int(caps, 1)?,
            payload: caps.get(2)?.as_str().to_string(),
            recipient: int(caps, 3)?,
        },
        EventKind::Terminate => TraceEvent::Terminate {
            node: int(caps, 1)?,
        },
        EventKind::GrowTreeReceived => TraceEvent::GrowTreeReceived {
            recipient: int(caps, 1)?,
            root: int(caps, 2)?,
            target: int(caps, 3)?,
            sender: int(caps, 4)?,
        },
        EventKind::TreeVoteSent => TraceEvent::TreeVoteSent {
            sender: int(caps, 1)?,
            root: int(caps, 2)?,
            inbound: int(caps, 3)?,
            outbound: int(caps, 4)?,
            recipient: int(caps, 5)?,
        },
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(line: &str) -> Option<TraceEvent> {
        EventGrammar::shared().recognize(line)
    }

    #[test]
    fn test_all_patterns_compile() {
        let grammar = EventGrammar::new();
        assert_eq!(grammar.recognizers.len(), 6);
        let kinds: Vec<EventKind> = grammar.recognizers.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, EventKind::ALL.to_vec());
    }

    #[test]
    fn test_port_open() {
        assert_eq!(
            recognize("PORT: Node[1] opened a port to Node[2]"),
            Some(TraceEvent::PortOpen {
                source: 1,
                destination: 2
            })
        );
    }

    #[test]
    fn test_candidacy() {
        assert_eq!(
            recognize("SEND_RESPONSE: Node[1] sent response Candidacy[5] to Node[2]"),
            Some(TraceEvent::CandidacySent {
                sender: 1,
                candidate: 5,
                recipient: 2
            })
        );
    }

    #[test]
    fn test_done_accepts_any_payload() {
        assert_eq!(
            recognize("SEND_RESPONSE: Node[2] sent response Done[ok] to Node[1]"),
            Some(TraceEvent::DoneSent {
                sender: 2,
                payload: "ok".to_string(),
                recipient: 1
            })
        );
        assert!(matches!(
            recognize("SEND_RESPONSE: Node[2] sent response Done[3] to Node[1]"),
            Some(TraceEvent::DoneSent { sender: 2, .. })
        ));
    }

    #[test]
    fn test_terminate() {
        assert_eq!(
            recognize("TERMINATE: Node[9] has terminated\n"),
            Some(TraceEvent::Terminate { node: 9 })
        );
    }

    #[test]
    fn test_growtree() {
        assert_eq!(
            recognize("RECV_REQUEST: Node[4] received request GrowTree[10: 20] from Node[3]"),
            Some(TraceEvent::GrowTreeReceived {
                recipient: 4,
                root: 10,
                target: 20,
                sender: 3
            })
        );
    }

    #[test]
    fn test_treevote() {
        assert_eq!(
            recognize("SEND_RESPONSE: Node[4] sent response TreeVote[10: 2/3] to Node[3]"),
            Some(TraceEvent::TreeVoteSent {
                sender: 4,
                root: 10,
                inbound: 2,
                outbound: 3,
                recipient: 3
            })
        );
    }

    #[test]
    fn test_unrelated_lines_do_not_match() {
        assert_eq!(recognize(""), None);
        assert_eq!(recognize("starting simulation with 12 actors"), None);
        assert_eq!(
            recognize("SEND_REQUEST: Node[1] sent request ReadAnswer[0] to Node[2]"),
            None
        );
        assert_eq!(
            recognize("SEND_RESPONSE: Node[1] sent response Answer[3] to Node[2]"),
            None
        );
    }

    #[test]
    fn test_patterns_are_anchored_at_line_start() {
        assert_eq!(recognize("  PORT: Node[1] opened a port to Node[2]"), None);
        assert!(recognize("PORT: Node[1] opened a port to Node[2] (retry)").is_some());
    }

    #[test]
    fn test_malformed_numbers_are_non_matches() {
        assert_eq!(recognize("PORT: Node[x] opened a port to Node[2]"), None);
        assert_eq!(recognize("PORT: Node[-1] opened a port to Node[2]"), None);
        assert_eq!(
            recognize("SEND_RESPONSE: Node[1] sent response Candidacy[5.5] to Node[2]"),
            None
        );
        // Overflows u64
        assert_eq!(
            recognize("PORT: Node[99999999999999999999999] opened a port to Node[2]"),
            None
        );
    }

    #[test]
    fn test_recognize_all_in_fixed_order() {
        let grammar = EventGrammar::shared();
        let events = grammar.recognize_all("TERMINATE: Node[3] has terminated");
        assert_eq!(events, vec![TraceEvent::Terminate { node: 3 }]);
        assert!(grammar.recognize_all("noise").is_empty());
    }

    #[test]
    fn test_display_round_trips_through_grammar() {
        let line = "RECV_REQUEST: Node[4] received request GrowTree[10: 20] from Node[3]";
        let event = recognize(line).unwrap();
        assert_eq!(event.to_string(), line);
    }
}
