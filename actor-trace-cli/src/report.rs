//! Printing of the parsed model
//!
//! Text output lists the nodes, then the edges, one line each. JSON output is the
//! serialized snapshot.

use crate::config::OutputFormat;
use actor_trace::TraceSnapshot;
use anyhow::Result;
use std::io::Write;

/// Write the node and edge sets in the requested format
pub fn write_model<W: Write>(out: &mut W, snapshot: &TraceSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", format_nodes(snapshot))?;
            writeln!(out, "{}", format_edges(snapshot))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, snapshot)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `[1, 2, 3]`
fn format_nodes(snapshot: &TraceSnapshot) -> String {
    let ids: Vec<String> = snapshot.nodes.iter().map(|n| n.id.to_string()).collect();
    format!("[{}]", ids.join(", "))
}

/// `[(1, 2), (2, 3)]`
fn format_edges(snapshot: &TraceSnapshot) -> String {
    let edges: Vec<String> = snapshot.edges.iter().map(|e| e.to_string()).collect();
    format!("[{}]", edges.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_trace::TraceModelBuilder;

    fn snapshot() -> TraceSnapshot {
        let mut builder = TraceModelBuilder::new();
        builder.ingest("PORT: Node[1] opened a port to Node[2]");
        builder.ingest("PORT: Node[2] opened a port to Node[3]");
        builder.ingest("PORT: Node[1] opened a port to Node[2]");
        builder.snapshot()
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        write_model(&mut out, &snapshot(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "[1, 2, 3]\n[(1, 2), (2, 3), (1, 2)]\n");
    }

    #[test]
    fn test_empty_text_output() {
        let mut out = Vec::new();
        write_model(&mut out, &TraceSnapshot::default(), OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n[]\n");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_model(&mut out, &snapshot(), OutputFormat::Json).unwrap();
        let parsed: TraceSnapshot = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, snapshot());
    }
}
