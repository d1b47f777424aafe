//! Graphviz DOT renderer
//!
//! Writes the snapshot as a `digraph` source file and, when an image format is
//! configured, runs the external `dot` program on it.

use crate::config::RenderConfig;
use crate::render::GraphRenderer;
use crate::snapshot::TraceSnapshot;
use crate::types::{Result, TraceError};
use std::fs;
use std::process::Command;

/// Renders snapshots to Graphviz files
pub struct DotRenderer {
    config: RenderConfig,
}

impl DotRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the snapshot as a Graphviz DOT string
    pub fn to_dot(&self, snapshot: &TraceSnapshot) -> String {
        let mut out = String::new();
        out.push_str(&format!("digraph {} {{\n", escape_id(&self.config.graph_name)));

        for node in &snapshot.nodes {
            out.push_str(&format!(
                "  {} [label=\"{}\\n{}\" style=filled color=\"{}\"];\n",
                node.id,
                node.id,
                escape_dot(&node.label),
                escape_dot(self.config.color_for(node.terminal)),
            ));
        }

        for edge in &snapshot.edges {
            out.push_str(&format!("  {} -> {};\n", edge.source, edge.destination));
        }

        out.push_str("}\n");
        out
    }

    /// Invoke `dot -T<format>` on the written source file
    fn render_image(&self, format: &str) -> Result<()> {
        let source = self.config.dot_path();
        let Some(target) = self.config.image_path() else {
            return Ok(());
        };

        log::info!("Rendering {:?} to {:?}", source, target);
        let status = Command::new("dot")
            .arg(format!("-T{}", format))
            .arg(&source)
            .arg("-o")
            .arg(&target)
            .status()
            .map_err(|e| TraceError::Render(format!("Failed to run dot: {}", e)))?;

        if !status.success() {
            return Err(TraceError::Render(format!(
                "dot exited with {} while rendering {:?}",
                status, source
            )));
        }
        Ok(())
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, snapshot: &TraceSnapshot) -> Result<()> {
        fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.dot_path();
        fs::write(&path, self.to_dot(snapshot))?;
        log::info!(
            "Wrote graph with {} nodes and {} edges to {:?}",
            snapshot.nodes.len(),
            snapshot.edges.len(),
            path
        );

        if let Some(format) = &self.config.image_format {
            self.render_image(format)?;
        }
        Ok(())
    }
}

/// Escape text for use inside a quoted DOT string
fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Quote a graph name unless it is a plain identifier
fn escape_id(s: &str) -> String {
    let plain = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        s.to_string()
    } else {
        format!("\"{}\"", escape_dot(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TraceModelBuilder;

    fn snapshot() -> TraceSnapshot {
        let mut builder = TraceModelBuilder::new();
        builder.ingest("PORT: Node[1] opened a port to Node[2]");
        builder.ingest("SEND_RESPONSE: Node[1] sent response Candidacy[5] to Node[2]");
        builder.ingest("SEND_RESPONSE: Node[2] sent response Done[ok] to Node[1]");
        builder.snapshot()
    }

    #[test]
    fn test_to_dot_contains_digraph() {
        let dot = DotRenderer::new(RenderConfig::new()).to_dot(&snapshot());
        assert!(dot.starts_with("digraph actors {"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_to_dot_nodes_and_colors() {
        let dot = DotRenderer::new(RenderConfig::new()).to_dot(&snapshot());
        assert!(dot.contains("1 [label=\"1\\n5 | - | -\" style=filled color=\"lightblue\"];"));
        assert!(dot.contains("2 [label=\"2\\n- | - | -\" style=filled color=\"grey\"];"));
    }

    #[test]
    fn test_to_dot_includes_edges() {
        let dot = DotRenderer::new(RenderConfig::new()).to_dot(&snapshot());
        assert!(dot.contains("  1 -> 2;"));
    }

    #[test]
    fn test_empty_snapshot() {
        let dot = DotRenderer::new(RenderConfig::new()).to_dot(&TraceSnapshot::default());
        assert_eq!(dot, "digraph actors {\n}\n");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_dot("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_id("actors"), "actors");
        assert_eq!(escape_id("run 1"), "\"run 1\"");
        assert_eq!(escape_id("1run"), "\"1run\"");
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new().with_output_dir(dir.path().join("out"));
        let renderer = DotRenderer::new(config);

        renderer.render(&snapshot()).unwrap();

        let written = fs::read_to_string(renderer.config().dot_path()).unwrap();
        assert!(written.contains("1 -> 2"));
    }
}
