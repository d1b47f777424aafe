//! Rendering configuration types
//!
//! This module defines the settings the DOT renderer needs. Parsing itself has no
//! configuration: the grammar is fixed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for graph rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Name of the emitted `digraph`, also the output file stem
    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    /// Directory the graph files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fill color of nodes that are still running
    #[serde(default = "default_active_color")]
    pub active_color: String,

    /// Fill color of nodes that sent Done or terminated
    #[serde(default = "default_terminal_color")]
    pub terminal_color: String,

    /// Optional: image format to produce with the external `dot` program (svg, png, ...)
    #[serde(default)]
    pub image_format: Option<String>,
}

fn default_graph_name() -> String {
    "actors".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("graphviz_out")
}

fn default_active_color() -> String {
    "lightblue".to_string()
}

fn default_terminal_color() -> String {
    "grey".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            graph_name: default_graph_name(),
            output_dir: default_output_dir(),
            active_color: default_active_color(),
            terminal_color: default_terminal_color(),
            image_format: None,
        }
    }
}

impl RenderConfig {
    /// Create a new render configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the digraph name
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Builder method: set active/terminal node colors
    pub fn with_colors(mut self, active: impl Into<String>, terminal: impl Into<String>) -> Self {
        self.active_color = active.into();
        self.terminal_color = terminal.into();
        self
    }

    /// Builder method: request an image via the external `dot` program
    pub fn with_image_format(mut self, format: impl Into<String>) -> Self {
        self.image_format = Some(format.into());
        self
    }

    /// File stem derived from the graph name; anything but `[A-Za-z0-9_-]` becomes `_`
    /// so the files always land directly inside `output_dir`
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .graph_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            default_graph_name()
        } else {
            stem
        }
    }

    /// Path of the DOT source file
    pub fn dot_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.gv", self.file_stem()))
    }

    /// Path of the rendered image, if one was requested
    pub fn image_path(&self) -> Option<PathBuf> {
        self.image_format
            .as_ref()
            .map(|fmt| self.output_dir.join(format!("{}.gv.{}", self.file_stem(), fmt)))
    }

    /// Fill color for a node
    pub fn color_for(&self, terminal: bool) -> &str {
        if terminal {
            &self.terminal_color
        } else {
            &self.active_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::new();
        assert_eq!(config.graph_name, "actors");
        assert_eq!(config.dot_path(), PathBuf::from("graphviz_out/actors.gv"));
        assert_eq!(config.image_path(), None);
        assert_eq!(config.color_for(false), "lightblue");
        assert_eq!(config.color_for(true), "grey");
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::new()
            .with_output_dir("out")
            .with_graph_name("run1")
            .with_colors("white", "black")
            .with_image_format("svg");

        assert_eq!(config.dot_path(), PathBuf::from("out/run1.gv"));
        assert_eq!(config.image_path(), Some(PathBuf::from("out/run1.gv.svg")));
        assert_eq!(config.color_for(true), "black");
    }

    #[test]
    fn test_graph_name_cannot_leave_output_dir() {
        let config = RenderConfig::new()
            .with_output_dir("out")
            .with_graph_name("../x");
        assert_eq!(config.dot_path(), PathBuf::from("out/___x.gv"));

        let config = RenderConfig::new()
            .with_output_dir("out")
            .with_graph_name("/etc/passwd")
            .with_image_format("svg");
        assert_eq!(config.dot_path(), PathBuf::from("out/_etc_passwd.gv"));
        assert_eq!(config.image_path(), Some(PathBuf::from("out/_etc_passwd.gv.svg")));

        let config = RenderConfig::new().with_graph_name("");
        assert_eq!(config.dot_path(), PathBuf::from("graphviz_out/actors.gv"));
    }
}
