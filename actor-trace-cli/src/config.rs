//! Configuration loading and parsing

use actor_trace::RenderConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("graphviz_out")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderSection {
    pub graph_name: Option<String>,
    pub active_color: Option<String>,
    pub terminal_color: Option<String>,
    pub image: Option<String>,
}

impl AppConfig {
    /// Build the library render configuration from this file's settings
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::new().with_output_dir(&self.output.dir);
        if let Some(name) = &self.render.graph_name {
            config = config.with_graph_name(name);
        }
        if let Some(color) = &self.render.active_color {
            config.active_color = color.clone();
        }
        if let Some(color) = &self.render.terminal_color {
            config.terminal_color = color.clone();
        }
        if let Some(format) = &self.render.image {
            config = config.with_image_format(format);
        }
        config
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
