//! Actor Trace CLI Application
//!
//! This is the command-line driver for the actor-trace library. It:
//! - Reads an actor simulation trace line by line
//! - Prints the reconstructed node and edge sets
//! - Hands the finished model to the Graphviz renderer

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Actor Trace - Reconstruct actor topology and state from a simulation trace
#[derive(Parser, Debug)]
#[command(name = "actor-trace")]
#[command(about = "Reconstruct actor topology and protocol state from a simulation trace", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the trace file
    #[arg(value_name = "TRACE")]
    trace: PathBuf,

    /// Directory for the rendered graph (default: graphviz_out)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// How to print the node and edge sets
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also render an image with Graphviz `dot` (svg, png, ...); without it only the .gv source is written
    #[arg(long, value_name = "FMT")]
    image: Option<String>,

    /// Only print the model, do not write graph files
    #[arg(long)]
    no_render: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Actor Trace CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using actor-trace library v{}", actor_trace::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    run(&args, &app_config)
}

/// Parse the trace, print the model, then render it
fn run(args: &Args, app_config: &AppConfig) -> Result<()> {
    use actor_trace::{DotRenderer, GraphRenderer, TraceModelBuilder};

    let model = TraceModelBuilder::from_path(&args.trace)
        .with_context(|| format!("Failed to read trace file: {:?}", args.trace))?;
    let snapshot = model.snapshot();

    let format = args.format.unwrap_or(app_config.output.format);
    let stdout = io::stdout();
    report::write_model(&mut stdout.lock(), &snapshot, format)?;

    if args.no_render {
        log::debug!("Rendering disabled");
        return Ok(());
    }

    let mut render_config = app_config.render_config();
    if let Some(dir) = &args.output_dir {
        render_config = render_config.with_output_dir(dir);
    }
    if let Some(image) = &args.image {
        render_config = render_config.with_image_format(image);
    }

    let renderer = DotRenderer::new(render_config);
    renderer
        .render(&snapshot)
        .with_context(|| format!("Failed to render graph to {:?}", renderer.config().output_dir))?;

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
