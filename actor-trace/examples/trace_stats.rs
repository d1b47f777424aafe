//! Standalone trace statistics tool
//!
//! Loads an actor simulation trace and prints how many lines of each event kind
//! it contained, plus a per-node summary.
//!
//! Usage:
//!   trace_stats <trace.log>

use actor_trace::{EventKind, TraceModelBuilder};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let Some(path) = env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: trace_stats <trace.log>");
        std::process::exit(2);
    };

    let model = match TraceModelBuilder::from_path(&path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error reading {:?}: {}", path, e);
            std::process::exit(1);
        }
    };

    let stats = model.stats();
    println!("\n=== TRACE SUMMARY ===");
    println!("Lines read:     {}", stats.lines_seen);
    println!("Lines ignored:  {}", stats.lines_ignored);
    for kind in EventKind::ALL {
        println!("{:<16}{}", format!("{}:", kind), stats.events(kind));
    }
    println!("Nodes:          {}", stats.num_nodes);
    println!("Edges:          {}", stats.num_edges);
    println!("Terminal nodes: {}", stats.num_terminal);

    println!("\n=== NODES ===");
    for node in model.nodes() {
        let marker = if model.is_terminal(node) { "done" } else { "    " };
        println!("{:>6} {} {}", node, marker, model.label(node));
    }
}
