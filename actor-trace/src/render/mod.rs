//! Graph renderers
//!
//! Rendering is a collaborator of the model, not part of it: a renderer receives
//! a finished [`TraceSnapshot`] and decides on its own how to lay it out.

use crate::snapshot::TraceSnapshot;
use crate::types::Result;

pub mod dot;

pub use dot::DotRenderer;

/// Common trait for everything that turns a snapshot into a picture
pub trait GraphRenderer {
    /// Render the snapshot
    fn render(&self, snapshot: &TraceSnapshot) -> Result<()>;
}
