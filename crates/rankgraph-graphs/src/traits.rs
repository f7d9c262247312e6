//! Renderer trait definitions.

use rankgraph_common::Result;
use std::path::Path;

/// Trait for graph renderers that can generate visualizations.
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data: ?Sized;

    /// Renders the graph and writes it to `path`, replacing any existing file.
    fn render_to_file(&self, data: &Self::Data, path: &Path) -> Result<()>;

    /// Renders the graph to PNG bytes.
    fn render_to_bytes(&self, data: &Self::Data) -> Result<Vec<u8>>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;
}
