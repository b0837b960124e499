use crate::error::RenderError;
use crate::graph::GraphIR;

pub mod color;
pub mod diagram;
pub mod json;

pub use color::{FlowColors, generate_colors, generate_colors_random};
pub use diagram::{DiagramArtifact, DiagramRenderer};
pub use json::{JsonGraph, JsonLink, JsonNode, JsonRenderer};

/// Flow holding the conversation's entry state.
pub const INITIAL_FLOW: &str = "default";
/// Entry state inside [`INITIAL_FLOW`].
pub const INITIAL_STATE: &str = "root";
/// Fill color used when flows are not colored.
pub const DEFAULT_COLOR: &str = "#FFFFFF";
/// Name of the emitted DOT graph.
pub const GRAPH_NAME: &str = "bot_graph";
/// Weight attached to every JSON link.
pub const EDGE_WEIGHT: u32 = 1;

/// A renderer that turns the graph into the text of an output artifact.
pub trait GraphRenderer {
    fn render(&self, ir: &GraphIR) -> Result<String, RenderError>;
}

/// The available output artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graphviz layout file, rendered to PDF and optionally opened.
    Diagram,
    /// Node/link JSON for force-directed graph viewers.
    Json,
}
