//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the botgraph
//! crate. Import it to get the whole settings -> flows -> graph -> renderer pipeline
//! without importing each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use botgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let flows = FlowLoader::new("bot").load(&Settings {
//!     flow_files: vec!["ExampleBot/flows.yaml".to_string()],
//! })?;
//! let report = GraphBuilder::new("bot").build(&flows)?;
//! println!("{} states, {} transitions", report.ir.nodes.len(), report.ir.edges.len());
//! # Ok(())
//! # }
//! ```

// Settings and loading
pub use crate::flow::{
    Action, FlowDefinition, FlowFile, FlowLoader, FlowSet, HandlerRef, IntoFlows,
    StateDefinition,
};
pub use crate::settings::{BotSettingsFile, DEFAULT_APP_NAME, Settings, SettingsSource};

// Graph construction
pub use crate::graph::{BuildReport, Diagnostic, Edge, GraphBuilder, GraphIR, Node};
pub use crate::handler::{HeuristicScanner, TransitionScanner};
pub use crate::resolver::{QualifiedStateId, StateResolver};

// Rendering
pub use crate::render::{
    DiagramArtifact, DiagramRenderer, FlowColors, GraphRenderer, JsonGraph, JsonRenderer,
    OutputFormat,
};

// Error types
pub use crate::error::{
    FlowConversionError, GraphError, HandlerError, LoadError, RenderError, ResolveError,
    SettingsError,
};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
