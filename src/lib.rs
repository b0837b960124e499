//! # botgraph - Chatbot State Graph Extraction
//!
//! **botgraph** reads the flow-definition files of a Botshot chatbot and extracts the
//! directed graph of its conversational states. The graph can be rendered as a Graphviz
//! diagram or exported as node/link JSON.
//!
//! ## Core Workflow
//!
//! 1.  **Read Settings**: A [`settings::SettingsSource`] lists the flow files of the bot.
//!     [`settings::BotSettingsFile`] reads them from `bot_settings.*` without running any
//!     of the bot's code.
//! 2.  **Load Flows**: [`flow::FlowLoader`] parses every flow file into a [`flow::FlowSet`].
//! 3.  **Build the Graph**: [`graph::GraphBuilder`] turns each state into a node and each
//!     transition into an edge. Static `next:` actions are resolved directly; custom
//!     handler actions are resolved by reading the handler's source and scanning it for
//!     the labels it returns. States that cannot be resolved are skipped and reported as
//!     [`graph::Diagnostic`]s.
//! 4.  **Render**: [`render::DiagramRenderer`] or [`render::JsonRenderer`] consume the
//!     resulting [`graph::GraphIR`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botgraph::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let root = Path::new("bots/example");
//!
//!     let settings = BotSettingsFile.load_settings(root, DEFAULT_APP_NAME)?;
//!     let flows = FlowLoader::new(root).load(&settings)?;
//!
//!     let report = GraphBuilder::new(root).build(&flows)?;
//!     for diagnostic in report.failures() {
//!         println!("skipped: {}", diagnostic);
//!     }
//!
//!     let json = JsonRenderer.to_json_string(&report.ir)?;
//!     std::fs::write("graph.json", json)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod flow;
pub mod graph;
pub mod handler;
pub mod prelude;
pub mod render;
pub mod resolver;
pub mod settings;
