mod action;
mod builder;
mod diagnostic;
mod ir;

pub use action::ActionResolver;
pub use builder::{BuildReport, GraphBuilder};
pub use diagnostic::Diagnostic;
pub use ir::{Edge, GraphIR, Node};
