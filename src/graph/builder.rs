use super::action::ActionResolver;
use super::diagnostic::Diagnostic;
use super::ir::{GraphIR, Node};
use crate::error::ResolveError;
use crate::flow::FlowSet;
use crate::handler::{HeuristicScanner, TransitionScanner};
use crate::resolver::{QualifiedStateId, StateResolver};
use ahash::AHashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// The graph of a run together with everything that was skipped while building it.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub ir: GraphIR,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }
}

/// Builds the `GraphIR` from a loaded `FlowSet`.
pub struct GraphBuilder {
    project_root: PathBuf,
    scanner: Box<dyn TransitionScanner>,
}

impl GraphBuilder {
    /// Creates a builder that looks up handler modules under `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            scanner: Box::new(HeuristicScanner),
        }
    }

    /// Replaces the default text scanner used for computed actions.
    pub fn with_scanner(mut self, scanner: Box<dyn TransitionScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// Flattens every flow into nodes and edges, in file order then declaration order.
    pub fn build(&self, flow_set: &FlowSet) -> Result<BuildReport, ResolveError> {
        let flows = flow_set.flow_names();
        let resolver = StateResolver::new(flows.clone());
        let actions = ActionResolver::new(&resolver, self.scanner.as_ref(), &self.project_root);

        let mut report = BuildReport {
            ir: GraphIR {
                flows,
                ..GraphIR::default()
            },
            diagnostics: Vec::new(),
        };

        let mut seen: AHashSet<QualifiedStateId> = AHashSet::new();
        for (_, flow) in flow_set.iter() {
            for state in &flow.states {
                let id = QualifiedStateId::new(&flow.name, &state.name);
                if seen.insert(id.clone()) {
                    report.ir.nodes.push(Node {
                        id,
                        flow: flow.name.clone(),
                    });
                } else {
                    warn!(state = %id, "State declared more than once in its flow");
                    report.diagnostics.push(Diagnostic::DuplicateState(id));
                }
            }
        }

        for (file, flow) in flow_set.iter() {
            for state in &flow.states {
                let edges = actions.edges_for_state(
                    &flow.name,
                    state,
                    file.directory(),
                    &mut report.diagnostics,
                )?;
                report.ir.edges.extend(edges);
            }
        }

        info!(
            flows = report.ir.flows.len(),
            nodes = report.ir.nodes.len(),
            edges = report.ir.edges.len(),
            skipped = report.failures().count(),
            "Built state graph"
        );
        Ok(report)
    }
}
