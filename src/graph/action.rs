use super::diagnostic::Diagnostic;
use super::ir::Edge;
use crate::error::{HandlerError, ResolveError};
use crate::flow::{Action, HandlerRef, StateDefinition};
use crate::handler::{HandlerSource, TransitionScanner};
use crate::resolver::{QualifiedStateId, StateResolver};
use std::path::Path;
use tracing::{debug, info, warn};

/// Turns a state's action into outgoing edges.
pub struct ActionResolver<'a> {
    resolver: &'a StateResolver,
    scanner: &'a dyn TransitionScanner,
    project_root: &'a Path,
}

impl<'a> ActionResolver<'a> {
    pub fn new(
        resolver: &'a StateResolver,
        scanner: &'a dyn TransitionScanner,
        project_root: &'a Path,
    ) -> Self {
        Self {
            resolver,
            scanner,
            project_root,
        }
    }

    /// Computes the edges leaving `state` of `flow`.
    ///
    /// Failures local to the state (missing handler module or symbol, unresolvable
    /// target) are recorded in `diagnostics` and produce no edge. Only a resolver used
    /// before its flows are known is an error.
    pub fn edges_for_state(
        &self,
        flow: &str,
        state: &StateDefinition,
        flow_dir: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<Edge>, ResolveError> {
        let source = QualifiedStateId::new(flow, &state.name);

        match &state.action {
            Action::None => {
                debug!(state = %source, "Terminal state");
                diagnostics.push(Diagnostic::TerminalState(source));
                Ok(Vec::new())
            }
            Action::Final => {
                debug!(state = %source, "Action declares no next state");
                diagnostics.push(Diagnostic::FinalAction(source));
                Ok(Vec::new())
            }
            Action::Direct(next) => {
                let edges = self
                    .edge_to(&source, next, diagnostics)?
                    .into_iter()
                    .collect();
                Ok(edges)
            }
            Action::Computed(handler) => match self.scan_handler(handler, flow_dir) {
                Ok(labels) => {
                    info!(
                        state = %source,
                        handler = %handler,
                        returns = labels.len(),
                        "Adding edges from custom action"
                    );
                    let mut edges = Vec::with_capacity(labels.len());
                    for label in &labels {
                        edges.extend(self.edge_to(&source, label, diagnostics)?);
                    }
                    Ok(edges)
                }
                Err(error) => {
                    warn!(state = %source, handler = %handler, "Skipping custom action: {}", error);
                    diagnostics.push(Diagnostic::HandlerFailed {
                        state: source,
                        handler: handler.to_string(),
                        error,
                    });
                    Ok(Vec::new())
                }
            },
        }
    }

    fn scan_handler(&self, handler: &HandlerRef, flow_dir: &Path) -> Result<Vec<String>, HandlerError> {
        let source = HandlerSource::load(handler, self.project_root, flow_dir)?;
        debug!(path = %source.path.display(), symbol = %source.symbol, "Scanning handler source");
        Ok(self.scanner.scan(&source.text))
    }

    fn edge_to(
        &self,
        source: &QualifiedStateId,
        reference: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<Edge>, ResolveError> {
        match self.resolver.resolve(&source.flow, reference) {
            Ok(target) => {
                info!("Adding edge: {} -> {}", source, target);
                Ok(Some(Edge::new(source.clone(), target)))
            }
            Err(error @ ResolveError::UninitializedState(_)) => Err(error),
            Err(error) => {
                warn!(state = %source, reference, "Skipping transition: {}", error);
                diagnostics.push(Diagnostic::UnresolvedTarget {
                    state: source.clone(),
                    reference: reference.to_string(),
                    error,
                });
                Ok(None)
            }
        }
    }
}
