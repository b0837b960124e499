use crate::error::{HandlerError, ResolveError};
use crate::resolver::QualifiedStateId;
use std::fmt;

/// A non-fatal finding recorded while building the graph.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// The state has no action and produces no edge.
    TerminalState(QualifiedStateId),
    /// The state's action declares no `next` state.
    FinalAction(QualifiedStateId),
    /// The state's handler could not be located or scanned; the state has no edges.
    HandlerFailed {
        state: QualifiedStateId,
        handler: String,
        error: HandlerError,
    },
    /// A single transition target could not be resolved and was dropped.
    UnresolvedTarget {
        state: QualifiedStateId,
        reference: String,
        error: ResolveError,
    },
    /// A flow declares the same state name more than once.
    DuplicateState(QualifiedStateId),
}

impl Diagnostic {
    /// The state this diagnostic is about.
    pub fn state(&self) -> &QualifiedStateId {
        match self {
            Diagnostic::TerminalState(state)
            | Diagnostic::FinalAction(state)
            | Diagnostic::DuplicateState(state)
            | Diagnostic::HandlerFailed { state, .. }
            | Diagnostic::UnresolvedTarget { state, .. } => state,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Diagnostic::HandlerFailed { .. } | Diagnostic::UnresolvedTarget { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TerminalState(s) => write!(f, "{} has no action", s),
            Diagnostic::FinalAction(s) => write!(f, "{} has an action without a next state", s),
            Diagnostic::HandlerFailed {
                state,
                handler,
                error,
            } => write!(f, "{}: handler '{}' skipped: {}", state, handler, error),
            Diagnostic::UnresolvedTarget {
                state,
                reference,
                error,
            } => write!(f, "{}: target '{}' skipped: {}", state, reference, error),
            Diagnostic::DuplicateState(s) => write!(f, "{} is declared more than once", s),
        }
    }
}
