use crate::error::ResolveError;
use serde::Serialize;
use std::fmt;

/// Separator between the flow and state parts of a qualified identifier.
pub const SEPARATOR: char = '.';

/// A fully-qualified `(flow, state)` pair, rendered as `flow.state`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QualifiedStateId {
    pub flow: String,
    pub state: String,
}

impl QualifiedStateId {
    pub fn new(flow: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            flow: flow.into(),
            state: state.into(),
        }
    }
}

impl fmt::Display for QualifiedStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.flow, SEPARATOR, self.state)
    }
}

/// Resolves absolute (`flow.state`) and relative (`state`) references against the
/// known flow names.
#[derive(Debug, Clone, Default)]
pub struct StateResolver {
    flows: Vec<String>,
}

impl StateResolver {
    pub fn new(flows: Vec<String>) -> Self {
        Self { flows }
    }

    pub fn flows(&self) -> &[String] {
        &self.flows
    }

    /// Resolves `reference` in the context of `current_flow`.
    ///
    /// Every known flow name is tried as a prefix. When several match (one flow name is a
    /// prefix of another, e.g. `user` and `user.settings`), the last matching flow in load
    /// order wins. A reference with no matching prefix stays in `current_flow` unchanged.
    pub fn resolve(
        &self,
        current_flow: &str,
        reference: &str,
    ) -> Result<QualifiedStateId, ResolveError> {
        if self.flows.is_empty() {
            return Err(ResolveError::UninitializedState(reference.to_string()));
        }
        if reference.is_empty() {
            return Err(ResolveError::EmptyReference(current_flow.to_string()));
        }

        let mut resolved: Option<(&str, &str)> = None;
        for flow in &self.flows {
            if let Some(state) = reference
                .strip_prefix(flow.as_str())
                .and_then(|rest| rest.strip_prefix(SEPARATOR))
            {
                resolved = Some((flow.as_str(), state));
            }
        }

        let (flow, state) = resolved.unwrap_or((current_flow, reference));
        Ok(QualifiedStateId::new(flow, state))
    }
}
