use crate::error::HandlerError;
use std::fmt;

/// A named collection of states representing one conversational sub-dialogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowDefinition {
    pub name: String,
    pub states: Vec<StateDefinition>,
}

impl FlowDefinition {
    pub fn new(name: impl Into<String>, states: Vec<StateDefinition>) -> Self {
        Self {
            name: name.into(),
            states,
        }
    }

    pub fn state(&self, name: &str) -> Option<&StateDefinition> {
        self.states.iter().find(|s| s.name == name)
    }
}

/// A single node of a flow's dialogue graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDefinition {
    pub name: String,
    pub action: Action,
}

impl StateDefinition {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }
}

/// What happens when a state is left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action at all; the state is terminal.
    None,
    /// A structured action without a `next` field; explicitly terminal.
    Final,
    /// Static transition to the referenced state.
    Direct(String),
    /// Transition computed by a custom handler function.
    Computed(HandlerRef),
}

impl Action {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Action::None | Action::Final)
    }
}

/// A dotted `module.path.symbol` reference to handler code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRef {
    raw: String,
}

impl HandlerRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Splits the reference into its container path and final symbol name.
    pub fn split(&self) -> Result<(&str, &str), HandlerError> {
        let (container, symbol) = self
            .raw
            .rsplit_once('.')
            .ok_or_else(|| HandlerError::InvalidReference(self.raw.clone()))?;

        if symbol.is_empty() || container.split('.').any(str::is_empty) {
            return Err(HandlerError::InvalidReference(self.raw.clone()));
        }
        Ok((container, symbol))
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
