use super::definition::{Action, FlowDefinition, HandlerRef, StateDefinition};
use crate::error::FlowConversionError;
use serde_yaml::Value;
use tracing::warn;

/// A trait for raw documents that can be converted into `FlowDefinition`s.
///
/// This is the seam between the on-disk flow format and the graph builder. The loader
/// parses YAML or JSON into a `serde_yaml::Value` and hands it over through this trait,
/// so the builder never sees the document format itself.
///
/// Conversion is lenient below the document level: a flow without a `states` list becomes
/// an empty flow, and malformed states are skipped with a warning instead of failing the
/// whole document.
///
/// # Example
///
/// ```rust
/// use botgraph::flow::{Action, IntoFlows};
///
/// let doc: serde_yaml::Value = serde_yaml::from_str(
///     "default:\n  states:\n    - name: root\n      action:\n        next: greeting.hello\n",
/// )
/// .unwrap();
///
/// let flows = doc.into_flows().unwrap();
/// assert_eq!(flows[0].name, "default");
/// assert_eq!(flows[0].states[0].action, Action::Direct("greeting.hello".to_string()));
/// ```
pub trait IntoFlows {
    /// Consumes the document and converts it into flows in declaration order.
    fn into_flows(self) -> Result<Vec<FlowDefinition>, FlowConversionError>;
}

impl IntoFlows for Value {
    fn into_flows(self) -> Result<Vec<FlowDefinition>, FlowConversionError> {
        let mapping = match self {
            Value::Mapping(mapping) => mapping,
            // An empty document declares no flows.
            Value::Null => return Ok(Vec::new()),
            other => return Err(FlowConversionError::NotAMapping(kind(&other).to_string())),
        };

        let mut flows = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = scalar_to_string(&key)
                .ok_or_else(|| FlowConversionError::InvalidFlowName(kind(&key).to_string()))?;
            let states = convert_states(&name, &value);
            flows.push(FlowDefinition { name, states });
        }
        Ok(flows)
    }
}

fn convert_states(flow: &str, value: &Value) -> Vec<StateDefinition> {
    let Some(raw_states) = value.get("states").and_then(Value::as_sequence) else {
        warn!(flow, "Flow has no 'states' list; treating it as empty");
        return Vec::new();
    };

    raw_states
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match convert_state(raw) {
            Ok(state) => Some(state),
            Err(reason) => {
                warn!(flow, index, "Skipping malformed state: {}", reason);
                None
            }
        })
        .collect()
}

fn convert_state(raw: &Value) -> Result<StateDefinition, String> {
    if !raw.is_mapping() {
        return Err(format!("expected a mapping, found {}", kind(raw)));
    }
    let name = raw
        .get("name")
        .and_then(scalar_to_string)
        .ok_or_else(|| "missing or non-scalar 'name'".to_string())?;
    let action = convert_action(raw.get("action"))
        .map_err(|reason| format!("state '{}': {}", name, reason))?;

    Ok(StateDefinition { name, action })
}

fn convert_action(raw: Option<&Value>) -> Result<Action, String> {
    match raw {
        None | Some(Value::Null) => Ok(Action::None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Action::None),
        Some(Value::String(s)) => Ok(Action::Computed(HandlerRef::new(s.trim()))),
        Some(Value::Mapping(m)) if m.is_empty() => Ok(Action::None),
        Some(Value::Mapping(m)) => match m.get("next") {
            None | Some(Value::Null) => Ok(Action::Final),
            Some(next) => scalar_to_string(next)
                .filter(|s| !s.is_empty())
                .map(Action::Direct)
                .ok_or_else(|| format!("'next' must be a state name, found {}", kind(next))),
        },
        Some(other) => Err(format!("unsupported action of type {}", kind(other))),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
