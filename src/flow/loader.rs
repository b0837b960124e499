use super::conversion::IntoFlows;
use super::definition::FlowDefinition;
use crate::error::LoadError;
use crate::settings::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The flows declared by a single flow-definition file.
#[derive(Debug, Clone, Default)]
pub struct FlowFile {
    pub path: PathBuf,
    pub flows: Vec<FlowDefinition>,
}

impl FlowFile {
    /// Directory containing this file; handler lookups fall back to it.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Every loaded flow, grouped by file, in load order.
///
/// Flow names are unique across the set: inserting a flow whose name is already known
/// removes the earlier definition, so the last-loaded file wins.
#[derive(Debug, Clone, Default)]
pub struct FlowSet {
    files: Vec<FlowFile>,
}

impl FlowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the flows of one file, replacing any previously loaded flow of the same name.
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, flows: Vec<FlowDefinition>) {
        let path = path.into();
        let mut kept: Vec<FlowDefinition> = Vec::with_capacity(flows.len());

        for flow in flows {
            for file in &mut self.files {
                let before = file.flows.len();
                file.flows.retain(|f| f.name != flow.name);
                if file.flows.len() != before {
                    warn!(
                        flow = %flow.name,
                        previous = %file.path.display(),
                        current = %path.display(),
                        "Duplicate flow name; the later definition replaces the earlier one"
                    );
                }
            }
            if let Some(existing) = kept.iter_mut().find(|f| f.name == flow.name) {
                *existing = flow;
            } else {
                kept.push(flow);
            }
        }

        self.files.push(FlowFile { path, flows: kept });
    }

    pub fn files(&self) -> &[FlowFile] {
        &self.files
    }

    /// Iterates over `(file, flow)` pairs in file order, then declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlowFile, &FlowDefinition)> {
        self.files
            .iter()
            .flat_map(|file| file.flows.iter().map(move |flow| (file, flow)))
    }

    pub fn flow_names(&self) -> Vec<String> {
        self.iter().map(|(_, flow)| flow.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FlowDefinition> {
        self.iter().map(|(_, f)| f).find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the flow-definition files listed in the host settings.
pub struct FlowLoader {
    root: PathBuf,
}

impl FlowLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loads every file named in `settings`. The first unreadable or unparseable file
    /// aborts the load.
    pub fn load(&self, settings: &Settings) -> Result<FlowSet, LoadError> {
        let mut set = FlowSet::new();
        for relative in &settings.flow_files {
            let path = self.resolve_path(relative);
            let flows = Self::load_file(&path)?;
            debug!(path = %path.display(), flows = flows.len(), "Loaded flow file");
            set.insert_file(path, flows);
        }
        Ok(set)
    }

    /// Reads and converts a single flow file.
    pub fn load_file(path: &Path) -> Result<Vec<FlowDefinition>, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document: serde_yaml::Value = if is_json {
            serde_json::from_str(&content).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        document.into_flows().map_err(|source| LoadError::Conversion {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve_path(&self, relative: &str) -> PathBuf {
        // Settings may spell paths as "/App/flows.yaml", meaning relative to the root.
        let joined = self.root.join(relative.trim_start_matches(['/', '\\']));
        std::path::absolute(&joined).unwrap_or(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Action, StateDefinition};

    fn flow(name: &str, states: &[&str]) -> FlowDefinition {
        FlowDefinition::new(
            name,
            states
                .iter()
                .map(|s| StateDefinition::new(*s, Action::None))
                .collect(),
        )
    }

    #[test]
    fn later_file_replaces_duplicate_flow() {
        let mut set = FlowSet::new();
        set.insert_file("a.yaml", vec![flow("default", &["root"]), flow("shop", &["a"])]);
        set.insert_file("b.yaml", vec![flow("shop", &["b", "c"])]);

        assert_eq!(set.flow_names(), vec!["default", "shop"]);
        let shop = set.get("shop").unwrap();
        assert_eq!(shop.states.len(), 2);
        assert_eq!(set.files()[0].flows.len(), 1);
        assert_eq!(set.files()[1].path, PathBuf::from("b.yaml"));
    }

    #[test]
    fn duplicate_within_one_file_keeps_last() {
        let mut set = FlowSet::new();
        set.insert_file("a.yaml", vec![flow("x", &["one"]), flow("x", &["two"])]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("x").unwrap().states[0].name, "two");
    }
}
