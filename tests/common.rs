//! Common test utilities for building on-disk chatbot fixtures.
use botgraph::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway bot directory.
pub struct BotFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl BotFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Loads the given flow files and builds the graph.
    pub fn build(&self, flow_files: &[&str]) -> BuildReport {
        let settings = Settings {
            flow_files: flow_files.iter().map(|s| s.to_string()).collect(),
        };
        let flows = FlowLoader::new(self.root())
            .load(&settings)
            .expect("Failed to load flows");
        GraphBuilder::new(self.root())
            .build(&flows)
            .expect("Failed to build graph")
    }
}

/// Flows covering every action shape.
///
/// `default.root` -> `greeting.hello` (direct), `default.help` -> three handler returns,
/// `greeting.hello` is final, `greeting.bye` has no action.
#[allow(dead_code)]
pub const SIMPLE_FLOWS_YAML: &str = r#"
default:
  states:
    - name: root
      action:
        next: greeting.hello
    - name: help
      action: actions.router.route
greeting:
  states:
    - name: hello
      action:
        text: "Hi there!"
    - name: bye
"#;

/// Handler with one return per branch, plus decoys in comments and docstrings.
#[allow(dead_code)]
pub const ROUTER_PY: &str = r#"import random


def route(request):
    """Route the user.

    Never return 'docstring.state' from here.
    """
    # return "commented.out"
    if request == "greet":
        return "greeting.hello"
    elif request == "restart":
        return 'root'
    return "greeting.bye:"


def other():
    return "unrelated"
"#;

/// Shorthand for a qualified id.
#[allow(dead_code)]
pub fn qid(flow: &str, state: &str) -> QualifiedStateId {
    QualifiedStateId::new(flow, state)
}

/// Edge list of a report as `(source, target)` strings.
#[allow(dead_code)]
pub fn edge_strings(report: &BuildReport) -> Vec<(String, String)> {
    report
        .ir
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}
