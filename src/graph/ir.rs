use crate::resolver::QualifiedStateId;
use ahash::AHashSet;
use serde::Serialize;

/// A state node tagged with its owning flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: QualifiedStateId,
    pub flow: String,
}

/// A directed transition between two qualified states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: QualifiedStateId,
    pub target: QualifiedStateId,
}

impl Edge {
    pub fn new(source: QualifiedStateId, target: QualifiedStateId) -> Self {
        Self { source, target }
    }
}

/// The renderer-agnostic graph of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphIR {
    pub flows: Vec<String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphIR {
    pub fn contains_node(&self, id: &QualifiedStateId) -> bool {
        self.nodes.iter().any(|n| &n.id == id)
    }

    /// Edges whose source or target is not a known node.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let known: AHashSet<&QualifiedStateId> = self.nodes.iter().map(|n| &n.id).collect();
        self.edges
            .iter()
            .filter(|e| !known.contains(&e.source) || !known.contains(&e.target))
            .collect()
    }

    /// 1-based position of `flow` in the flow list.
    pub fn flow_group(&self, flow: &str) -> Option<usize> {
        self.flows.iter().position(|f| f == flow).map(|i| i + 1)
    }
}
