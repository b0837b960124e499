use super::{EDGE_WEIGHT, GraphRenderer};
use crate::error::RenderError;
use crate::graph::GraphIR;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// `{nodes: [{id, group}], links: [{source, target, value}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonGraph {
    pub nodes: Vec<JsonNode>,
    pub links: Vec<JsonLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonNode {
    pub id: String,
    /// 1-based index of the owning flow.
    pub group: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonLink {
    pub source: String,
    pub target: String,
    pub value: u32,
}

/// Exports the graph as node/link JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Links to unknown nodes are logged and left out.
    pub fn to_json(&self, ir: &GraphIR) -> JsonGraph {
        let nodes: Vec<JsonNode> = ir
            .nodes
            .iter()
            .map(|node| JsonNode {
                id: node.id.to_string(),
                group: ir.flow_group(&node.flow).unwrap_or_default(),
            })
            .collect();

        let known: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let links = ir
            .edges
            .iter()
            .filter_map(|edge| {
                let source = edge.source.to_string();
                let target = edge.target.to_string();
                if known.contains(source.as_str()) && known.contains(target.as_str()) {
                    Some(JsonLink {
                        source,
                        target,
                        value: EDGE_WEIGHT,
                    })
                } else {
                    warn!("Omitting link {} -> {}: unknown node", source, target);
                    None
                }
            })
            .collect();

        JsonGraph { nodes, links }
    }

    pub fn to_json_string(&self, ir: &GraphIR) -> Result<String, RenderError> {
        serde_json::to_string_pretty(&self.to_json(ir)).map_err(|e| RenderError::Json(e.to_string()))
    }

    pub fn write(&self, ir: &GraphIR, path: &Path) -> Result<(), RenderError> {
        let content = self.to_json_string(ir)?;
        fs::write(path, content).map_err(|e| RenderError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "Saved graph JSON");
        Ok(())
    }
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, ir: &GraphIR) -> Result<String, RenderError> {
        self.to_json_string(ir)
    }
}
