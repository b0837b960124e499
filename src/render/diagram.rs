use super::color::FlowColors;
use super::{GRAPH_NAME, GraphRenderer, INITIAL_FLOW, INITIAL_STATE};
use crate::error::RenderError;
use crate::graph::GraphIR;
use crate::resolver::QualifiedStateId;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

const RENDER_FORMAT: &str = "pdf";

/// Renders the graph as Graphviz DOT source.
///
/// The initial `default.root` state is drawn as a double circle, every other state as a
/// circle, each filled with the color of its flow.
pub struct DiagramRenderer {
    colors: FlowColors,
}

impl DiagramRenderer {
    pub fn new(colors: FlowColors) -> Self {
        Self { colors }
    }

    pub fn to_dot(&self, ir: &GraphIR) -> Result<String, RenderError> {
        if !ir.flows.iter().any(|f| f == INITIAL_FLOW) {
            return Err(RenderError::MissingInitialFlow(INITIAL_FLOW.to_string()));
        }
        let initial = QualifiedStateId::new(INITIAL_FLOW, INITIAL_STATE);

        let mut lines = vec![
            format!("digraph {} {{", GRAPH_NAME),
            "\trankdir=LR size=\"8,5\"".to_string(),
            format!(
                "\tnode [fillcolor=\"{}\" shape=doublecircle style=filled]",
                self.colors.get(INITIAL_FLOW)?
            ),
            format!("\t{}", quote(&initial.to_string())),
            "\tnode [shape=circle]".to_string(),
        ];

        let mut current_flow: Option<&str> = None;
        for node in ir.nodes.iter().filter(|n| n.id != initial) {
            if current_flow != Some(node.flow.as_str()) {
                lines.push(format!("\tnode [fillcolor=\"{}\"]", self.colors.get(&node.flow)?));
                current_flow = Some(node.flow.as_str());
            }
            lines.push(format!("\t{}", quote(&node.id.to_string())));
        }

        lines.extend(ir.edges.iter().map(|edge| {
            format!(
                "\t{} -> {}",
                quote(&edge.source.to_string()),
                quote(&edge.target.to_string())
            )
        }));
        lines.push("}".to_string());

        Ok(lines.join("\n") + "\n")
    }
}

impl GraphRenderer for DiagramRenderer {
    fn render(&self, ir: &GraphIR) -> Result<String, RenderError> {
        self.to_dot(ir)
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// A DOT layout file on disk and the image rendered from it.
pub struct DiagramArtifact {
    path: PathBuf,
    source: String,
}

impl DiagramArtifact {
    pub fn new(path: impl Into<PathBuf>, source: String) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the rendered image, `<layout file>.pdf`.
    pub fn image_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(RENDER_FORMAT);
        PathBuf::from(name)
    }

    /// Writes the DOT source.
    pub fn save(&self) -> Result<(), RenderError> {
        fs::write(&self.path, &self.source).map_err(|e| RenderError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        info!(path = %self.path.display(), "Saved graph layout");
        Ok(())
    }

    /// Runs Graphviz `dot` on the saved layout and returns the image path.
    pub fn render(&self) -> Result<PathBuf, RenderError> {
        let image = self.image_path();
        debug!(layout = %self.path.display(), image = %image.display(), "Running dot");
        let status = Command::new("dot")
            .arg(format!("-T{}", RENDER_FORMAT))
            .arg(&self.path)
            .arg("-o")
            .arg(&image)
            .status()
            .map_err(|e| RenderError::Graphviz(format!("failed to run 'dot': {}", e)))?;
        if !status.success() {
            return Err(RenderError::Graphviz(format!("'dot' exited with {}", status)));
        }
        info!(path = %image.display(), "Rendered graph");
        Ok(image)
    }

    /// Saves, renders and opens the image in the platform viewer.
    pub fn view(&self) -> Result<PathBuf, RenderError> {
        self.save()?;
        let image = self.render()?;
        open_viewer(&image)?;
        Ok(image)
    }
}

fn open_viewer(path: &Path) -> Result<(), RenderError> {
    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(path).status();
    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/C", "start", ""]).arg(path).status();
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let status = Command::new("xdg-open").arg(path).status();

    viewer_result(status)
}

fn viewer_result(status: io::Result<ExitStatus>) -> Result<(), RenderError> {
    let status =
        status.map_err(|e| RenderError::Graphviz(format!("failed to open viewer: {}", e)))?;
    if !status.success() {
        return Err(RenderError::Graphviz(format!("viewer exited with {}", status)));
    }
    Ok(())
}
