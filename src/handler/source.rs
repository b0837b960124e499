use super::lexer::strip_comments;
use crate::error::HandlerError;
use crate::flow::HandlerRef;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSION: &str = "py";
const PACKAGE_INIT: &str = "__init__.py";

/// The source text of one handler symbol, read statically from disk.
#[derive(Debug, Clone)]
pub struct HandlerSource {
    pub path: PathBuf,
    pub symbol: String,
    pub text: String,
}

impl HandlerSource {
    /// Locates the module named by `handler` and slices out the referenced symbol.
    ///
    /// The module is looked up under `project_root` first, then under `flow_dir`, the
    /// directory of the flow file that references it.
    pub fn load(
        handler: &HandlerRef,
        project_root: &Path,
        flow_dir: &Path,
    ) -> Result<Self, HandlerError> {
        let (container, symbol) = handler.split()?;
        let path = locate_module(container, &[project_root, flow_dir])?;

        let content = fs::read_to_string(&path).map_err(|e| HandlerError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let text = slice_symbol(&content, symbol).ok_or_else(|| HandlerError::SymbolNotFound {
            symbol: symbol.to_string(),
            path: path.clone(),
        })?;

        Ok(Self {
            path,
            symbol: symbol.to_string(),
            text,
        })
    }
}

/// Finds the file for a dotted module path, trying each root in order.
pub fn locate_module(container: &str, roots: &[&Path]) -> Result<PathBuf, HandlerError> {
    let relative: PathBuf = container.split('.').collect();
    let candidates: Vec<PathBuf> = roots
        .iter()
        .flat_map(|root| {
            [
                root.join(&relative).with_extension(SOURCE_EXTENSION),
                root.join(&relative).join(PACKAGE_INIT),
            ]
        })
        .unique()
        .collect();

    candidates
        .iter()
        .find(|c| c.is_file())
        .cloned()
        .ok_or_else(|| HandlerError::ModuleNotFound {
            module: container.to_string(),
            searched: candidates.iter().map(|c| c.display()).join(", "),
        })
}

/// Returns the `def`/`async def`/`class` block named `symbol`, header line included.
///
/// A module-level definition is preferred; a nested one (e.g. a method) is only used
/// when no top-level definition has that name.
///
/// The block runs over every following line that is blank or indented deeper than the
/// header. Comments and docstrings are ignored when deciding where the block ends.
pub fn slice_symbol(source: &str, symbol: &str) -> Option<String> {
    let stripped = strip_comments(source);
    let code_lines: Vec<&str> = stripped.split('\n').collect();
    let raw_lines: Vec<&str> = source.split('\n').collect();

    let start = code_lines
        .iter()
        .position(|l| indent_of(l) == 0 && is_header(l, symbol))
        .or_else(|| code_lines.iter().position(|l| is_header(l, symbol)))?;
    let header_indent = indent_of(code_lines[start]);

    let mut end = start + 1;
    let mut last_code = start;
    while end < code_lines.len() {
        let line = code_lines[end];
        if !line.trim().is_empty() {
            if indent_of(line) <= header_indent {
                break;
            }
            last_code = end;
        }
        end += 1;
    }

    Some(raw_lines[start..=last_code].join("\n"))
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_header(line: &str, symbol: &str) -> bool {
    let trimmed = line.trim_start();
    let trimmed = trimmed
        .strip_prefix("async")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map_or(trimmed, str::trim_start);

    ["def", "class"].into_iter().any(|keyword| {
        trimmed
            .strip_prefix(keyword)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .and_then(|rest| rest.trim_start().strip_prefix(symbol))
            .map(str::trim_start)
            .is_some_and(|after| after.starts_with('(') || (keyword == "class" && after.starts_with(':')))
    })
}
