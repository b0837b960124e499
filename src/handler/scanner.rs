use super::lexer::strip_comments;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const RETURN_KEYWORD: &str = "return";

static RETURN_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\b").expect("valid return regex"));

/// Finds the state labels a handler function can return.
///
/// Implementations receive the source text of a single handler symbol.
pub trait TransitionScanner: Send + Sync {
    fn scan(&self, source: &str) -> Vec<String>;
}

/// Text-level scanner: strips comments, then reads the literal after every `return`.
///
/// This works for handlers that return plain labels. Values built by concatenation,
/// conditional expressions or indirection are not understood.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScanner;

impl TransitionScanner for HeuristicScanner {
    fn scan(&self, source: &str) -> Vec<String> {
        let text = strip_comments(source);
        return_positions(&text)
            .into_iter()
            .filter_map(|pos| {
                let label = extract_label(&text, pos);
                if label.is_none() {
                    debug!(offset = pos, "Skipping return without a label");
                }
                label
            })
            .collect()
    }
}

/// Byte offsets of every `return` keyword bounded by non-word characters.
pub fn return_positions(text: &str) -> Vec<usize> {
    RETURN_TOKEN.find_iter(text).map(|m| m.start()).collect()
}

/// Reads the returned label for the `return` keyword at byte offset `pos`.
///
/// Exactly one separating character is skipped, then the first whitespace-delimited
/// token on the rest of the line is taken, surrounding quotes are stripped and a single
/// trailing `:` is dropped.
pub fn extract_label(text: &str, pos: usize) -> Option<String> {
    let after = text.get(pos + RETURN_KEYWORD.len()..)?;
    let mut chars = after.chars();
    if matches!(chars.next(), None | Some('\n')) {
        return None;
    }
    let rest = chars.as_str();
    let line = rest.split('\n').next().unwrap_or_default();

    let token = line.split_whitespace().next()?;
    let unquoted = token.trim_matches(['\'', '"']);
    let label = unquoted.strip_suffix(':').unwrap_or(unquoted);

    (!label.is_empty()).then(|| label.to_string())
}
