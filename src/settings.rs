//! Host application settings.
//!
//! The chatbot framework keeps its list of flow files in its settings under the `BOTS`
//! key. Reading those settings is modelled as an explicit collaborator, [`SettingsSource`],
//! so the rest of the pipeline never bootstraps the framework itself.

use crate::error::SettingsError;
use crate::handler::strip_comments;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Application directory used when none is given.
pub const DEFAULT_APP_NAME: &str = "ExampleBot";

/// Settings key listing the flow-definition files.
pub const FLOW_KEY: &str = "BOTS";

/// The subset of host settings this tool needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Flow-definition file paths, relative to the bot root.
    pub flow_files: Vec<String>,
}

/// Provides the host settings for a bot rooted at `root`.
pub trait SettingsSource {
    fn load_settings(&self, root: &Path, app_name: &str) -> Result<Settings, SettingsError>;
}

/// Reads `bot_settings.{yaml,yml,json,py}` from `<root>/<app_name>/`.
///
/// Python settings are never executed; the `BOTS` list literal is located by a static
/// text scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotSettingsFile;

const STRUCTURED_CANDIDATES: [&str; 3] = ["bot_settings.yaml", "bot_settings.yml", "bot_settings.json"];
const PYTHON_CANDIDATE: &str = "bot_settings.py";

static BOTS_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)['"]BOTS['"]\s*:\s*\[(.*?)\]"#).expect("valid BOTS regex")
});
static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^'\n]*)'|"([^"\n]*)""#).expect("valid literal regex"));

#[derive(Deserialize)]
struct RawSettings {
    #[serde(rename = "BOT_CONFIG")]
    bot_config: Option<RawBotConfig>,
    #[serde(rename = "BOTS")]
    bots: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawBotConfig {
    #[serde(rename = "BOTS")]
    bots: Option<Vec<String>>,
}

impl SettingsSource for BotSettingsFile {
    fn load_settings(&self, root: &Path, app_name: &str) -> Result<Settings, SettingsError> {
        let app_dir = root.join(app_name);

        for candidate in STRUCTURED_CANDIDATES {
            let path = app_dir.join(candidate);
            if path.is_file() {
                debug!(path = %path.display(), "Reading structured settings");
                return Self::parse_structured(&path, &read(&path)?);
            }
        }

        let path = app_dir.join(PYTHON_CANDIDATE);
        if path.is_file() {
            debug!(path = %path.display(), "Scanning Python settings");
            return Self::parse_python(&path, &read(&path)?);
        }

        Err(SettingsError::NotFound(app_dir))
    }
}

impl BotSettingsFile {
    fn parse_structured(path: &Path, content: &str) -> Result<Settings, SettingsError> {
        let parse_error = |message: String| SettingsError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let raw: RawSettings = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        };

        let flow_files = raw
            .bot_config
            .and_then(|c| c.bots)
            .or(raw.bots)
            .unwrap_or_default();
        Self::finish(path, flow_files)
    }

    /// Extracts the string literals of the first `'BOTS': [...]` list in Python source.
    ///
    /// Comments and docstrings are removed first, so commented-out entries are not listed.
    pub fn parse_python(path: &Path, content: &str) -> Result<Settings, SettingsError> {
        let code = strip_comments(content);
        let flow_files = BOTS_LIST
            .captures(&code)
            .and_then(|caps| caps.get(1))
            .map(|list| {
                STRING_LITERAL
                    .captures_iter(list.as_str())
                    .filter_map(|c| c.get(1).or_else(|| c.get(2)))
                    .map(|m| m.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();
        Self::finish(path, flow_files)
    }

    fn finish(path: &Path, flow_files: Vec<String>) -> Result<Settings, SettingsError> {
        if flow_files.is_empty() {
            return Err(SettingsError::MissingFlowKey(path.to_path_buf()));
        }
        Ok(Settings { flow_files })
    }
}

fn read(path: &Path) -> Result<String, SettingsError> {
    fs::read_to_string(path).map_err(|e| SettingsError::Io {
        path: PathBuf::from(path),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_settings_are_scanned_not_executed() {
        let source = r#"
import os

BOT_CONFIG = {
    "WEBHOOK_URL": os.environ["URL"],
    'BOTS': [
        'ExampleBot/flows.yaml',  # main flows
        "ExampleBot/shop.yaml",
    ],
    "MSG_LIMIT_SECONDS": 15,
}
"#;
        let settings = BotSettingsFile::parse_python(Path::new("bot_settings.py"), source).unwrap();
        assert_eq!(
            settings.flow_files,
            vec!["ExampleBot/flows.yaml", "ExampleBot/shop.yaml"]
        );
    }

    #[test]
    fn commented_out_entries_are_not_flow_files() {
        let source = r#"
BOT_CONFIG = {
    # 'BOTS': ['ExampleBot/legacy.yaml'],
    'BOTS': [
        'ExampleBot/flows.yaml',
        # 'ExampleBot/old.yaml',
    ],
}
"#;
        let settings = BotSettingsFile::parse_python(Path::new("bot_settings.py"), source).unwrap();
        assert_eq!(settings.flow_files, vec!["ExampleBot/flows.yaml"]);
    }

    #[test]
    fn python_settings_without_bots_fail() {
        let result = BotSettingsFile::parse_python(Path::new("s.py"), "BOT_CONFIG = {}\n");
        assert!(matches!(result, Err(SettingsError::MissingFlowKey(_))));
    }

    #[test]
    fn structured_settings_accept_nested_or_flat_key() {
        let nested = "BOT_CONFIG:\n  BOTS:\n    - a.yaml\n";
        let flat = "BOTS: [b.yaml]\n";
        let p = Path::new("bot_settings.yaml");
        assert_eq!(
            BotSettingsFile::parse_structured(p, nested).unwrap().flow_files,
            vec!["a.yaml"]
        );
        assert_eq!(
            BotSettingsFile::parse_structured(p, flat).unwrap().flow_files,
            vec!["b.yaml"]
        );
    }
}
