use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the host application's settings.
#[derive(Error, Debug, Clone)]
pub enum SettingsError {
    #[error("No settings file found in '{0}'")]
    NotFound(PathBuf),

    #[error("Failed to read settings file '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse settings file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Settings file '{0}' does not list any flow files under 'BOTS'")]
    MissingFlowKey(PathBuf),
}

/// Errors that can occur when converting a raw flow document into `FlowDefinition`s.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Flow document must be a mapping of flow names, found {0}")]
    NotAMapping(String),

    #[error("Flow name must be a string, found {0}")]
    InvalidFlowName(String),
}

/// Errors that can occur while loading flow-definition files. All of them abort the run.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Failed to read flow file '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse flow file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid flow file '{path}': {source}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: FlowConversionError,
    },
}

/// Errors raised by the state reference resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Flows have not been initialized; cannot resolve state reference '{0}'")]
    UninitializedState(String),

    #[error("Cannot resolve an empty state reference in flow '{0}'")]
    EmptyReference(String),
}

/// Errors that can occur while locating and scanning custom handler source.
#[derive(Error, Debug, Clone)]
pub enum HandlerError {
    #[error("'{0}' is not a dotted handler reference of the form 'module.symbol'")]
    InvalidReference(String),

    #[error("Handler module '{module}' not found (searched: {searched})")]
    ModuleNotFound { module: String, searched: String },

    #[error("Symbol '{symbol}' not found in '{path}'")]
    SymbolNotFound { symbol: String, path: PathBuf },

    #[error("Failed to read handler source '{path}': {message}")]
    Io { path: PathBuf, message: String },
}

/// Errors that can occur while producing an output artifact.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Initial flow '{0}' is not among the loaded flows")]
    MissingInitialFlow(String),

    #[error("No color assigned to flow '{0}'")]
    MissingFlowColor(String),

    #[error("Failed to write '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to serialize graph to JSON: {0}")]
    Json(String),

    #[error("Graphviz rendering failed: {0}")]
    Graphviz(String),
}

/// Top-level error for a complete extraction run.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
