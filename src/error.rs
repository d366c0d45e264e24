use thiserror::Error;

/// Errors raised while fetching the step template catalog.
///
/// All of them are recoverable: the catalog keeps its last good template list
/// and the editor stays interactive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Step catalog provider failed: {0}")]
    Provider(String),

    #[error("Failed to parse step catalog payload: {0}")]
    Parse(String),

    #[error("Could not read step catalog '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors that stop a graph from being compiled into a job definition.
///
/// When one of these is returned no partial job is produced and the graph
/// is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Job name must not be empty")]
    EmptyJobName,

    #[error("Cannot compile a job without any nodes")]
    EmptyGraph,

    #[error("Node '{node_id}' uses step type '{step_type}', which no known template provides")]
    UnknownStepType { node_id: String, step_type: String },
}

/// Errors reading or writing persisted editor files (jobs, graphs, settings).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid JSON: {0}")]
    Json(String),
}
