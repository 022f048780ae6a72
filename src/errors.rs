use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal configuration failures. Any of these aborts the load and no
/// `Configuration` is handed out.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not open '{}': {source}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error in '{}': malformed JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error in '{}': {message}", path.display())]
    Schema { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::FileNotFound { path, .. }
            | ConfigError::Io { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Schema { path, .. } => path.as_path(),
        }
    }

    /// The schema message without the path prefix, if this is a schema error.
    pub fn schema_message(&self) -> Option<&str> {
        match self {
            ConfigError::Schema { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// A recognized field carrying a value we could not understand. Reported,
/// never returned as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub path: PathBuf,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error in '{}': {}", self.path.display(), self.message)
    }
}

/// Failures raised by the downstream collaborators during startup.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network State Error: {0}")]
    NetworkState(String),

    #[error("Camera Server Error: {0}")]
    CameraServer(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),
}
