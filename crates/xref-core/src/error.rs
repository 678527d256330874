//! Error types for loading and checking benchmark/control trees

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cross-reference operations
#[derive(Debug, Error)]
pub enum XrefError {
    /// Directory traversal failed (unreadable directory, broken entry)
    #[error("Failed to walk '{root}': {source}")]
    WalkError {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A file could not be read
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML document did not match the expected shape
    #[error("Failed to parse {document} YAML '{path}': {source}")]
    YamlError {
        document: DocumentKind,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Missing or invalid configuration (root paths etc.)
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Which kind of document was being parsed when a YAML error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Benchmark,
    Control,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Benchmark => f.write_str("benchmark"),
            DocumentKind::Control => f.write_str("control"),
        }
    }
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Walk,
    Io,
    Parse,
    Config,
}

impl XrefError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            XrefError::WalkError { .. } => ErrorKind::Walk,
            XrefError::IoError { .. } => ErrorKind::Io,
            XrefError::YamlError { .. } => ErrorKind::Parse,
            XrefError::ConfigError { .. } => ErrorKind::Config,
        }
    }

    /// Path of the file or directory the error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            XrefError::WalkError { source, root } => Some(source.path().unwrap_or(root)),
            XrefError::IoError { path, .. } | XrefError::YamlError { path, .. } => Some(path),
            XrefError::ConfigError { .. } => None,
        }
    }

    /// Create a walk error rooted at `root`
    pub fn walk_error(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::WalkError {
            root: root.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a YAML error for the given document kind and path
    pub fn yaml_error(
        document: DocumentKind,
        path: impl Into<PathBuf>,
        source: serde_yaml::Error,
    ) -> Self {
        Self::YamlError {
            document,
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}
