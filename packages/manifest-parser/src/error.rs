//! Error types for the manifest parser.
//!
//! `HandlerError` is what a single handler reports from Parse or Validate.
//! `ManifestError` is what the framework surfaces to callers, wrapping the
//! first handler failure together with the key of the handler that raised it.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a manifest handler.
///
/// The display form is the bare message, so callers can surface it as the
/// single human-readable outcome of a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create a new handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for handler operations.
pub type HandlerResult<T> = std::result::Result<T, HandlerError>;

/// Main error type for the manifest parser library.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("Manifest file is missing or unreadable.")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// A handler rejected the manifest during Parse.
    #[error("{source}")]
    Parse {
        key: String,
        #[source]
        source: HandlerError,
    },

    /// A handler rejected its parsed data during Validate.
    #[error("{source}")]
    Validate {
        key: String,
        #[source]
        source: HandlerError,
    },

    /// Registered handlers depend on each other in a cycle.
    #[error("Manifest handlers have cyclic prerequisites: {}", .keys.join(", "))]
    PrerequisiteCycle { keys: Vec<String> },

    /// A phase was started before a manifest was installed.
    #[error("No manifest has been loaded")]
    NoManifest,
}

impl ManifestError {
    /// Key of the handler that caused the failure, if any.
    #[must_use]
    pub fn handler_key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. } | Self::Validate { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Result type alias for manifest parser operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
