//! Error types for widget config parsing.

use std::path::PathBuf;

use manifest_parser::ManifestError;
use thiserror::Error;

/// Main error type for the widget manifest library.
#[derive(Debug, Error)]
pub enum WidgetConfigError {
    /// Loading, parsing or validating the manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The icons entry was missing or shared when the package was checked.
    #[error("Failed to get icon info")]
    MissingIconInfo,

    /// Neither the declared content nor a default start file exists.
    #[error("Could not find valid start file")]
    NoValidStartFile,

    /// A service declares a start file that does not exist.
    #[error("Could not find valid service start file: {}", .0.display())]
    MissingServiceStartFile(PathBuf),

    /// Invalid platform version.
    #[error("Invalid platform version: '{0}'. Expected dotted numbers (e.g., 3.0)")]
    InvalidPlatformVersion(String),

    /// A package check failed after the manifest itself was accepted.
    #[error("{0}")]
    PackageCheck(String),

    /// The manifest path has no enclosing directory.
    #[error("Cannot determine widget directory of {}", .0.display())]
    NoPackageRoot(PathBuf),
}

/// Result type alias for widget config operations.
pub type Result<T> = std::result::Result<T, WidgetConfigError>;
