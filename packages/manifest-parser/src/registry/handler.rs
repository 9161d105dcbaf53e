//! Manifest handler trait definition.

use super::types::{ManifestData, ManifestDataMap, Validation};
use crate::error::HandlerResult;
use crate::manifest::Manifest;

/// Trait for manifest section handlers.
///
/// A handler owns one manifest path (its key) and turns the values found
/// there into a typed [`ManifestData`]. Handlers take `&self` only: any
/// bookkeeping needed while walking elements lives in locals of `parse`, so
/// one instance can be reused across manifests.
pub trait ManifestHandler: Send + Sync {
    /// The manifest path this handler owns, also the key of its output.
    fn key(&self) -> &str;

    /// Read the manifest at (or below) [`key`](Self::key).
    ///
    /// `Ok(None)` means the feature is not used, which is not an error.
    ///
    /// # Errors
    /// Returns a `HandlerError` when the input is malformed.
    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>>;

    /// Re-check parsed data, optionally against other handlers' outputs.
    ///
    /// Default implementation accepts.
    ///
    /// # Errors
    /// Returns a `HandlerError` on a semantic violation.
    fn validate(
        &self,
        _data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        Ok(Validation::Accepted)
    }

    /// Keys of handlers whose parsed output `validate` reads.
    fn prerequisite_keys(&self) -> &[&str] {
        &[]
    }

    /// Whether `parse` runs even when the key path is absent.
    fn always_parse_for_key(&self) -> bool {
        false
    }
}
