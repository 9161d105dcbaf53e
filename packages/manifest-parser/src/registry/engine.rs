//! Parse engine running the two-phase handler pipeline.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use super::core::ManifestHandlerRegistry;
use super::types::{ManifestData, ManifestDataMap, Validation};
use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;

/// Engine that runs every registered handler over a manifest.
///
/// Phase 1 (Parse) visits handlers in registration order and collects
/// their outputs into a [`ManifestDataMap`]. Phase 2 (Validate) visits the
/// handlers that produced an entry, prerequisites first. The first failure
/// in either phase stops the run; entries inserted before it stay in the
/// map.
pub struct ManifestParser {
    registry: ManifestHandlerRegistry,
    validation_order: Vec<usize>,
    manifest: Option<Manifest>,
    manifest_data: ManifestDataMap,
    error: Option<String>,
}

impl ManifestParser {
    /// Create a new engine with the given registry.
    ///
    /// # Errors
    /// Returns `ManifestError::PrerequisiteCycle` if handler prerequisites
    /// cannot be ordered.
    pub fn new(registry: ManifestHandlerRegistry) -> Result<Self> {
        let validation_order = registry.validation_order()?;
        Ok(Self {
            registry,
            validation_order,
            manifest: None,
            manifest_data: ManifestDataMap::new(),
            error: None,
        })
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ManifestHandlerRegistry {
        &self.registry
    }

    /// Load `path` as XML and run both phases on it.
    ///
    /// # Errors
    /// Returns the load error, or the first handler failure.
    pub fn parse_manifest_file(&mut self, path: &Path) -> Result<()> {
        match Manifest::load(path) {
            Ok(manifest) => self.parse_manifest(manifest),
            Err(err) => {
                self.manifest = None;
                self.manifest_data.clear();
                self.record(err)
            }
        }
    }

    /// Install `manifest` and run both phases on it.
    ///
    /// # Errors
    /// Returns the first handler failure.
    pub fn parse_manifest(&mut self, manifest: Manifest) -> Result<()> {
        self.set_manifest(manifest);
        self.parse_app_manifest()?;
        self.validate_app_manifest()
    }

    /// Install `manifest`, dropping the outputs and error of any previous run.
    pub fn set_manifest(&mut self, manifest: Manifest) {
        self.manifest = Some(manifest);
        self.manifest_data.clear();
        self.error = None;
    }

    /// Run the Parse phase over the installed manifest.
    ///
    /// # Errors
    /// Returns `ManifestError::NoManifest` if nothing was installed, or
    /// `ManifestError::Parse` for the first handler that rejects its input.
    pub fn parse_app_manifest(&mut self) -> Result<()> {
        let Some(manifest) = self.manifest.as_ref() else {
            return self.record(ManifestError::NoManifest);
        };

        let mut failure = None;
        for handler in self.registry.handlers() {
            let key = handler.key();
            if !manifest.has_path(key) && !handler.always_parse_for_key() {
                continue;
            }

            tracing::debug!(key = %key, "Parsing manifest section");
            match handler.parse(manifest) {
                Ok(Some(data)) => {
                    self.manifest_data.insert(key, Arc::from(data));
                }
                Ok(None) => {}
                Err(source) => {
                    tracing::warn!(error = %source, key = %key, "Manifest section rejected");
                    failure = Some(ManifestError::Parse {
                        key: key.to_string(),
                        source,
                    });
                    break;
                }
            }
        }

        match failure {
            Some(err) => self.record(err),
            None => Ok(()),
        }
    }

    /// Run the Validate phase over the current outputs.
    ///
    /// # Errors
    /// Returns `ManifestError::Validate` for the first handler that rejects
    /// its data.
    pub fn validate_app_manifest(&mut self) -> Result<()> {
        for &position in &self.validation_order {
            let Some(handler) = self.registry.handlers().nth(position) else {
                continue;
            };
            let key = handler.key();
            let Some(data) = self.manifest_data.get(key).cloned() else {
                continue;
            };

            let outcome = handler.validate(&*data, &self.manifest_data);
            match outcome {
                Ok(Validation::Accepted) => {}
                Ok(Validation::Replaced(updated)) => {
                    tracing::debug!(key = %key, "Validated data replaced");
                    self.manifest_data.insert(key, Arc::from(updated));
                }
                Err(source) => {
                    tracing::warn!(error = %source, key = %key, "Manifest validation failed");
                    let err = ManifestError::Validate {
                        key: key.to_string(),
                        source,
                    };
                    self.error = Some(err.to_string());
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, err: ManifestError) -> Result<()> {
        self.error = Some(err.to_string());
        Err(err)
    }

    /// Message of the last failure, if the last run failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The installed manifest.
    #[must_use]
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// All handler outputs.
    #[must_use]
    pub fn manifest_data_map(&self) -> &ManifestDataMap {
        &self.manifest_data
    }

    /// Untyped handle to the output stored under `key`.
    #[must_use]
    pub fn manifest_data(&self, key: &str) -> Option<Arc<dyn ManifestData>> {
        self.manifest_data.get(key).cloned()
    }

    /// Typed handle to the output stored under `key`.
    #[must_use]
    pub fn get_manifest_data<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.manifest_data.get_arc(key)
    }

    /// Mutable access to the output stored under `key`, for post-hoc
    /// rewriting. `None` while another handle to the entry is alive.
    pub fn access_manifest_data<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.manifest_data.get_mut_as(key)
    }

    /// Replace the output stored under `key`.
    pub fn set_manifest_data(&mut self, key: impl Into<String>, data: Arc<dyn ManifestData>) {
        self.manifest_data.insert(key, data);
    }

    /// Drop the output stored under `key`.
    pub fn erase_manifest_data(&mut self, key: &str) -> Option<Arc<dyn ManifestData>> {
        self.manifest_data.remove(key)
    }
}
