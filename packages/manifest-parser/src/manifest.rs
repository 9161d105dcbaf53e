//! The loaded manifest document.

use std::fs;
use std::path::Path;

use crate::error::{ManifestError, Result};
use crate::values::{Dictionary, Value};
use crate::xml::load_xml_document;

/// A manifest document rooted at a single dictionary.
///
/// The root dictionary holds one key per document root element, so every
/// handler path for a widget config starts with `widget.`. The manifest is
/// pure storage: no validation happens here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    data: Dictionary,
}

impl Manifest {
    #[must_use]
    pub fn new(data: Dictionary) -> Self {
        Self { data }
    }

    /// Build a manifest from XML text.
    ///
    /// # Errors
    /// Returns `ManifestError::XmlParse` if the text is not well-formed XML.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Ok(Self::new(load_xml_document(xml)?))
    }

    /// Load a manifest from an XML file.
    ///
    /// # Errors
    /// Returns `ManifestError::Unreadable` if the file cannot be read and
    /// `ManifestError::XmlParse` if it is not well-formed XML.
    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path).map_err(|source| ManifestError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml_str(&xml)
    }

    #[must_use]
    pub fn value(&self) -> &Dictionary {
        &self.data
    }

    /// Mutable access to the root, for building fixtures.
    pub fn value_mut(&mut self) -> &mut Dictionary {
        &mut self.data
    }

    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.data.has_path(path)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.data.get(path)
    }

    #[must_use]
    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.data.get_string(path)
    }

    #[must_use]
    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.data.get_integer(path)
    }
}

impl From<Dictionary> for Manifest {
    fn from(data: Dictionary) -> Self {
        Self::new(data)
    }
}
