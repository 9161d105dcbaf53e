//! Manifest parser - pluggable handler framework for XML application manifests.
//!
//! An XML manifest is loaded into a generic [`Dictionary`] tree, then a set
//! of independently written handlers each turn one section of that tree
//! into typed data. Parsing runs in two phases: every handler parses its
//! section, then every handler that produced data validates it, with
//! access to the outputs of the handlers it declares as prerequisites.
//!
//! # Example
//!
//! ```
//! use manifest_parser::{Manifest, ManifestHandlerRegistry, ManifestParser};
//!
//! let manifest = Manifest::from_xml_str(
//!     r#"<widget xmlns="http://www.w3.org/ns/widgets" version="1.0"/>"#,
//! )
//! .unwrap();
//!
//! let mut parser = ManifestParser::new(ManifestHandlerRegistry::new()).unwrap();
//! parser.parse_manifest(manifest).unwrap();
//! assert!(parser.manifest_data_map().is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`values`]: Semi-structured value tree with path lookup
//! - [`manifest`]: The loaded manifest document
//! - [`registry`]: Handler trait, registry and two-phase parse engine
//! - [`xml`]: XML loading into the value tree
//! - [`utils`]: IRI, language tag, version and id validators, namespace helpers
//! - [`error`]: Error types and Result alias

pub mod error;
pub mod manifest;
pub mod registry;
pub mod utils;
pub mod values;
pub mod xml;

pub use error::{HandlerError, HandlerResult, ManifestError, Result};
pub use manifest::Manifest;
pub use registry::{
    downcast_data, ManifestData, ManifestDataMap, ManifestHandler, ManifestHandlerRegistry,
    ManifestParser, Validation,
};
pub use values::{Dictionary, Value};
