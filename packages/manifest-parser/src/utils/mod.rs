//! Leaf validators and lookup helpers used by handlers.

mod application_id;
mod iri;
mod language_tag;
mod namespace;
mod version_number;

pub use application_id::{validate_tizen_application_id, validate_tizen_package_id};
pub use iri::is_valid_iri;
pub use language_tag::validate_language_tag;
pub use namespace::{get_one_or_many, verify_element_namespace};
pub use version_number::{InvalidVersionNumber, VersionNumber};

pub use crate::xml::collapse_whitespace;
