//! IRI validation.

use url::Url;

/// Check whether `value` is an absolute IRI.
///
/// # Examples
/// ```
/// use manifest_parser::utils::is_valid_iri;
///
/// assert!(is_valid_iri("http://tizen.org/appcontrol/operation/view"));
/// assert!(!is_valid_iri("index.html"));
/// ```
#[must_use]
pub fn is_valid_iri(value: &str) -> bool {
    !value.is_empty() && Url::parse(value).is_ok()
}
