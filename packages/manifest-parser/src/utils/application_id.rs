//! Tizen package and application identifier formats.

use regex::Regex;
use std::sync::LazyLock;

/// Package id: 10 alphanumeric characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PACKAGE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{10}$").expect("valid regex"));

/// Application id: package id, a dot, then 1 to 52 alphanumeric characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static APPLICATION_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{10}\.[0-9a-zA-Z]{1,52}$").expect("valid regex"));

/// Validate a Tizen application id.
///
/// # Examples
/// ```
/// use manifest_parser::utils::validate_tizen_application_id;
///
/// assert!(validate_tizen_application_id("nNBDOItqjN.WebSettingSample"));
/// assert!(!validate_tizen_application_id("short.app"));
/// ```
#[must_use]
pub fn validate_tizen_application_id(id: &str) -> bool {
    APPLICATION_ID_PATTERN.is_match(id)
}

/// Validate a Tizen package id.
#[must_use]
pub fn validate_tizen_package_id(id: &str) -> bool {
    PACKAGE_ID_PATTERN.is_match(id)
}
