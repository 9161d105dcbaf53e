//! BCP 47 language tag well-formedness.

use regex::Regex;
use std::sync::LazyLock;

/// Well-formed language tag: langtag, private use or irregular `i-` tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LANGUAGE_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:[a-z]{2,3}(?:-[a-z]{3}){0,3}|[a-z]{4}|[a-z]{5,8})",
        r"(?:-[a-z]{4})?",
        r"(?:-(?:[a-z]{2}|[0-9]{3}))?",
        r"(?:-(?:[a-z0-9]{5,8}|[0-9][a-z0-9]{3}))*",
        r"(?:-[0-9a-wyz](?:-[a-z0-9]{2,8})+)*",
        r"(?:-x(?:-[a-z0-9]{1,8})+)?",
        r"|x(?:-[a-z0-9]{1,8})+",
        r"|i-[a-z]{2,8}",
        r")$"
    ))
    .expect("valid regex")
});

/// Check whether `tag` is a well-formed BCP 47 language tag.
///
/// # Examples
/// ```
/// use manifest_parser::utils::validate_language_tag;
///
/// assert!(validate_language_tag("en-US"));
/// assert!(!validate_language_tag("en_US"));
/// ```
#[must_use]
pub fn validate_language_tag(tag: &str) -> bool {
    LANGUAGE_TAG_PATTERN.is_match(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tags() {
        for tag in [
            "en",
            "pl",
            "en-US",
            "en-gb",
            "zh-Hant-TW",
            "de-DE-1996",
            "sl-rozaj-biske",
            "es-419",
            "en-a-bbb-x-private",
            "x-whatever",
            "i-klingon",
        ] {
            assert!(validate_language_tag(tag), "{tag} should be valid");
        }
    }

    #[test]
    fn test_invalid_tags() {
        for tag in ["", "en_US", "en-", "-en", "!!", "english-language-tag", "e"] {
            assert!(!validate_language_tag(tag), "{tag} should be invalid");
        }
    }
}
