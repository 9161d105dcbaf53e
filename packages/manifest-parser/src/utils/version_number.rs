//! Dotted numeric version numbers (`2.4`, `3.0.1`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A version made of dot-separated non-negative integers.
///
/// Comparison pads the shorter version with zeros, so `2.4` equals `2.4.0`.
#[derive(Debug, Clone)]
pub struct VersionNumber {
    components: Vec<u32>,
}

impl VersionNumber {
    #[must_use]
    pub fn new(components: Vec<u32>) -> Self {
        Self { components }
    }

    /// Parse `value`, returning `None` unless every component is a number.
    ///
    /// # Examples
    /// ```
    /// use manifest_parser::utils::VersionNumber;
    ///
    /// let required = VersionNumber::parse("2.4").unwrap();
    /// assert!(required >= VersionNumber::parse("2.3.1").unwrap());
    /// assert!(VersionNumber::parse("2.x").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let components = value
            .trim()
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u32>().ok()
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { components })
    }

    /// Whether `value` is a parseable version.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_some()
    }

    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    #[must_use]
    pub fn major(&self) -> u32 {
        self.components.first().copied().unwrap_or_default()
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let left = self.components.get(i).copied().unwrap_or_default();
            let right = other.components.get(i).copied().unwrap_or_default();
            match left.cmp(&right) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Error returned when a string is not a version number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid version number: '{0}'")]
pub struct InvalidVersionNumber(pub String);

impl FromStr for VersionNumber {
    type Err = InvalidVersionNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidVersionNumber(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(value: &str) -> VersionNumber {
        VersionNumber::parse(value).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(v("2.2.1").components(), &[2, 2, 1]);
        assert_eq!(v(" 3.0 ").to_string(), "3.0");
        assert_eq!(v("4").major(), 4);
        for invalid in ["", "2.", ".4", "2..4", "2.4a", "-1", "2.+4"] {
            assert!(VersionNumber::parse(invalid).is_none(), "{invalid}");
        }
    }

    #[test]
    fn test_ordering_pads_with_zeros() {
        assert_eq!(v("2.4"), v("2.4.0"));
        assert!(v("2.4") > v("2.3.9"));
        assert!(v("2.10") > v("2.9"));
        assert!(v("3.0") >= v("2.4"));
        assert!(v("2.2.1") < v("2.3"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2.4".parse::<VersionNumber>().unwrap(), v("2.4"));
        let err = "two".parse::<VersionNumber>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid version number: 'two'");
    }
}
