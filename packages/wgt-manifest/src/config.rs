//! Configuration constants and validation functions for widget parsing.

use std::fmt;

use manifest_parser::utils::VersionNumber;

use crate::error::{Result, WidgetConfigError};

/// Namespace of Tizen extension elements.
pub const TIZEN_NAMESPACE: &str = "http://tizen.org/ns/widgets";

/// Namespace of W3C widget elements.
pub const WIDGET_NAMESPACE: &str = "http://www.w3.org/ns/widgets";

/// Platform version assumed when none is configured.
pub const DEFAULT_PLATFORM_VERSION: &str = "3.0";

/// Versions from which the version-gated attributes (`launch_mode`,
/// app-control `reload`) are accepted.
pub const LAUNCH_MODE_MIN_VERSION: &str = "2.4";

/// Version below which a defaulted orientation falls back to portrait on
/// mobile and wearable profiles.
pub const ORIENTATION_AUTO_MIN_VERSION: &str = "3.0";

/// Device profile the widget is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Profile {
    #[default]
    Mobile,
    Wearable,
    Tv,
}

impl Profile {
    /// Lowest `required_version` the profile accepts; lower values are raised.
    #[must_use]
    pub fn minimum_platform_version(self) -> &'static str {
        match self {
            Profile::Mobile => "2.2.1",
            Profile::Wearable | Profile::Tv => "2.3",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Mobile => "mobile",
            Profile::Wearable => "wearable",
            Profile::Tv => "tv",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform the manifest is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub profile: Profile,
    pub current_version: VersionNumber,
}

impl PlatformConfig {
    #[must_use]
    pub fn new(profile: Profile, current_version: VersionNumber) -> Self {
        Self {
            profile,
            current_version,
        }
    }

    /// Lowest `required_version` accepted on this platform.
    #[must_use]
    pub fn minimum_version(&self) -> VersionNumber {
        version(self.profile.minimum_platform_version())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::new(Profile::default(), version(DEFAULT_PLATFORM_VERSION))
    }
}

/// Parse one of the version constants above.
pub(crate) fn version(value: &str) -> VersionNumber {
    VersionNumber::parse(value).unwrap_or_else(|| {
        tracing::error!(version = %value, "Invalid built-in version constant");
        VersionNumber::new(vec![0])
    })
}

/// Validate a platform version given on the command line.
///
/// # Examples
/// ```
/// use wgt_manifest::config::validate_platform_version;
///
/// assert!(validate_platform_version("2.4").is_ok());
/// assert!(validate_platform_version("four").is_err());
/// ```
///
/// # Errors
/// Returns `WidgetConfigError::InvalidPlatformVersion` if `value` is not a
/// dotted numeric version.
pub fn validate_platform_version(value: &str) -> Result<VersionNumber> {
    VersionNumber::parse(value)
        .ok_or_else(|| WidgetConfigError::InvalidPlatformVersion(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_versions() {
        assert_eq!(Profile::Mobile.minimum_platform_version(), "2.2.1");
        assert_eq!(Profile::Tv.minimum_platform_version(), "2.3");
        assert_eq!(
            PlatformConfig::new(Profile::Wearable, version("3.0")).minimum_version(),
            version("2.3")
        );
    }

    #[test]
    fn test_default_platform() {
        let config = PlatformConfig::default();
        assert_eq!(config.profile, Profile::Mobile);
        assert_eq!(config.current_version.to_string(), DEFAULT_PLATFORM_VERSION);
    }

    #[test]
    fn test_validate_platform_version() {
        assert_eq!(validate_platform_version("4.0").unwrap(), version("4"));
        let err = validate_platform_version("x.y").unwrap_err();
        assert!(err.to_string().contains("'x.y'"));
    }
}
