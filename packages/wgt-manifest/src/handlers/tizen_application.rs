//! Handler for `<tizen:application>`.

use manifest_parser::utils::{
    get_one_or_many, validate_tizen_application_id, validate_tizen_package_id, VersionNumber,
};
use manifest_parser::{
    downcast_data, HandlerError, HandlerResult, Manifest, ManifestData, ManifestDataMap,
    ManifestHandler, Validation,
};

use super::unexpected_data;
use crate::config::{version, PlatformConfig, LAUNCH_MODE_MIN_VERSION, TIZEN_NAMESPACE};

const LAUNCH_MODES: &[&str] = &["caller", "group", "single"];
const DEFAULT_LAUNCH_MODE: &str = "single";

/// Identity and platform requirements of the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TizenApplicationInfo {
    pub id: String,
    pub package: String,
    pub required_version: String,
    pub launch_mode: String,
    pub ambient_support: bool,
}

impl TizenApplicationInfo {
    pub const KEY: &'static str = "widget.application";

    /// The declared required version, if it parses.
    #[must_use]
    pub fn required_version_number(&self) -> Option<VersionNumber> {
        VersionNumber::parse(&self.required_version)
    }
}

/// Parses the one tizen-namespaced `application` element.
///
/// The element is mandatory, so this handler always parses.
pub struct TizenApplicationHandler {
    platform: PlatformConfig,
}

impl TizenApplicationHandler {
    #[must_use]
    pub fn new(platform: PlatformConfig) -> Self {
        Self { platform }
    }
}

impl ManifestHandler for TizenApplicationHandler {
    fn key(&self) -> &str {
        TizenApplicationInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut tizen =
            get_one_or_many(manifest.value(), TizenApplicationInfo::KEY, TIZEN_NAMESPACE)
                .into_iter();
        let Some(app) = tizen.next() else {
            return Err(HandlerError::new(
                "Cannot find application element with tizen namespace \
                 or the tizen namespace prefix is incorrect.\n",
            ));
        };
        if tizen.next().is_some() {
            return Err(HandlerError::new(
                "There should be no more than one tizen:application element",
            ));
        }

        let mut info = TizenApplicationInfo {
            id: app.get_string("@id").unwrap_or_default().to_string(),
            package: app.get_string("@package").unwrap_or_default().to_string(),
            launch_mode: app.get_string("@launch_mode").unwrap_or_default().to_string(),
            ambient_support: app.get_string("@ambient_support") == Some("enable"),
            ..TizenApplicationInfo::default()
        };

        if let Some(required) = app.get_string("@required_version").filter(|v| !v.is_empty()) {
            let minimum = self.platform.minimum_version();
            info.required_version = match VersionNumber::parse(required) {
                Some(parsed) if parsed < minimum => {
                    tracing::debug!(
                        required = %required,
                        minimum = %minimum,
                        "Raising required_version to platform minimum"
                    );
                    minimum.to_string()
                }
                _ => required.to_string(),
            };
        }

        Ok(Some(Box::new(info)))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let app = downcast_data::<TizenApplicationInfo>(data).ok_or_else(unexpected_data)?;

        if !validate_tizen_application_id(&app.id) {
            return Err(HandlerError::new(
                "The id property of application element does not match the format\n",
            ));
        }
        if !validate_tizen_package_id(&app.package) {
            return Err(HandlerError::new(
                "The package property of application element does not match the format\n",
            ));
        }
        if !app.id.starts_with(&app.package) {
            return Err(HandlerError::new(
                "The application element property id does not start with package.\n",
            ));
        }
        if app.required_version.is_empty() {
            return Err(HandlerError::new(
                "The required_version property of application element does not exist.\n",
            ));
        }
        let supported = &self.platform.current_version;
        let Some(required) = app.required_version_number() else {
            return Err(HandlerError::new(
                "Cannot retrieve supported API version from widget",
            ));
        };
        if *supported < required {
            return Err(HandlerError::new(
                "The required_version of Tizen Web API is not supported.\n",
            ));
        }

        if required >= version(LAUNCH_MODE_MIN_VERSION) {
            if app.launch_mode.is_empty() {
                return Ok(Validation::replaced(TizenApplicationInfo {
                    launch_mode: DEFAULT_LAUNCH_MODE.to_string(),
                    ..app.clone()
                }));
            }
            if !LAUNCH_MODES.contains(&app.launch_mode.as_str()) {
                return Err(HandlerError::new("Wrong value of launch mode"));
            }
        } else if !app.launch_mode.is_empty() {
            return Err(HandlerError::new(
                "launch_mode attribute cannot be used for api version lower than 2.4",
            ));
        }

        Ok(Validation::Accepted)
    }

    fn always_parse_for_key(&self) -> bool {
        true
    }
}
