//! Handler for `<tizen:setting>`.
//!
//! Settings may be split across several `tizen:setting` elements; each
//! attribute is taken from the first element that carries it.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation,
};

use super::tizen_application::TizenApplicationInfo;
use super::unexpected_data;
use crate::config::{
    version, PlatformConfig, Profile, ORIENTATION_AUTO_MIN_VERSION, TIZEN_NAMESPACE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Auto,
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallLocation {
    #[default]
    Auto,
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundMode {
    #[default]
    Shared,
    Exclusive,
}

/// Runtime settings of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingInfo {
    pub hwkey_enabled: bool,
    pub screen_orientation: Orientation,
    /// Whether `screen_orientation` was not given explicitly.
    pub orientation_defaulted: bool,
    pub encryption_enabled: bool,
    pub context_menu_enabled: bool,
    pub background_support_enabled: bool,
    pub install_location: InstallLocation,
    pub no_display: bool,
    pub indicator_presence: bool,
    pub backbutton_presence: bool,
    pub user_agent: String,
    pub sound_mode: SoundMode,
    pub background_vibration: bool,
}

impl SettingInfo {
    pub const KEY: &'static str = "widget.setting";
}

impl Default for SettingInfo {
    fn default() -> Self {
        Self {
            hwkey_enabled: true,
            screen_orientation: Orientation::Auto,
            orientation_defaulted: true,
            encryption_enabled: false,
            context_menu_enabled: true,
            background_support_enabled: false,
            install_location: InstallLocation::Auto,
            no_display: false,
            indicator_presence: true,
            backbutton_presence: false,
            user_agent: String::new(),
            sound_mode: SoundMode::Shared,
            background_vibration: false,
        }
    }
}

/// First value of `attribute` among the tizen setting elements.
fn find_attribute<'a>(settings: &[&'a Dictionary], attribute: &str) -> Option<&'a str> {
    settings
        .iter()
        .find_map(|setting| setting.get_string(attribute))
}

fn parse_orientation(value: &str) -> Option<Orientation> {
    match value.to_ascii_lowercase().as_str() {
        "portrait" => Some(Orientation::Portrait),
        "landscape" => Some(Orientation::Landscape),
        "auto" => Some(Orientation::Auto),
        _ => None,
    }
}

fn parse_install_location(value: &str) -> InstallLocation {
    match value.to_ascii_lowercase().as_str() {
        "internal-only" => InstallLocation::Internal,
        "prefer-external" => InstallLocation::External,
        _ => InstallLocation::Auto,
    }
}

/// Parses tizen `setting` elements.
///
/// On mobile and wearable profiles, widgets written for platforms before
/// automatic rotation keep a portrait orientation unless they ask otherwise.
pub struct SettingHandler {
    platform: PlatformConfig,
}

impl SettingHandler {
    #[must_use]
    pub fn new(platform: PlatformConfig) -> Self {
        Self { platform }
    }

    fn portrait_by_default(&self) -> bool {
        matches!(self.platform.profile, Profile::Mobile | Profile::Wearable)
    }
}

impl ManifestHandler for SettingHandler {
    fn key(&self) -> &str {
        SettingInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let settings = get_one_or_many(manifest.value(), SettingInfo::KEY, TIZEN_NAMESPACE);
        let find = |attribute: &str| find_attribute(&settings, attribute).unwrap_or_default();
        let enabled = |attribute: &str| find(attribute) == "enable";

        let mut info = SettingInfo {
            hwkey_enabled: find("@hwkey-event") != "disable",
            encryption_enabled: enabled("@encryption"),
            context_menu_enabled: find("@context-menu") != "disable",
            background_support_enabled: enabled("@background-support"),
            install_location: parse_install_location(find("@install-location")),
            no_display: find("@nodisplay").eq_ignore_ascii_case("true"),
            indicator_presence: enabled("@indicator-presence"),
            backbutton_presence: enabled("@backbutton-presence"),
            user_agent: find("@user-agent").to_string(),
            background_vibration: enabled("@background-vibration"),
            ..SettingInfo::default()
        };
        if find("@sound-mode").eq_ignore_ascii_case("exclusive") {
            info.sound_mode = SoundMode::Exclusive;
        }
        if let Some(orientation) = parse_orientation(find("@screen-orientation")) {
            info.screen_orientation = orientation;
            info.orientation_defaulted = false;
        }

        Ok(Some(Box::new(info)))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let info = downcast_data::<SettingInfo>(data).ok_or_else(unexpected_data)?;
        if !info.orientation_defaulted || !self.portrait_by_default() {
            return Ok(Validation::Accepted);
        }

        let Some(required) = handlers_output
            .get_as::<TizenApplicationInfo>(TizenApplicationInfo::KEY)
            .and_then(TizenApplicationInfo::required_version_number)
        else {
            return Err(HandlerError::new(
                "Cannot retrieve required API version from widget",
            ));
        };

        if required < version(ORIENTATION_AUTO_MIN_VERSION) {
            tracing::debug!(required = %required, "Defaulting screen orientation to portrait");
            return Ok(Validation::replaced(SettingInfo {
                screen_orientation: Orientation::Portrait,
                orientation_defaulted: true,
                ..info.clone()
            }));
        }
        Ok(Validation::Accepted)
    }

    fn prerequisite_keys(&self) -> &[&str] {
        &[TizenApplicationInfo::KEY]
    }
}
