//! Handlers for the sections of a widget `config.xml`.
//!
//! Each handler owns one manifest key and produces a typed `*Info` value.
//! Every info type exposes its key as an associated `KEY` constant, which is
//! what callers pass to `get_manifest_data`.

pub mod account;
pub mod app_control;
pub mod app_widget;
pub mod application_icons;
pub mod background_category;
pub mod category;
pub mod content;
pub mod csp;
pub mod ime;
pub mod metadata;
pub mod navigation;
pub mod permissions;
pub mod service;
pub mod setting;
pub mod splash_screen;
pub mod tizen_application;
pub mod warp;
pub mod widget;

use manifest_parser::HandlerError;

pub use account::{AccountHandler, AccountIcon, AccountInfo, SingleAccountInfo};
pub use app_control::{AppControlHandler, AppControlInfo, AppControlInfoList};
pub use app_widget::{
    AppWidget, AppWidgetHandler, AppWidgetInfo, AppWidgetSize, AppWidgetSizeType,
};
pub use application_icons::{ApplicationIcon, ApplicationIconsHandler, ApplicationIconsInfo};
pub use background_category::{BackgroundCategoryHandler, BackgroundCategoryInfoList};
pub use category::{CategoryHandler, CategoryInfoList};
pub use content::{ContentHandler, ContentInfo};
pub use csp::{CspHandler, CspInfo, SecurityType};
pub use ime::{ImeHandler, ImeInfo};
pub use metadata::{MetaDataHandler, MetaDataInfo};
pub use navigation::{AllowedNavigationInfo, NavigationHandler};
pub use permissions::{PermissionsHandler, PermissionsInfo};
pub use service::{ServiceHandler, ServiceInfo, ServiceList};
pub use setting::{InstallLocation, Orientation, SettingHandler, SettingInfo, SoundMode};
pub use splash_screen::{
    Color, LaunchScreenData, ReadyWhen, ScreenOrientation, SplashScreenHandler, SplashScreenInfo,
};
pub use tizen_application::{TizenApplicationHandler, TizenApplicationInfo};
pub use warp::{WarpHandler, WarpInfo};
pub use widget::{License, LocalizedText, Preference, WidgetHandler, WidgetInfo};

/// Error for data handed to `validate` that another handler produced.
pub(crate) fn unexpected_data() -> HandlerError {
    HandlerError::new("Unexpected manifest data type")
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use manifest_parser::{
        HandlerResult, Manifest, ManifestData, ManifestDataMap, ManifestHandler, Validation,
    };

    use super::TizenApplicationInfo;
    use crate::config::{TIZEN_NAMESPACE, WIDGET_NAMESPACE};

    /// Wrap `body` in a `<widget>` root declaring both namespaces.
    pub(crate) fn widget_manifest(body: &str) -> Manifest {
        Manifest::from_xml_str(&format!(
            r#"<widget xmlns="{WIDGET_NAMESPACE}" xmlns:tizen="{TIZEN_NAMESPACE}">{body}</widget>"#
        ))
        .unwrap()
    }

    /// Parse then validate with no other handler output.
    pub(crate) fn parse_and_validate(
        handler: &dyn ManifestHandler,
        manifest: &Manifest,
    ) -> HandlerResult<Box<dyn ManifestData>> {
        parse_and_validate_with(handler, manifest, &ManifestDataMap::new())
    }

    /// Parse then validate against `handlers_output`, returning the data
    /// that ends up stored.
    pub(crate) fn parse_and_validate_with(
        handler: &dyn ManifestHandler,
        manifest: &Manifest,
        handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Box<dyn ManifestData>> {
        let data = handler
            .parse(manifest)?
            .unwrap_or_else(|| panic!("{} produced no data", handler.key()));
        match handler.validate(&*data, handlers_output)? {
            Validation::Accepted => Ok(data),
            Validation::Replaced(replacement) => Ok(replacement),
        }
    }

    /// Output map holding only an application entry with `required_version`.
    pub(crate) fn application_output(required_version: &str) -> ManifestDataMap {
        let mut output = ManifestDataMap::new();
        output.insert(
            TizenApplicationInfo::KEY,
            Arc::new(TizenApplicationInfo {
                id: "abcdefghij.app".to_string(),
                package: "abcdefghij".to_string(),
                required_version: required_version.to_string(),
                ..TizenApplicationInfo::default()
            }),
        );
        output
    }
}
