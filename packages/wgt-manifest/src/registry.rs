//! Registry configuration for widget `config.xml` parsing.

use manifest_parser::ManifestHandlerRegistry;

use crate::config::PlatformConfig;
use crate::handlers::{
    AccountHandler, AppControlHandler, AppWidgetHandler, ApplicationIconsHandler,
    BackgroundCategoryHandler, CategoryHandler, ContentHandler, CspHandler, ImeHandler,
    MetaDataHandler, NavigationHandler, PermissionsHandler, SecurityType, ServiceHandler,
    SettingHandler, SplashScreenHandler, TizenApplicationHandler, WarpHandler, WidgetHandler,
};

/// Create a handler registry configured for widget manifests.
///
/// Registration order is the Parse phase order. Validation order is
/// derived from prerequisites, so it does not matter here.
#[must_use]
pub fn create_widget_registry(platform: &PlatformConfig) -> ManifestHandlerRegistry {
    let mut registry = ManifestHandlerRegistry::new();

    registry.register(AccountHandler);
    registry.register(AppControlHandler);
    registry.register(ApplicationIconsHandler);
    registry.register(AppWidgetHandler);
    registry.register(CategoryHandler);
    registry.register(ContentHandler);
    registry.register(CspHandler::new(SecurityType::Csp));
    registry.register(CspHandler::new(SecurityType::CspReportOnly));
    registry.register(ImeHandler);
    registry.register(MetaDataHandler);
    registry.register(NavigationHandler);
    registry.register(PermissionsHandler);
    registry.register(ServiceHandler);
    registry.register(SettingHandler::new(platform.clone()));
    registry.register(SplashScreenHandler);
    registry.register(TizenApplicationHandler::new(platform.clone()));
    registry.register(WarpHandler);
    registry.register(WidgetHandler);
    registry.register(BackgroundCategoryHandler);

    registry
}
