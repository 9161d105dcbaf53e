//! End-to-end tests for widget config parsing.
//!
//! Runs the full handler set over the `clock` fixture, unpacked into a
//! temporary package directory.

use std::fs;
use std::path::{Path, PathBuf};

use manifest_parser::{Manifest, ManifestParser};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wgt_manifest::handlers::{
    AccountInfo, AllowedNavigationInfo, AppControlInfoList, AppWidgetInfo, ApplicationIcon,
    ApplicationIconsInfo, BackgroundCategoryInfoList, CategoryInfoList, ContentInfo, CspInfo,
    MetaDataInfo, Orientation, PermissionsInfo, ScreenOrientation, ServiceList, SettingInfo,
    SplashScreenInfo, TizenApplicationInfo, WarpInfo, WidgetInfo,
};
use wgt_manifest::{create_widget_registry, PlatformConfig, WidgetConfigParser};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("clock")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Unpack the clock widget with the given package files next to config.xml.
fn unpack(config: &str, files: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.xml");
    fs::write(&config_path, config).unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    (dir, config_path)
}

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

fn clock_package() -> (TempDir, PathBuf) {
    unpack(
        &load_fixture("config.xml"),
        &[
            ("index.html", b"<html></html>"),
            ("icon.png", PNG),
            ("service/sync.js", b"// sync"),
        ],
    )
}

fn parse_clock() -> (TempDir, WidgetConfigParser) {
    let (dir, config) = clock_package();
    let mut parser = WidgetConfigParser::new().unwrap();
    parser.parse_manifest(&config).unwrap();
    (dir, parser)
}

#[test]
fn test_widget_metadata() {
    let (_dir, parser) = parse_clock();
    let widget = parser.get_manifest_data::<WidgetInfo>(WidgetInfo::KEY).unwrap();

    assert_eq!(widget.id, "http://example.com/clock");
    assert_eq!(widget.version, "1.2.0");
    assert_eq!(widget.default_locale, "en");
    assert_eq!(widget.names.get(""), Some(&"World Clock".to_string()));
    assert_eq!(widget.names.get("pl"), Some(&"Zegar".to_string()));
    assert_eq!(widget.short_names.get(""), Some(&"Clock".to_string()));
    assert_eq!(widget.author, "Clock Developers");
    assert_eq!(widget.author_email, "dev@example.com");
    assert_eq!(widget.preferences.len(), 1);
    assert!(widget.preferences[0].readonly);
}

#[test]
fn test_tizen_sections() {
    let (_dir, parser) = parse_clock();

    let app = parser
        .get_manifest_data::<TizenApplicationInfo>(TizenApplicationInfo::KEY)
        .unwrap();
    assert_eq!(app.id, "abcdefghij.clock");
    assert_eq!(app.package, "abcdefghij");
    assert_eq!(app.required_version, "2.4");
    assert_eq!(app.launch_mode, "single");

    let permissions = parser
        .get_manifest_data::<PermissionsInfo>(PermissionsInfo::KEY)
        .unwrap();
    assert_eq!(permissions.api_permissions.len(), 2);

    let setting = parser.get_manifest_data::<SettingInfo>(SettingInfo::KEY).unwrap();
    assert_eq!(setting.screen_orientation, Orientation::Landscape);
    assert!(setting.background_support_enabled);

    let metadata = parser.get_manifest_data::<MetaDataInfo>(MetaDataInfo::KEY).unwrap();
    assert_eq!(metadata.value("theme"), "dark");

    let categories = parser
        .get_manifest_data::<CategoryInfoList>(CategoryInfoList::KEY)
        .unwrap();
    assert_eq!(
        categories.categories,
        vec!["http://tizen.org/category/wearable_clock".to_string()]
    );

    let background = parser
        .get_manifest_data::<BackgroundCategoryInfoList>(BackgroundCategoryInfoList::KEY)
        .unwrap();
    assert_eq!(background.background_categories, vec!["media".to_string()]);

    let navigation = parser
        .get_manifest_data::<AllowedNavigationInfo>(AllowedNavigationInfo::KEY)
        .unwrap();
    assert_eq!(
        navigation.allowed_domains,
        vec!["example.com".to_string(), "*.example.org".to_string()]
    );

    let csp = parser.get_manifest_data::<CspInfo>(CspInfo::KEY).unwrap();
    assert_eq!(csp.security_rules, "script-src 'self'");
    assert!(parser.manifest_data(CspInfo::REPORT_ONLY_KEY).is_none());

    let warp = parser.get_manifest_data::<WarpInfo>(WarpInfo::KEY).unwrap();
    assert_eq!(warp.access, vec![("*".to_string(), true)]);
}

#[test]
fn test_app_controls_get_reload_default() {
    let (_dir, parser) = parse_clock();
    let list = parser
        .get_manifest_data::<AppControlInfoList>(AppControlInfoList::KEY)
        .unwrap();

    let reloads: Vec<&str> = list.controls.iter().map(|c| c.reload.as_str()).collect();
    assert_eq!(reloads, vec!["disable", "enable"]);
    assert_eq!(list.controls[0].mime, "text/html");
}

#[test]
fn test_widgets_services_accounts_and_splash() {
    let (_dir, parser) = parse_clock();

    let app_widgets = parser.get_manifest_data::<AppWidgetInfo>(AppWidgetInfo::KEY).unwrap();
    assert_eq!(app_widgets.app_widgets.len(), 1);
    assert_eq!(app_widgets.app_widgets[0].label.default_value, "Clock");

    let services = parser.get_manifest_data::<ServiceList>(ServiceList::KEY).unwrap();
    assert_eq!(services.services[0].id, "abcdefghij.sync");
    assert!(services.services[0].on_boot);
    assert!(parser.has_valid_services_start_files());

    let accounts = parser.get_manifest_data::<AccountInfo>(AccountInfo::KEY).unwrap();
    assert!(!accounts.accounts[0].multiple_account_support);
    assert_eq!(accounts.accounts[0].icons[0].path, "account.png");

    let splash = parser
        .get_manifest_data::<SplashScreenInfo>(SplashScreenInfo::KEY)
        .unwrap();
    assert_eq!(splash.screens.len(), 1);
    assert!(splash.screens.contains_key(&ScreenOrientation::Auto));
}

#[test]
fn test_package_checks() {
    let (_dir, parser) = parse_clock();

    assert!(parser.has_valid_start_file());
    assert_eq!(parser.error_message(), None);

    let content = parser.get_manifest_data::<ContentInfo>(ContentInfo::KEY).unwrap();
    assert_eq!(content.src, "index.html");
    assert!(!content.is_tizen_content);

    let icons = parser
        .get_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
        .unwrap();
    assert_eq!(
        icons.icons(),
        &[ApplicationIcon {
            path: "icon.png".to_string(),
            width: Some(117),
            height: Some(117),
        }]
    );
}

#[test]
fn test_localized_start_file() {
    let config = load_fixture("config.xml").replace("index.html\"/>", "main.html\"/>");
    let (_dir, path) = unpack(
        &config,
        &[
            ("locales/en-us/main.html", b"<html></html>"),
            ("service/sync.js", b""),
        ],
    );
    let mut parser = WidgetConfigParser::new().unwrap();
    parser.parse_manifest(&path).unwrap();

    assert!(parser.has_valid_start_file());
    assert_eq!(
        parser.get_manifest_data::<ContentInfo>(ContentInfo::KEY).unwrap().src,
        "main.html"
    );
    // No icons exist in this package.
    let icons = parser
        .get_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
        .unwrap();
    assert!(icons.icons().is_empty());
}

#[test]
fn test_missing_service_start_file() {
    let (dir, path) = unpack(
        &load_fixture("config.xml"),
        &[("index.html", b"<html></html>")],
    );
    let mut parser = WidgetConfigParser::new().unwrap();
    parser.parse_manifest(&path).unwrap();

    assert!(parser.has_valid_start_file());
    assert!(!parser.has_valid_services_start_files());
    assert_eq!(
        parser.error_message().unwrap(),
        format!(
            "Could not find valid service start file: {}",
            dir.path().join("service/sync.js").display()
        )
    );
}

#[test]
fn test_platform_version_too_low() {
    let (_dir, path) = clock_package();
    let platform = PlatformConfig::new(
        wgt_manifest::Profile::Wearable,
        wgt_manifest::config::validate_platform_version("2.3").unwrap(),
    );
    let mut parser = WidgetConfigParser::with_platform(&platform).unwrap();

    assert!(parser.parse_manifest(&path).is_err());
    assert!(parser.error_message().is_some());
    assert!(!parser.has_valid_start_file());
}

/// Debug rendering of every entry, ordered by key.
fn snapshot(parser: &ManifestParser) -> Vec<String> {
    let map = parser.manifest_data_map();
    let mut keys: Vec<&str> = map.keys().collect();
    keys.sort_unstable();
    keys.into_iter()
        .map(|key| format!("{key}: {:?}", map.get(key).unwrap()))
        .collect()
}

#[test]
fn test_parsing_is_idempotent() {
    let config = load_fixture("config.xml");
    let platform = PlatformConfig::default();

    let mut first = ManifestParser::new(create_widget_registry(&platform)).unwrap();
    first.parse_manifest(Manifest::from_xml_str(&config).unwrap()).unwrap();
    let mut second = ManifestParser::new(create_widget_registry(&platform)).unwrap();
    second.parse_manifest(Manifest::from_xml_str(&config).unwrap()).unwrap();
    assert_eq!(snapshot(&first), snapshot(&second));

    let expected = snapshot(&first);
    first.parse_manifest(Manifest::from_xml_str(&config).unwrap()).unwrap();
    assert_eq!(snapshot(&first), expected);
}
