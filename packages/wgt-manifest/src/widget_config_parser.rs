//! Widget `config.xml` parsing with package file checks.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use manifest_parser::utils::is_valid_iri;
use manifest_parser::{ManifestData, ManifestParser};

use crate::config::PlatformConfig;
use crate::error::{Result, WidgetConfigError};
use crate::handlers::{ApplicationIcon, ApplicationIconsInfo, ContentInfo, ServiceList};
use crate::package::{
    find_file_within_widget, is_icon_mime_type_supported, FindResult, DEFAULT_ICON_FILES,
    DEFAULT_START_FILES,
};
use crate::registry::create_widget_registry;

/// Parser for the `config.xml` of an unpacked widget.
///
/// After the manifest itself is parsed, the icon list is narrowed to files
/// that exist in the package, and the start file and service start files
/// are checked. Missing start files do not fail [`parse_manifest`]; query
/// [`has_valid_start_file`] and [`has_valid_services_start_files`] instead.
///
/// [`parse_manifest`]: WidgetConfigParser::parse_manifest
/// [`has_valid_start_file`]: WidgetConfigParser::has_valid_start_file
/// [`has_valid_services_start_files`]: WidgetConfigParser::has_valid_services_start_files
pub struct WidgetConfigParser {
    parser: ManifestParser,
    widget_path: PathBuf,
    error: Option<String>,
    has_valid_start_file: bool,
    has_valid_services_start_files: bool,
}

impl WidgetConfigParser {
    /// Create a parser for the default platform.
    ///
    /// # Errors
    /// Returns an error if the handler prerequisites cannot be ordered.
    pub fn new() -> Result<Self> {
        Self::with_platform(&PlatformConfig::default())
    }

    /// Create a parser checking against `platform`.
    ///
    /// # Errors
    /// Returns an error if the handler prerequisites cannot be ordered.
    pub fn with_platform(platform: &PlatformConfig) -> Result<Self> {
        Ok(Self {
            parser: ManifestParser::new(create_widget_registry(platform))?,
            widget_path: PathBuf::new(),
            error: None,
            has_valid_start_file: false,
            has_valid_services_start_files: false,
        })
    }

    /// Parse the `config.xml` at `path`; its directory is the package root.
    ///
    /// # Errors
    /// Returns the first manifest error, or `MissingIconInfo` if the icon
    /// list could not be updated.
    pub fn parse_manifest(&mut self, path: &Path) -> Result<()> {
        self.error = None;
        self.has_valid_start_file = false;
        self.has_valid_services_start_files = false;

        let Some(parent) = path.parent() else {
            return Err(self.fail(WidgetConfigError::NoPackageRoot(path.to_path_buf())));
        };
        self.widget_path = if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        };

        self.parser.parse_manifest_file(path)?;
        self.check_widget_icons()?;

        self.has_valid_start_file = self.check_start_file();
        self.has_valid_services_start_files = self.check_services_start_files();
        Ok(())
    }

    /// Directory of the last parsed manifest.
    #[must_use]
    pub fn widget_path(&self) -> &Path {
        &self.widget_path
    }

    #[must_use]
    pub fn manifest_data(&self, key: &str) -> Option<Arc<dyn ManifestData>> {
        self.parser.manifest_data(key)
    }

    /// Typed handler output, e.g. `get_manifest_data::<WidgetInfo>(WidgetInfo::KEY)`.
    #[must_use]
    pub fn get_manifest_data<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.parser.get_manifest_data::<T>(key)
    }

    /// Message of the last failure, from the package checks or the parser.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| self.parser.error_message())
    }

    #[must_use]
    pub fn has_valid_start_file(&self) -> bool {
        self.has_valid_start_file
    }

    #[must_use]
    pub fn has_valid_services_start_files(&self) -> bool {
        self.has_valid_services_start_files
    }

    fn fail(&mut self, err: WidgetConfigError) -> WidgetConfigError {
        tracing::error!(error = %err, "Widget package check failed");
        self.error = Some(err.to_string());
        err
    }

    /// Path of `file` relative to the package root.
    fn relative(&self, file: &Path) -> String {
        file.strip_prefix(&self.widget_path)
            .unwrap_or(file)
            .to_string_lossy()
            .into_owned()
    }

    /// Locate `reference` and return its package-relative path if it is a
    /// supported icon.
    fn find_icon(&self, reference: &str) -> Option<String> {
        let FindResult::Found(file) = find_file_within_widget(&self.widget_path, reference) else {
            return None;
        };
        if !is_icon_mime_type_supported(&file) {
            tracing::warn!(icon = %file.display(), "Unsupported icon");
            return None;
        }
        Some(self.relative(&file))
    }

    fn check_widget_icons(&mut self) -> Result<()> {
        let declared = match self
            .parser
            .get_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
        {
            Some(info) => info.icons().to_vec(),
            None => return Err(self.fail(WidgetConfigError::MissingIconInfo)),
        };

        let mut icons = ApplicationIconsInfo::default();
        for icon in declared {
            if let Some(path) = self.find_icon(&icon.path) {
                icons.add_icon(ApplicationIcon { path, ..icon });
            }
        }
        for file in DEFAULT_ICON_FILES {
            if let Some(path) = self.find_icon(file) {
                icons.add_icon(ApplicationIcon::new(path));
            }
        }
        for icon in icons.icons() {
            tracing::debug!(
                path = %icon.path,
                width = ?icon.width,
                height = ?icon.height,
                "Valid icon"
            );
        }

        match self
            .parser
            .access_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
        {
            Some(info) => {
                *info = icons;
                Ok(())
            }
            None => Err(self.fail(WidgetConfigError::MissingIconInfo)),
        }
    }

    fn check_start_file(&mut self) -> bool {
        if let Some(content) = self.parser.get_manifest_data::<ContentInfo>(ContentInfo::KEY) {
            // tizen:content may point outside the package
            if content.is_tizen_content && is_valid_iri(&content.src) {
                return true;
            }
            if find_file_within_widget(&self.widget_path, &content.src).is_found() {
                tracing::info!(
                    src = %content.src,
                    mime_type = %content.mime_type,
                    encoding = %content.encoding,
                    "Start file found"
                );
                return true;
            }
            tracing::warn!(src = %content.src, "Declared start file not found in package");
            self.parser.erase_manifest_data(ContentInfo::KEY);
        }

        match DEFAULT_START_FILES
            .iter()
            .find(|file| find_file_within_widget(&self.widget_path, file).is_found())
        {
            Some(file) => {
                tracing::info!(src = %file, "Using default start file");
                true
            }
            None => {
                self.fail(WidgetConfigError::NoValidStartFile);
                false
            }
        }
    }

    fn check_services_start_files(&mut self) -> bool {
        let Some(list) = self.parser.get_manifest_data::<ServiceList>(ServiceList::KEY) else {
            return true;
        };
        let missing = list
            .services
            .iter()
            .map(|service| self.widget_path.join(&service.content))
            .find(|start_file| !start_file.exists());
        match missing {
            Some(start_file) => {
                self.fail(WidgetConfigError::MissingServiceStartFile(start_file));
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TIZEN_NAMESPACE, WIDGET_NAMESPACE};
    use crate::handlers::WidgetInfo;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const APPLICATION: &str =
        r#"<tizen:application id="abcdefghij.app" package="abcdefghij" required_version="2.4"/>"#;

    fn package(body: &str, files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.xml"),
            format!(
                r#"<widget xmlns="{WIDGET_NAMESPACE}" xmlns:tizen="{TIZEN_NAMESPACE}" version="1.0">{APPLICATION}{body}</widget>"#
            ),
        )
        .unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn parse(dir: &TempDir) -> WidgetConfigParser {
        let mut parser = WidgetConfigParser::new().unwrap();
        parser.parse_manifest(&dir.path().join("config.xml")).unwrap();
        parser
    }

    #[test]
    fn test_declared_start_file() {
        let dir = package(r#"<content src="main.html"/>"#, &[("main.html", b"<html/>")]);
        let parser = parse(&dir);
        assert!(parser.has_valid_start_file());
        assert!(parser.has_valid_services_start_files());
        assert_eq!(parser.error_message(), None);
        let content = parser.get_manifest_data::<ContentInfo>(ContentInfo::KEY).unwrap();
        assert_eq!(content.src, "main.html");
        assert!(parser.get_manifest_data::<WidgetInfo>(WidgetInfo::KEY).is_some());
    }

    #[test]
    fn test_missing_content_falls_back_to_default() {
        let dir = package(r#"<content src="gone.html"/>"#, &[("index.xhtml", b"<html/>")]);
        let parser = parse(&dir);
        assert!(parser.has_valid_start_file());
        assert!(parser.manifest_data(ContentInfo::KEY).is_none());
    }

    #[test]
    fn test_no_start_file() {
        let dir = package("", &[]);
        let parser = parse(&dir);
        assert!(!parser.has_valid_start_file());
        assert_eq!(parser.error_message(), Some("Could not find valid start file"));
    }

    #[test]
    fn test_remote_tizen_content() {
        let dir = package(r#"<tizen:content src="http://example.com/app"/>"#, &[]);
        assert!(parse(&dir).has_valid_start_file());
    }

    #[test]
    fn test_icons_filtered_to_package() {
        let dir = package(
            r#"<icon src="img/logo.png" width="64"/><icon src="absent.png"/><icon src="index.html"/>"#,
            &[
                ("index.html", b"<html/>"),
                ("img/logo.png", b"\x89PNG\r\n\x1a\n"),
                ("icon.gif", b"GIF89a"),
            ],
        );
        let parser = parse(&dir);
        let icons = parser
            .get_manifest_data::<ApplicationIconsInfo>(ApplicationIconsInfo::KEY)
            .unwrap();
        assert_eq!(
            icons.icons(),
            &[
                ApplicationIcon {
                    path: "img/logo.png".to_string(),
                    width: Some(64),
                    height: None,
                },
                ApplicationIcon::new("icon.gif"),
            ]
        );
    }

    #[test]
    fn test_service_start_files() {
        let service = r#"<tizen:service id="abcdefghij.service">
                           <tizen:content src="service.js"/><tizen:name>S</tizen:name>
                         </tizen:service>"#;
        let dir = package(service, &[("index.html", b"<html/>")]);
        let parser = parse(&dir);
        assert!(parser.has_valid_start_file());
        assert!(!parser.has_valid_services_start_files());
        assert!(parser
            .error_message()
            .unwrap()
            .starts_with("Could not find valid service start file: "));

        let dir = package(service, &[("index.html", b"<html/>"), ("service.js", b"")]);
        assert!(parse(&dir).has_valid_services_start_files());
    }

    #[test]
    fn test_manifest_error_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.xml"), "<widget").unwrap();
        let mut parser = WidgetConfigParser::new().unwrap();
        assert!(parser.parse_manifest(&dir.path().join("config.xml")).is_err());
        assert!(parser.error_message().is_some());
    }
}
