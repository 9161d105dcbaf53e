//! End-to-end tests for the two-phase pipeline using a small custom
//! handler set over a fixture manifest.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use manifest_parser::utils::{get_one_or_many, VersionNumber};
use manifest_parser::{
    downcast_data, HandlerError, HandlerResult, Manifest, ManifestData, ManifestDataMap,
    ManifestError, ManifestHandler, ManifestHandlerRegistry, ManifestParser, Validation,
};
use pretty_assertions::assert_eq;

const APP_NAMESPACE: &str = "http://example.com/ns/app";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[derive(Debug, Clone, PartialEq)]
struct VersionInfo {
    version: VersionNumber,
}

struct VersionHandler;

impl ManifestHandler for VersionHandler {
    fn key(&self) -> &str {
        "app.version"
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let text = manifest.get_string("app.version.#text").unwrap_or_default();
        let version = VersionNumber::parse(text)
            .ok_or_else(|| HandlerError::new(format!("Invalid version: '{text}'")))?;
        Ok(Some(Box::new(VersionInfo { version })))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct FeatureInfo {
    required: BTreeSet<String>,
    optional: BTreeSet<String>,
    checked_against: Option<String>,
}

/// Collects app-namespace features; validation stamps the version it saw.
struct FeatureHandler;

impl ManifestHandler for FeatureHandler {
    fn key(&self) -> &str {
        "app.feature"
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut info = FeatureInfo::default();
        for feature in get_one_or_many(manifest.value(), "app.feature", APP_NAMESPACE) {
            let name = feature.get_string("@name").unwrap_or_default().to_string();
            if feature.get_string("@required") == Some("false") {
                info.optional.insert(name);
            } else {
                info.required.insert(name);
            }
        }
        Ok(Some(Box::new(info)))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let info = downcast_data::<FeatureInfo>(data)
            .ok_or_else(|| HandlerError::new("Unexpected data"))?;
        let version = handlers_output
            .get_as::<VersionInfo>("app.version")
            .ok_or_else(|| HandlerError::new("Version was not parsed"))?;
        Ok(Validation::replaced(FeatureInfo {
            checked_against: Some(version.version.to_string()),
            ..info.clone()
        }))
    }

    fn prerequisite_keys(&self) -> &[&str] {
        &["app.version"]
    }
}

fn parser() -> ManifestParser {
    let mut registry = ManifestHandlerRegistry::new();
    // Registered before its prerequisite on purpose.
    registry.register(FeatureHandler);
    registry.register(VersionHandler);
    ManifestParser::new(registry).unwrap()
}

#[test]
fn test_parse_fixture_file() {
    let mut parser = parser();
    parser.parse_manifest_file(&fixture("app.xml")).unwrap();

    assert_eq!(parser.error_message(), None);
    assert_eq!(parser.manifest_data_map().len(), 2);

    let features = parser.get_manifest_data::<FeatureInfo>("app.feature").unwrap();
    assert_eq!(
        *features,
        FeatureInfo {
            required: BTreeSet::from(["camera".to_string()]),
            optional: BTreeSet::from(["bluetooth".to_string()]),
            checked_against: Some("2.4".to_string()),
        }
    );
}

#[test]
fn test_handler_error_is_reported() {
    let mut parser = parser();
    let manifest =
        Manifest::from_xml_str(r#"<app xmlns="http://example.com/ns/app"><version>x</version></app>"#)
            .unwrap();

    let err = parser.parse_manifest(manifest).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { ref key, .. } if key == "app.version"));
    assert_eq!(parser.error_message(), Some("Invalid version: 'x'"));
}

#[test]
fn test_missing_prerequisite_output() {
    let mut parser = parser();
    let manifest =
        Manifest::from_xml_str(r#"<app xmlns="http://example.com/ns/app"><feature name="a"/></app>"#)
            .unwrap();

    let err = parser.parse_manifest(manifest).unwrap_err();
    assert!(matches!(err, ManifestError::Validate { .. }));
    assert_eq!(parser.error_message(), Some("Version was not parsed"));
}

#[test]
fn test_unreadable_file() {
    let mut parser = parser();
    let err = parser
        .parse_manifest_file(&fixture("does-not-exist.xml"))
        .unwrap_err();

    assert!(matches!(err, ManifestError::Unreadable { .. }));
    assert_eq!(
        parser.error_message(),
        Some("Manifest file is missing or unreadable.")
    );
    assert!(parser.manifest().is_none());
}
