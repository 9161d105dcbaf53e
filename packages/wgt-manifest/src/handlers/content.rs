//! Handler for the start page declaration (`<content>` / `<tizen:content>`).
//!
//! Only the first element of each namespace is considered. A well-formed
//! tizen element wins over the w3c one wherever it appears; a malformed
//! tizen element leaves the w3c one in place.

use std::collections::BTreeMap;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{Dictionary, HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

const DEFAULT_MIME_TYPE: &str = "text/html";
const DEFAULT_ENCODING: &str = "UTF-8";
const START_FILE_MIME_TYPES: &[&str] = &["text/html", "application/xhtml+xml", "image/svg+xml"];

/// The widget's start page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInfo {
    pub src: String,
    pub mime_type: String,
    pub encoding: String,
    pub is_tizen_content: bool,
}

impl ContentInfo {
    pub const KEY: &'static str = "widget.content";
}

/// Split a MIME type into its main type (key `""`) and parameters.
fn parse_mime_components(mime_type: &str) -> BTreeMap<String, String> {
    let mut components = BTreeMap::new();
    for component in mime_type.split(';') {
        let (key, value) = component.split_once('=').unwrap_or(("", component));
        components
            .entry(key.trim().to_string())
            .or_insert_with(|| value.trim().to_string());
    }
    components
}

/// Per-parse state: which namespaces already had their first element.
#[derive(Default)]
struct ContentSearch {
    tizen_found: bool,
    w3c_found: bool,
    selected: Option<ContentInfo>,
}

impl ContentSearch {
    fn consider(&mut self, element: &Dictionary) {
        let is_tizen = element.get_string("@namespace") == Some(TIZEN_NAMESPACE);
        let seen = if is_tizen {
            &mut self.tizen_found
        } else {
            &mut self.w3c_found
        };
        if std::mem::replace(seen, true) {
            return;
        }

        let src = element.get_string("@src").unwrap_or_default();
        if src.is_empty() {
            return;
        }

        let mime_type = element.get_string("@type").unwrap_or(DEFAULT_MIME_TYPE);
        let components = parse_mime_components(mime_type);
        if let Some(main) = components.get("") {
            if !START_FILE_MIME_TYPES.contains(&main.as_str()) {
                tracing::warn!(src = %src, mime_type = %mime_type, "Not proper type of starting file");
                return;
            }
        }

        let encoding = element
            .get_string("@encoding")
            .or_else(|| components.get("charset").map(String::as_str))
            .unwrap_or(DEFAULT_ENCODING)
            .trim()
            .to_string();

        if self.selected.as_ref().is_some_and(|content| content.is_tizen_content) {
            return;
        }

        self.selected = Some(ContentInfo {
            src: src.to_string(),
            mime_type: mime_type.to_string(),
            encoding,
            is_tizen_content: is_tizen,
        });
    }
}

/// Selects the start page among all `content` elements.
pub struct ContentHandler;

impl ManifestHandler for ContentHandler {
    fn key(&self) -> &str {
        ContentInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut search = ContentSearch::default();
        for element in get_one_or_many(manifest.value(), ContentInfo::KEY, "") {
            search.consider(element);
        }
        Ok(search
            .selected
            .map(|content| Box::new(content) as Box<dyn ManifestData>))
    }
}
