//! Handler for the w3c `<icon>` elements.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{Dictionary, HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::WIDGET_NAMESPACE;

const ICON_PATH: &str = "widget.icon";

/// One icon file, with the size the author declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIcon {
    pub path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ApplicationIcon {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
        }
    }
}

/// Icons in declaration order, unique by path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationIconsInfo {
    icons: Vec<ApplicationIcon>,
}

impl ApplicationIconsInfo {
    pub const KEY: &'static str = "icons";

    #[must_use]
    pub fn icons(&self) -> &[ApplicationIcon] {
        &self.icons
    }

    /// Append `icon` unless an icon with the same path is already listed.
    pub fn add_icon(&mut self, icon: ApplicationIcon) {
        if self.icons.iter().any(|existing| existing.path == icon.path) {
            return;
        }
        self.icons.push(icon);
    }
}

/// A non-negative dimension attribute; anything else counts as unset.
fn dimension(icon: &Dictionary, attribute: &str) -> Option<u32> {
    icon.get_string(attribute)?.trim().parse().ok()
}

/// Collects icons; the entry always exists so the package check can
/// append default icon files.
pub struct ApplicationIconsHandler;

impl ManifestHandler for ApplicationIconsHandler {
    fn key(&self) -> &str {
        ApplicationIconsInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut info = ApplicationIconsInfo::default();
        for icon in get_one_or_many(manifest.value(), ICON_PATH, WIDGET_NAMESPACE) {
            let Some(src) = icon.get_string("@src").filter(|src| !src.is_empty()) else {
                tracing::info!("Skipping icon without src");
                continue;
            };
            info.add_icon(ApplicationIcon {
                path: src.to_string(),
                width: dimension(icon, "@width"),
                height: dimension(icon, "@height"),
            });
        }
        Ok(Some(Box::new(info)))
    }

    fn always_parse_for_key(&self) -> bool {
        true
    }
}
