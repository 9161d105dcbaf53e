//! Handler for the `<widget>` root element and its w3c metadata children.

use std::collections::BTreeMap;

use manifest_parser::utils::{get_one_or_many, is_valid_iri, validate_language_tag};
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation,
};

use super::unexpected_data;
use crate::config::WIDGET_NAMESPACE;

/// Map from language tag to localized text. The empty tag holds text
/// declared without any language.
pub type LocalizedText = BTreeMap<String, String>;

/// A `<preference>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub name: String,
    pub value: String,
    pub readonly: bool,
}

/// A localized `<license>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct License {
    pub text: String,
    pub href: String,
}

/// Widget-wide metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetInfo {
    pub widget_namespace: String,
    pub id: String,
    pub version: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub default_locale: String,
    pub viewmodes: String,
    pub author: String,
    pub author_email: String,
    pub author_href: String,
    pub names: LocalizedText,
    pub short_names: LocalizedText,
    pub descriptions: LocalizedText,
    pub licenses: BTreeMap<String, License>,
    pub preferences: Vec<Preference>,
}

impl WidgetInfo {
    pub const KEY: &'static str = "widget";
}

/// Resolve the language of a localized element.
///
/// An explicit `xml:lang` must be a valid tag, otherwise the element is
/// dropped; without one the element inherits the widget's language.
fn element_language(element: &Dictionary, parent_lang: &str) -> Option<String> {
    match element.get_string("@lang") {
        Some(lang) if validate_language_tag(lang) => Some(lang.to_string()),
        Some(lang) => {
            tracing::error!(lang = %lang, "Invalid language tag");
            None
        }
        None => Some(parent_lang.to_string()),
    }
}

fn text_of(element: &Dictionary) -> String {
    element.get_string("#text").unwrap_or_default().to_string()
}

/// Localized elements at `path` paired with their resolved language.
fn localized<'a>(
    manifest: &'a Manifest,
    path: &str,
    parent_lang: &str,
) -> impl Iterator<Item = (String, &'a Dictionary)> {
    let parent_lang = parent_lang.to_string();
    get_one_or_many(manifest.value(), path, WIDGET_NAMESPACE)
        .into_iter()
        .filter_map(move |element| Some((element_language(element, &parent_lang)?, element)))
}

fn parse_names(manifest: &Manifest, parent_lang: &str, info: &mut WidgetInfo) {
    for (lang, element) in localized(manifest, "widget.name", parent_lang) {
        if info.names.contains_key(&lang) {
            continue;
        }
        if let Some(short) = element.get_string("@short").filter(|s| !s.is_empty()) {
            info.short_names.insert(lang.clone(), short.to_string());
        }
        info.names.insert(lang, text_of(element));
    }
}

fn parse_descriptions(manifest: &Manifest, parent_lang: &str, info: &mut WidgetInfo) {
    for (lang, element) in localized(manifest, "widget.description", parent_lang) {
        info.descriptions.entry(lang).or_insert_with(|| text_of(element));
    }
}

fn parse_licenses(manifest: &Manifest, parent_lang: &str, info: &mut WidgetInfo) {
    for (lang, element) in localized(manifest, "widget.license", parent_lang) {
        info.licenses.entry(lang).or_insert_with(|| License {
            text: text_of(element),
            href: element.get_string("@href").unwrap_or_default().to_string(),
        });
    }
}

fn parse_author(manifest: &Manifest, info: &mut WidgetInfo) {
    let Some(author) = get_one_or_many(manifest.value(), "widget.author", WIDGET_NAMESPACE)
        .into_iter()
        .next()
    else {
        return;
    };
    info.author = text_of(author);
    info.author_email = author.get_string("@email").unwrap_or_default().to_string();
    if let Some(href) = author.get_string("@href").filter(|href| is_valid_iri(href)) {
        info.author_href = href.to_string();
    }
}

fn dimension(manifest: &Manifest, path: &str) -> Option<u32> {
    u32::try_from(manifest.get_integer(path)?).ok()
}

/// Parses the root element; it always runs since every widget has one.
pub struct WidgetHandler;

impl ManifestHandler for WidgetHandler {
    fn key(&self) -> &str {
        WidgetInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let namespace = manifest.get_string("widget.@namespace").unwrap_or_default();
        if namespace != WIDGET_NAMESPACE {
            return Err(HandlerError::new(
                "Wrong namespace of <widget> element. Config.xml is invalid",
            ));
        }
        let parent_lang = manifest.get_string("widget.@lang").unwrap_or_default();
        let attribute = |name: &str| manifest.get_string(name).unwrap_or_default().to_string();

        let mut info = WidgetInfo {
            widget_namespace: namespace.to_string(),
            version: attribute("widget.@version"),
            height: dimension(manifest, "widget.@height"),
            width: dimension(manifest, "widget.@width"),
            default_locale: attribute("widget.@defaultlocale"),
            viewmodes: attribute("widget.@viewmodes"),
            ..WidgetInfo::default()
        };
        if let Some(id) = manifest.get_string("widget.@id").filter(|id| is_valid_iri(id)) {
            info.id = id.to_string();
        }

        parse_author(manifest, &mut info);
        parse_descriptions(manifest, parent_lang, &mut info);
        parse_names(manifest, parent_lang, &mut info);
        parse_licenses(manifest, parent_lang, &mut info);

        info.preferences = get_one_or_many(manifest.value(), "widget.preference", WIDGET_NAMESPACE)
            .into_iter()
            .map(|preference| Preference {
                name: preference.get_string("@name").unwrap_or_default().to_string(),
                value: preference.get_string("@value").unwrap_or_default().to_string(),
                readonly: preference.get_string("@readonly") == Some("true"),
            })
            .collect();

        Ok(Some(Box::new(info)))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let info = downcast_data::<WidgetInfo>(data).ok_or_else(unexpected_data)?;
        if info.widget_namespace != WIDGET_NAMESPACE {
            return Err(HandlerError::new("The widget namespace is invalid."));
        }
        Ok(Validation::Accepted)
    }

    fn always_parse_for_key(&self) -> bool {
        true
    }
}
