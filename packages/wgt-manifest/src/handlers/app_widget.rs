//! Handler for `<tizen:app-widget>` home screen widgets.

use std::collections::BTreeMap;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation,
};

use super::unexpected_data;
use crate::config::TIZEN_NAMESPACE;

const MIN_UPDATE_PERIOD: f64 = 1800.0;
const DROP_VIEW_HEIGHT: std::ops::RangeInclusive<i32> = 1..=380;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppWidgetSizeType {
    Size1x1,
    Size2x1,
    Size2x2,
}

impl AppWidgetSizeType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "1x1" => Some(AppWidgetSizeType::Size1x1),
            "2x1" => Some(AppWidgetSizeType::Size2x1),
            "2x2" => Some(AppWidgetSizeType::Size2x2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppWidgetSize {
    pub size_type: AppWidgetSizeType,
    pub preview: String,
    pub use_decoration: bool,
}

/// The pull-down view (`<tizen:pd>`) of a box content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppWidgetDropView {
    pub src: String,
    pub width: i32,
    pub height: i32,
}

/// Box labels: one without a language plus per-language overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppWidgetLabel {
    pub default_value: String,
    pub lang_value_map: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppWidget {
    pub id: String,
    pub primary: bool,
    pub update_period: Option<f64>,
    pub auto_launch: bool,
    pub label: AppWidgetLabel,
    pub icon_src: String,
    pub content_src: String,
    pub content_mouse_event: bool,
    pub content_touch_effect: bool,
    pub content_size: Vec<AppWidgetSize>,
    pub content_drop_view: Option<AppWidgetDropView>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppWidgetInfo {
    pub app_widgets: Vec<AppWidget>,
}

impl AppWidgetInfo {
    pub const KEY: &'static str = "widget.app-widget";
}

/// Typed reading of attribute strings.
trait AttributeValue: Sized {
    fn convert(value: &str) -> Option<Self>;
}

impl AttributeValue for String {
    fn convert(value: &str) -> Option<Self> {
        Some(value.to_string())
    }
}

impl AttributeValue for bool {
    fn convert(value: &str) -> Option<Self> {
        match value {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl AttributeValue for i32 {
    fn convert(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl AttributeValue for f64 {
    fn convert(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

fn missing(key: &str) -> HandlerError {
    HandlerError::new(format!("Cannot find mandatory key. Key name: {key}"))
}

fn invalid(key: &str) -> HandlerError {
    HandlerError::new(format!("Invalid key value. Key name: {key}"))
}

fn too_many(key: &str) -> HandlerError {
    HandlerError::new(format!("Too many keys found. Key name: {key}"))
}

fn optional<T: AttributeValue>(dict: &Dictionary, key: &str) -> HandlerResult<Option<T>> {
    dict.get_string(key)
        .map(|value| T::convert(value).ok_or_else(|| invalid(key)))
        .transpose()
}

fn mandatory<T: AttributeValue>(dict: &Dictionary, key: &str) -> HandlerResult<T> {
    optional(dict, key)?.ok_or_else(|| missing(key))
}

fn verify_namespace(dict: &Dictionary, key: &str) -> HandlerResult<()> {
    match dict.get_string("@namespace") {
        None => Err(HandlerError::new(format!(
            "Element pointed by key has no namespace specified. Key name: {key}"
        ))),
        Some(namespace) if namespace != TIZEN_NAMESPACE => Err(HandlerError::new(format!(
            "Invalid namespace of element pointed by key. Key name: {key}"
        ))),
        Some(_) => Ok(()),
    }
}

fn parse_size(dict: &Dictionary) -> HandlerResult<AppWidgetSize> {
    verify_namespace(dict, "box-size")?;
    let size_type: String = mandatory(dict, "#text")?;
    Ok(AppWidgetSize {
        size_type: AppWidgetSizeType::parse(&size_type).ok_or_else(|| invalid("#text"))?,
        preview: optional(dict, "@preview")?.unwrap_or_default(),
        use_decoration: optional(dict, "@use-decoration")?.unwrap_or(true),
    })
}

fn parse_drop_view(dict: &Dictionary) -> HandlerResult<AppWidgetDropView> {
    verify_namespace(dict, "pd")?;
    Ok(AppWidgetDropView {
        src: mandatory(dict, "@src")?,
        width: mandatory(dict, "@width")?,
        height: mandatory(dict, "@height")?,
    })
}

fn parse_content(dict: &Dictionary, app_widget: &mut AppWidget) -> HandlerResult<()> {
    app_widget.content_src = mandatory(dict, "@src")?;
    app_widget.content_mouse_event = optional(dict, "@mouse-event")?.unwrap_or(false);
    app_widget.content_touch_effect = optional(dict, "@touch-effect")?.unwrap_or(true);

    if !dict.has_key("box-size") {
        return Err(missing("box-size"));
    }
    app_widget.content_size = get_one_or_many(dict, "box-size", "")
        .into_iter()
        .map(parse_size)
        .collect::<HandlerResult<_>>()?;

    match get_one_or_many(dict, "pd", "").as_slice() {
        [] => {}
        [drop_view] => app_widget.content_drop_view = Some(parse_drop_view(drop_view)?),
        _ => return Err(too_many("pd")),
    }
    Ok(())
}

fn parse_app_widget(dict: &Dictionary) -> HandlerResult<AppWidget> {
    let mut app_widget = AppWidget {
        id: mandatory(dict, "@id")?,
        primary: mandatory(dict, "@primary")?,
        update_period: optional(dict, "@update-period")?,
        auto_launch: optional(dict, "@auto-launch")?.unwrap_or(false),
        label: AppWidgetLabel::default(),
        icon_src: String::new(),
        content_src: String::new(),
        content_mouse_event: false,
        content_touch_effect: true,
        content_size: Vec::new(),
        content_drop_view: None,
    };

    let labels = get_one_or_many(dict, "box-label", TIZEN_NAMESPACE);
    if labels.is_empty() {
        return Err(HandlerError::new("No box-label element in app-widget element."));
    }
    for label in labels {
        let lang: String = optional(label, "@lang")?.unwrap_or_default();
        let text: String = mandatory(label, "#text")?;
        // Repeated labels for the same language overwrite each other.
        if lang.is_empty() {
            app_widget.label.default_value = text;
        } else {
            app_widget.label.lang_value_map.insert(lang, text);
        }
    }

    match get_one_or_many(dict, "box-icon", TIZEN_NAMESPACE).as_slice() {
        [] => {}
        [icon] => app_widget.icon_src = mandatory(icon, "@src")?,
        _ => return Err(too_many("box-icon")),
    }

    match get_one_or_many(dict, "box-content", TIZEN_NAMESPACE).as_slice() {
        [] => return Err(missing("box-content")),
        [content] => parse_content(content, &mut app_widget)?,
        _ => return Err(too_many("box-content")),
    }

    Ok(app_widget)
}

pub struct AppWidgetHandler;

impl ManifestHandler for AppWidgetHandler {
    fn key(&self) -> &str {
        AppWidgetInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let app_widgets = get_one_or_many(manifest.value(), AppWidgetInfo::KEY, TIZEN_NAMESPACE)
            .into_iter()
            .map(parse_app_widget)
            .collect::<HandlerResult<Vec<_>>>()?;
        Ok(Some(Box::new(AppWidgetInfo { app_widgets })))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let info = downcast_data::<AppWidgetInfo>(data).ok_or_else(unexpected_data)?;
        for app_widget in &info.app_widgets {
            if let Some(period) = app_widget.update_period.filter(|p| *p < MIN_UPDATE_PERIOD) {
                return Err(HandlerError::new(format!(
                    "Value of an update-period attribute in app-widget element out of domain. \
                     The value: {period}"
                )));
            }
            if app_widget.label.default_value.is_empty()
                && app_widget.label.lang_value_map.is_empty()
            {
                return Err(HandlerError::new("No box-label element in app-widget element."));
            }
            if !app_widget
                .content_size
                .iter()
                .any(|size| size.size_type == AppWidgetSizeType::Size1x1)
            {
                return Err(HandlerError::new(
                    "No mandatory box-size element (1x1) in box-content element.",
                ));
            }
            if let Some(drop_view) = &app_widget.content_drop_view {
                if !DROP_VIEW_HEIGHT.contains(&drop_view.height) {
                    return Err(HandlerError::new(format!(
                        "Value of a height attribute in box-content element out of domain. \
                         The value: {}",
                        drop_view.height
                    )));
                }
            }
        }
        Ok(Validation::Accepted)
    }
}
