//! Handler for `<tizen:launch_screen>`.

use std::collections::BTreeMap;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{
    Dictionary, HandlerError, HandlerResult, Manifest, ManifestData, ManifestHandler,
};

use crate::config::TIZEN_NAMESPACE;

/// When the launch screen is taken down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyWhen {
    #[default]
    FirstPaint,
    Complete,
    Custom,
}

impl ReadyWhen {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "first-paint" => Some(ReadyWhen::FirstPaint),
            "complete" => Some(ReadyWhen::Complete),
            "custom" => Some(ReadyWhen::Custom),
            _ => None,
        }
    }
}

/// Orientation a launch screen variant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenOrientation {
    Auto,
    Landscape,
    Portrait,
}

impl ScreenOrientation {
    const ALL: [ScreenOrientation; 3] = [
        ScreenOrientation::Auto,
        ScreenOrientation::Landscape,
        ScreenOrientation::Portrait,
    ];

    fn path(self) -> &'static str {
        match self {
            ScreenOrientation::Auto => "widget.launch_screen.ls_default",
            ScreenOrientation::Landscape => "widget.launch_screen.ls_landscape",
            ScreenOrientation::Portrait => "widget.launch_screen.ls_portrait",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ScreenOrientation::Auto => "default",
            ScreenOrientation::Landscape => "landscape",
            ScreenOrientation::Portrait => "portrait",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Parse a CSS hex colour, `#rgb` or `#rrggbb`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        match hex.len() {
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 0x11);
                Some(Self {
                    red: short(0)?,
                    green: short(1)?,
                    blue: short(2)?,
                })
            }
            6 => Some(Self {
                red: channel(&hex[0..2])?,
                green: channel(&hex[2..4])?,
                blue: channel(&hex[4..6])?,
            }),
            _ => None,
        }
    }
}

/// One launch screen variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchScreenData {
    pub background_color: Option<Color>,
    pub background_image: Vec<String>,
    pub image: Vec<String>,
    pub image_border: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplashScreenInfo {
    pub ready_when: ReadyWhen,
    pub screens: BTreeMap<ScreenOrientation, LaunchScreenData>,
}

impl SplashScreenInfo {
    pub const KEY: &'static str = "widget.launch_screen";
}

fn tokens(element: &Dictionary, attribute: &str) -> Vec<String> {
    element
        .get_string(attribute)
        .unwrap_or_default()
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one variant; `None` when the element is unusable.
fn parse_screen(element: &Dictionary) -> Option<LaunchScreenData> {
    let background_color = match element.get_string("@background_color") {
        Some(value) => Some(Color::parse(value)?),
        None => None,
    };
    let screen = LaunchScreenData {
        background_color,
        background_image: tokens(element, "@background_image"),
        image: tokens(element, "@image"),
        image_border: tokens(element, "@image_border"),
    };
    let has_content = screen.background_color.is_some()
        || !screen.background_image.is_empty()
        || !screen.image.is_empty();
    has_content.then_some(screen)
}

/// Parses the launch screen and its per-orientation variants.
pub struct SplashScreenHandler;

impl ManifestHandler for SplashScreenHandler {
    fn key(&self) -> &str {
        SplashScreenInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let Some(launch_screen) =
            get_one_or_many(manifest.value(), SplashScreenInfo::KEY, TIZEN_NAMESPACE)
                .into_iter()
                .next()
        else {
            return Err(HandlerError::new(
                "Cannot find launch_screen element with tizen namespace",
            ));
        };

        let ready_when = launch_screen.get_string("@ready_when").unwrap_or_default();
        let Some(ready_when) = ReadyWhen::parse(ready_when) else {
            return Err(HandlerError::new(format!(
                "Wrong value of launch screen ready_when: '{ready_when}'"
            )));
        };

        let mut info = SplashScreenInfo {
            ready_when,
            ..SplashScreenInfo::default()
        };
        for orientation in ScreenOrientation::ALL {
            let failed = || {
                HandlerError::new(format!(
                    "Failed to parse launch screen {} orientation",
                    orientation.label()
                ))
            };
            let elements = get_one_or_many(manifest.value(), orientation.path(), TIZEN_NAMESPACE);
            match elements.as_slice() {
                [] => {}
                [element] => {
                    let screen = parse_screen(element).ok_or_else(failed)?;
                    info.screens.insert(orientation, screen);
                }
                _ => return Err(failed()),
            }
        }

        Ok(Some(Box::new(info)))
    }
}
