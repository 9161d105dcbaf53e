//! Handler for `<tizen:ime>` input method declarations.

use std::sync::LazyLock;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation, Value,
};
use regex::Regex;

use super::unexpected_data;
use crate::config::TIZEN_NAMESPACE;

/// UUID in 8-4-4-4-12 form.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-zA-Z]{8}([-][0-9a-zA-Z]{4}){3}[-][0-9a-zA-Z]{12}$").expect("valid regex")
});

const ERR_LANGUAGES: &str = "At least and only ONE tizen:languages tag should be specified";
const ERR_NO_LANGUAGES: &str = "At least one language of ime element should be specified";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImeInfo {
    pub uuid: String,
    pub languages: Vec<String>,
}

impl ImeInfo {
    pub const KEY: &'static str = "widget.ime";
}

fn parse_language(language: &Value) -> HandlerResult<Option<String>> {
    let Some(language) = language.as_dictionary() else {
        return Ok(None);
    };
    match language.get_string("#text") {
        Some(text) if !text.is_empty() => Ok(Some(text.to_string())),
        _ => Err(HandlerError::new("Language cannot be empty")),
    }
}

fn parse_ime(ime: &Dictionary) -> HandlerResult<ImeInfo> {
    let Some(uuid) = ime.get_dictionary("uuid").and_then(|uuid| uuid.get_string("#text")) else {
        return Err(HandlerError::new("Only one uuid tag should be specified"));
    };

    let languages = ime
        .get_dictionary("languages")
        .ok_or_else(|| HandlerError::new(ERR_LANGUAGES))?;
    let languages = match languages.get("language") {
        Some(Value::List(items)) => items
            .iter()
            .map(parse_language)
            .collect::<HandlerResult<Vec<_>>>()?,
        Some(single) => vec![parse_language(single)?],
        None => return Err(HandlerError::new(ERR_NO_LANGUAGES)),
    };

    Ok(ImeInfo {
        uuid: uuid.to_string(),
        languages: languages.into_iter().flatten().collect(),
    })
}

pub struct ImeHandler;

impl ManifestHandler for ImeHandler {
    fn key(&self) -> &str {
        ImeInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let elements = get_one_or_many(manifest.value(), ImeInfo::KEY, TIZEN_NAMESPACE);
        match elements.as_slice() {
            [] => Ok(None),
            [ime] => Ok(Some(Box::new(parse_ime(ime)?))),
            _ => Err(HandlerError::new("Only one ime tag should be specified")),
        }
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let ime = downcast_data::<ImeInfo>(data).ok_or_else(unexpected_data)?;
        if ime.uuid.is_empty() {
            return Err(HandlerError::new("The UUID of ime element is obligatory"));
        }
        if !UUID_PATTERN.is_match(&ime.uuid) {
            return Err(HandlerError::new(
                "Uuid should be in proper format (8-4-4-4-12)",
            ));
        }
        if ime.languages.is_empty() {
            return Err(HandlerError::new(ERR_NO_LANGUAGES));
        }
        Ok(Validation::Accepted)
    }
}
