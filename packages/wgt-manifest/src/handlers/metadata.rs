//! Handler for `<tizen:metadata>`.

use std::collections::BTreeMap;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerError, HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

/// Key/value metadata; the first declaration of a key wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetaDataInfo {
    metadata: BTreeMap<String, String>,
}

impl MetaDataInfo {
    pub const KEY: &'static str = "widget.metadata";

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Value for `key`, empty when the key is absent.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.metadata.get(key).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub struct MetaDataHandler;

impl ManifestHandler for MetaDataHandler {
    fn key(&self) -> &str {
        MetaDataInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut info = MetaDataInfo::default();
        for entry in get_one_or_many(manifest.value(), MetaDataInfo::KEY, TIZEN_NAMESPACE) {
            let Some(key) = entry.get_string("@key") else {
                return Err(HandlerError::new("Invalid key of tizen metaData."));
            };
            info.set_value(key, entry.get_string("@value").unwrap_or_default());
        }
        Ok(Some(Box::new(info)))
    }
}
