//! Handler for `<tizen:background-category>`.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerError, HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

/// Background categories the widget keeps running for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackgroundCategoryInfoList {
    pub background_categories: Vec<String>,
}

impl BackgroundCategoryInfoList {
    pub const KEY: &'static str = "widget.background-category";
}

pub struct BackgroundCategoryHandler;

impl ManifestHandler for BackgroundCategoryHandler {
    fn key(&self) -> &str {
        BackgroundCategoryInfoList::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let background_categories =
            get_one_or_many(manifest.value(), BackgroundCategoryInfoList::KEY, TIZEN_NAMESPACE)
                .into_iter()
                .map(|element| {
                    element.get_string("@value").map(str::to_string).ok_or_else(|| {
                        HandlerError::new("Parsing background-category element failed")
                    })
                })
                .collect::<HandlerResult<Vec<_>>>()?;
        Ok(Some(Box::new(BackgroundCategoryInfoList {
            background_categories,
        })))
    }
}
