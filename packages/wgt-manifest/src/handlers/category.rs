//! Handler for `<tizen:category>`.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{
    downcast_data, HandlerError, HandlerResult, Manifest, ManifestData, ManifestDataMap,
    ManifestHandler, Validation,
};

use super::unexpected_data;
use crate::config::TIZEN_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryInfoList {
    pub categories: Vec<String>,
}

impl CategoryInfoList {
    pub const KEY: &'static str = "widget.category";
}

pub struct CategoryHandler;

impl ManifestHandler for CategoryHandler {
    fn key(&self) -> &str {
        CategoryInfoList::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let categories = get_one_or_many(manifest.value(), CategoryInfoList::KEY, TIZEN_NAMESPACE)
            .into_iter()
            .map(|category| {
                category
                    .get_string("@name")
                    .map(str::to_string)
                    .ok_or_else(|| HandlerError::new("Parsing category element failed"))
            })
            .collect::<HandlerResult<Vec<_>>>()?;
        Ok(Some(Box::new(CategoryInfoList { categories })))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let list = downcast_data::<CategoryInfoList>(data).ok_or_else(unexpected_data)?;
        if list.categories.iter().any(String::is_empty) {
            return Err(HandlerError::new(
                "The name element inside category element is obligatory",
            ));
        }
        Ok(Validation::Accepted)
    }
}
