//! Handler for the w3c `<access>` elements (WARP).

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::WIDGET_NAMESPACE;

/// Network origins the widget may access, with whether subdomains are
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarpInfo {
    pub access: Vec<(String, bool)>,
}

impl WarpInfo {
    pub const KEY: &'static str = "widget.access";
}

pub struct WarpHandler;

impl ManifestHandler for WarpHandler {
    fn key(&self) -> &str {
        WarpInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let access = get_one_or_many(manifest.value(), WarpInfo::KEY, WIDGET_NAMESPACE)
            .into_iter()
            .map(|element| {
                let origin = element.get_string("@origin").unwrap_or_default();
                let subdomains = origin == "*" || element.get_string("@subdomains") == Some("true");
                (origin.to_string(), subdomains)
            })
            .collect();
        Ok(Some(Box::new(WarpInfo { access })))
    }
}
