//! Handler for `<tizen:privilege>`.

use std::collections::BTreeSet;

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionsInfo {
    pub api_permissions: BTreeSet<String>,
}

impl PermissionsInfo {
    pub const KEY: &'static str = "widget.privilege";
}

pub struct PermissionsHandler;

impl ManifestHandler for PermissionsHandler {
    fn key(&self) -> &str {
        PermissionsInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut info = PermissionsInfo::default();
        for privilege in get_one_or_many(manifest.value(), PermissionsInfo::KEY, TIZEN_NAMESPACE) {
            let Some(name) = privilege.get_string("@name").filter(|name| !name.is_empty()) else {
                continue;
            };
            if !info.api_permissions.insert(name.to_string()) {
                tracing::warn!(privilege = %name, "Duplicated permission names found");
            }
        }
        Ok(Some(Box::new(info)))
    }
}
