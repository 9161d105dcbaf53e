//! Handler for `<tizen:allow-navigation>`.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

/// Domains the widget may navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedNavigationInfo {
    pub allowed_domains: Vec<String>,
}

impl AllowedNavigationInfo {
    pub const KEY: &'static str = "widget.allow-navigation";

    /// Build from a space separated domain list.
    #[must_use]
    pub fn from_domains(domains: &str) -> Self {
        Self {
            allowed_domains: domains
                .split(' ')
                .filter(|domain| !domain.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// The last tizen declaration wins. An element without text means the
/// widget gets no navigation entry at all.
pub struct NavigationHandler;

impl ManifestHandler for NavigationHandler {
    fn key(&self) -> &str {
        AllowedNavigationInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let mut domains = None;
        for element in get_one_or_many(manifest.value(), AllowedNavigationInfo::KEY, TIZEN_NAMESPACE) {
            let Some(text) = element.get_string("#text") else {
                tracing::debug!("allow-navigation without domains");
                return Ok(None);
            };
            domains = Some(text);
        }
        Ok(domains.map(|domains| {
            Box::new(AllowedNavigationInfo::from_domains(domains)) as Box<dyn ManifestData>
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::widget_manifest;
    use manifest_parser::downcast_data;
    use pretty_assertions::assert_eq;

    fn domains(body: &str) -> Option<Vec<String>> {
        NavigationHandler
            .parse(&widget_manifest(body))
            .unwrap()
            .map(|data| {
                downcast_data::<AllowedNavigationInfo>(data.as_ref())
                    .unwrap()
                    .allowed_domains
                    .clone()
            })
    }

    #[test]
    fn test_domains_split_on_spaces() {
        assert_eq!(
            domains("<tizen:allow-navigation>tizen.org  *.example.com</tizen:allow-navigation>"),
            Some(vec!["tizen.org".to_string(), "*.example.com".to_string()])
        );
    }

    #[test]
    fn test_last_declaration_wins() {
        assert_eq!(
            domains(
                "<tizen:allow-navigation>a.com</tizen:allow-navigation>
                 <allow-navigation>w3c.com</allow-navigation>
                 <tizen:allow-navigation>b.com</tizen:allow-navigation>"
            ),
            Some(vec!["b.com".to_string()])
        );
    }

    #[test]
    fn test_missing_text_gives_no_entry() {
        assert_eq!(domains("<tizen:allow-navigation/>"), None);
        assert_eq!(domains("<allow-navigation>w3c.com</allow-navigation>"), None);
    }
}
