//! Handler for `<tizen:service>` background services.

use manifest_parser::utils::{get_one_or_many, validate_tizen_application_id};
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation,
};

use super::unexpected_data;
use crate::config::TIZEN_NAMESPACE;

/// One declared service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceInfo {
    pub id: String,
    pub auto_restart: bool,
    pub on_boot: bool,
    /// Start file, relative to the package root.
    pub content: String,
    pub icon: String,
    pub description: String,
    pub categories: Vec<String>,
    /// `(lang, name)` pairs in document order.
    pub names: Vec<(String, String)>,
    /// `(key, value)` pairs in document order.
    pub metadata: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceList {
    pub services: Vec<ServiceInfo>,
}

impl ServiceList {
    pub const KEY: &'static str = "widget.service";
}

fn children<'a>(service: &'a Dictionary, name: &str) -> Vec<&'a Dictionary> {
    get_one_or_many(service, name, TIZEN_NAMESPACE)
}

/// The child named `name`, which may appear at most once.
fn at_most_one<'a>(service: &'a Dictionary, name: &str) -> HandlerResult<Option<&'a Dictionary>> {
    let mut items = children(service, name).into_iter();
    let first = items.next();
    if items.next().is_some() {
        return Err(HandlerError::new(format!(
            "tizen:{name} element of tizen:service should be declared only once"
        )));
    }
    Ok(first)
}

fn flag(service: &Dictionary, attribute: &str) -> bool {
    service.get_string(attribute) == Some("true")
}

fn parse_service(service: &Dictionary) -> HandlerResult<ServiceInfo> {
    let Some(id) = service.get_string("@id") else {
        return Err(HandlerError::new("Cannot get appid for tizen:service"));
    };

    let Some(content) = at_most_one(service, "content")? else {
        return Err(HandlerError::new("Missing tizen:content tag in tizen:service"));
    };
    let Some(content) = content.get_string("@src") else {
        return Err(HandlerError::new(
            "Missing 'src' attribute in tizen:content tag in tizen:service",
        ));
    };

    let icon = match at_most_one(service, "icon")? {
        Some(icon) => icon
            .get_string("@src")
            .ok_or_else(|| {
                HandlerError::new("Missing 'src' attribute in tizen:icon tag in tizen:service")
            })?
            .to_string(),
        None => String::new(),
    };

    let description = at_most_one(service, "description")?
        .and_then(|description| description.get_string("#text"))
        .unwrap_or_default()
        .to_string();

    let categories = children(service, "category")
        .into_iter()
        .map(|category| {
            category.get_string("@name").map(str::to_string).ok_or_else(|| {
                HandlerError::new(
                    "Missing 'name' attribute of tizen:category tag in tizen:service",
                )
            })
        })
        .collect::<HandlerResult<Vec<_>>>()?;

    let names: Vec<_> = children(service, "name")
        .into_iter()
        .map(|name| {
            (
                name.get_string("@lang").unwrap_or_default().to_string(),
                name.get_string("#text").unwrap_or_default().to_string(),
            )
        })
        .collect();
    if names.is_empty() {
        return Err(HandlerError::new(
            "Cannot find tizen:name element for tizen:service. At least one must be provided.",
        ));
    }

    let metadata = children(service, "metadata")
        .into_iter()
        .map(|entry| {
            let key = entry
                .get_string("@key")
                .ok_or_else(|| HandlerError::new("'key' attribute of metadata is obligatory"))?;
            let value = entry.get_string("@value").unwrap_or_default();
            Ok((key.to_string(), value.to_string()))
        })
        .collect::<HandlerResult<Vec<_>>>()?;

    Ok(ServiceInfo {
        id: id.to_string(),
        auto_restart: flag(service, "@auto-restart"),
        on_boot: flag(service, "@on-boot"),
        content: content.to_string(),
        icon,
        description,
        categories,
        names,
        metadata,
    })
}

/// Parses every tizen `service` element; any malformed one fails the parse.
pub struct ServiceHandler;

impl ManifestHandler for ServiceHandler {
    fn key(&self) -> &str {
        ServiceList::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let services = get_one_or_many(manifest.value(), ServiceList::KEY, TIZEN_NAMESPACE)
            .into_iter()
            .map(parse_service)
            .collect::<HandlerResult<Vec<_>>>()?;
        Ok(Some(Box::new(ServiceList { services })))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        _handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let list = downcast_data::<ServiceList>(data).ok_or_else(unexpected_data)?;
        if list
            .services
            .iter()
            .any(|service| !validate_tizen_application_id(&service.id))
        {
            return Err(HandlerError::new(
                "The id property of application element does not match the format\n",
            ));
        }
        Ok(Validation::Accepted)
    }
}
