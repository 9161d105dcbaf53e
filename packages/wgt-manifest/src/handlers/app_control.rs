//! Handler for `<tizen:app-control>`.

use manifest_parser::utils::{get_one_or_many, is_valid_iri};
use manifest_parser::{
    downcast_data, Dictionary, HandlerError, HandlerResult, Manifest, ManifestData,
    ManifestDataMap, ManifestHandler, Validation,
};

use super::tizen_application::TizenApplicationInfo;
use super::unexpected_data;
use crate::config::{version, LAUNCH_MODE_MIN_VERSION, TIZEN_NAMESPACE};

const RELOAD_ENABLED: &str = "enable";
const RELOAD_DISABLED: &str = "disable";

/// One application control the widget answers to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppControlInfo {
    pub src: String,
    pub operation: String,
    pub uri: String,
    pub mime: String,
    pub reload: String,
}

/// All declared application controls, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppControlInfoList {
    pub controls: Vec<AppControlInfo>,
}

impl AppControlInfoList {
    pub const KEY: &'static str = "widget.app-control";
}

/// `@name` of the single child element `child`, empty when absent.
fn child_name(control: &Dictionary, child: &str) -> String {
    control
        .get_dictionary(child)
        .and_then(|dict| dict.get_string("@name"))
        .unwrap_or_default()
        .to_string()
}

fn parse_entry(control: &Dictionary) -> AppControlInfo {
    AppControlInfo {
        src: child_name(control, "src"),
        operation: child_name(control, "operation"),
        uri: child_name(control, "uri"),
        mime: child_name(control, "mime"),
        reload: control
            .get_string("src.@reload")
            .unwrap_or_default()
            .to_string(),
    }
}

/// Parses tizen `app-control` elements.
///
/// Validation needs the application's required version, which decides
/// whether `reload` is allowed and what it defaults to.
pub struct AppControlHandler;

impl ManifestHandler for AppControlHandler {
    fn key(&self) -> &str {
        AppControlInfoList::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let controls = get_one_or_many(manifest.value(), AppControlInfoList::KEY, TIZEN_NAMESPACE)
            .into_iter()
            .map(parse_entry)
            .collect();
        Ok(Some(Box::new(AppControlInfoList { controls })))
    }

    fn validate(
        &self,
        data: &dyn ManifestData,
        handlers_output: &ManifestDataMap,
    ) -> HandlerResult<Validation> {
        let list = downcast_data::<AppControlInfoList>(data).ok_or_else(unexpected_data)?;
        let reload_version = version(LAUNCH_MODE_MIN_VERSION);

        let mut updated = list.clone();
        let mut changed = false;
        for control in &mut updated.controls {
            if control.src.is_empty() {
                return Err(HandlerError::new(
                    "The src child element of app-control element is obligatory",
                ));
            }
            if control.operation.is_empty() {
                return Err(HandlerError::new(
                    "The operation child element of app-control element is obligatory",
                ));
            }
            if !is_valid_iri(&control.operation) {
                return Err(HandlerError::new(
                    "The operation child element of app-control element is not valid url",
                ));
            }

            let Some(required) = handlers_output
                .get_as::<TizenApplicationInfo>(TizenApplicationInfo::KEY)
                .and_then(TizenApplicationInfo::required_version_number)
            else {
                return Err(HandlerError::new(
                    "Cannot retrieve required API version from widget",
                ));
            };

            if required >= reload_version {
                if control.reload.is_empty() {
                    control.reload = RELOAD_ENABLED.to_string();
                    changed = true;
                } else if control.reload != RELOAD_ENABLED && control.reload != RELOAD_DISABLED {
                    return Err(HandlerError::new(
                        "The improper value was given for appcontrol reload",
                    ));
                }
            } else if !control.reload.is_empty() {
                return Err(HandlerError::new(
                    "reload attribute cannot be used for api version lower than 2.4",
                ));
            }
        }

        Ok(if changed {
            Validation::replaced(updated)
        } else {
            Validation::Accepted
        })
    }

    fn prerequisite_keys(&self) -> &[&str] {
        &[TizenApplicationInfo::KEY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{
        application_output, parse_and_validate_with, widget_manifest,
    };
    use pretty_assertions::assert_eq;

    fn control(src: &str, operation: &str) -> String {
        format!(
            r#"<tizen:app-control><tizen:src name="{src}"/><tizen:operation name="{operation}"/></tizen:app-control>"#
        )
    }

    fn validate(body: &str, required_version: &str) -> HandlerResult<AppControlInfoList> {
        let data = parse_and_validate_with(
            &AppControlHandler,
            &widget_manifest(body),
            &application_output(required_version),
        )?;
        Ok(downcast_data::<AppControlInfoList>(data.as_ref()).unwrap().clone())
    }

    #[test]
    fn test_parse_children() {
        let manifest = widget_manifest(
            r#"<tizen:app-control>
                 <tizen:src name="edit.html" reload="disable"/>
                 <tizen:operation name="http://tizen.org/appcontrol/operation/edit"/>
                 <tizen:uri name="myapp"/>
                 <tizen:mime name="image/jpeg"/>
               </tizen:app-control>
               <app-control><src name="ignored.html"/></app-control>"#,
        );
        let data = AppControlHandler.parse(&manifest).unwrap().unwrap();
        let list = downcast_data::<AppControlInfoList>(data.as_ref()).unwrap();
        assert_eq!(
            list.controls,
            vec![AppControlInfo {
                src: "edit.html".to_string(),
                operation: "http://tizen.org/appcontrol/operation/edit".to_string(),
                uri: "myapp".to_string(),
                mime: "image/jpeg".to_string(),
                reload: "disable".to_string(),
            }]
        );
    }

    #[test]
    fn test_src_is_obligatory() {
        let err = validate(&control("", "http://tizen.org/appcontrol/operation/view"), "2.4")
            .unwrap_err();
        assert_eq!(
            err.message(),
            "The src child element of app-control element is obligatory"
        );
    }

    #[test]
    fn test_operation_is_obligatory() {
        let err = validate(&control("index.html", ""), "2.4").unwrap_err();
        assert_eq!(
            err.message(),
            "The operation child element of app-control element is obligatory"
        );
    }

    #[test]
    fn test_operation_must_be_url() {
        let err = validate(&control("index.html", "not_valid_url"), "2.4").unwrap_err();
        assert_eq!(
            err.message(),
            "The operation child element of app-control element is not valid url"
        );
    }

    #[test]
    fn test_missing_application_version() {
        let err = validate(
            &control("index.html", "http://tizen.org/appcontrol/operation/view"),
            "",
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "Cannot retrieve required API version from widget"
        );
    }

    #[test]
    fn test_reload_defaults_to_enable_from_2_4() {
        let list = validate(
            &control("index.html", "http://tizen.org/appcontrol/operation/view"),
            "2.4",
        )
        .unwrap();
        assert_eq!(list.controls[0].reload, "enable");
    }

    #[test]
    fn test_reload_rejected_before_2_4() {
        let body = r#"<tizen:app-control>
                        <tizen:src name="index.html" reload="enable"/>
                        <tizen:operation name="http://tizen.org/appcontrol/operation/view"/>
                      </tizen:app-control>"#;
        let err = validate(body, "2.3").unwrap_err();
        assert_eq!(
            err.message(),
            "reload attribute cannot be used for api version lower than 2.4"
        );

        let list = validate(
            &control("index.html", "http://tizen.org/appcontrol/operation/view"),
            "2.3",
        )
        .unwrap();
        assert_eq!(list.controls[0].reload, "");
    }

    #[test]
    fn test_reload_improper_value() {
        let body = r#"<tizen:app-control>
                        <tizen:src name="index.html" reload="sometimes"/>
                        <tizen:operation name="http://tizen.org/appcontrol/operation/view"/>
                      </tizen:app-control>"#;
        let err = validate(body, "3.0").unwrap_err();
        assert_eq!(
            err.message(),
            "The improper value was given for appcontrol reload"
        );
    }
}
