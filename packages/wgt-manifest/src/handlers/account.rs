//! Handler for `<tizen:account>` provider declarations.

use manifest_parser::utils::{get_one_or_many, validate_language_tag};
use manifest_parser::{
    Dictionary, HandlerError, HandlerResult, Manifest, ManifestData, ManifestHandler,
};

use crate::config::TIZEN_NAMESPACE;

const ICON_SECTIONS: &[&str] = &["Account", "AccountSmall"];

/// An account icon and the section it is shown in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIcon {
    pub section: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SingleAccountInfo {
    pub multiple_account_support: bool,
    /// `(name, lang)` pairs; `lang` is empty when not given.
    pub names: Vec<(String, String)>,
    pub icons: Vec<AccountIcon>,
    pub capabilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountInfo {
    pub accounts: Vec<SingleAccountInfo>,
}

impl AccountInfo {
    pub const KEY: &'static str = "widget.account";
}

fn text(element: &Dictionary) -> String {
    element.get_string("#text").unwrap_or_default().to_string()
}

/// Required children named `name`; `None` when there are none.
fn required_children<'a>(account: &'a Dictionary, name: &str) -> Option<Vec<&'a Dictionary>> {
    account
        .has_key(name)
        .then(|| get_one_or_many(account, name, ""))
}

fn parse_names(account: &Dictionary) -> Option<Vec<(String, String)>> {
    required_children(account, "display-name")?
        .into_iter()
        .map(|name| {
            let lang = name.get_string("@lang").unwrap_or_default();
            if name.has_key("@lang") && !validate_language_tag(lang) {
                return None;
            }
            Some((text(name), lang.to_string()))
        })
        .collect()
}

fn parse_icons(account: &Dictionary) -> Option<Vec<AccountIcon>> {
    required_children(account, "icon")?
        .into_iter()
        .map(|icon| {
            let section = icon.get_string("@section").unwrap_or_default();
            ICON_SECTIONS.contains(&section).then(|| AccountIcon {
                section: section.to_string(),
                path: text(icon),
            })
        })
        .collect()
}

fn parse_account(account: &Dictionary) -> HandlerResult<SingleAccountInfo> {
    let multiple_account_support = match account.get_string("@multiple-account-support") {
        Some("true") => true,
        Some("false") => false,
        Some(_) => {
            return Err(HandlerError::new(
                "Multiple apps support in account has invalid (not boolean) value",
            ))
        }
        None => {
            return Err(HandlerError::new(
                "Error while parsing multiple apps support in account",
            ))
        }
    };
    let names =
        parse_names(account).ok_or_else(|| HandlerError::new("Error while parsing account names"))?;
    let icons =
        parse_icons(account).ok_or_else(|| HandlerError::new("Error while parsing account icons"))?;
    let capabilities = get_one_or_many(account, "capability", "")
        .into_iter()
        .map(text)
        .collect();

    Ok(SingleAccountInfo {
        multiple_account_support,
        names,
        icons,
        capabilities,
    })
}

pub struct AccountHandler;

impl ManifestHandler for AccountHandler {
    fn key(&self) -> &str {
        AccountInfo::KEY
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let accounts = get_one_or_many(manifest.value(), AccountInfo::KEY, TIZEN_NAMESPACE)
            .into_iter()
            .map(parse_account)
            .collect::<HandlerResult<Vec<_>>>()?;
        Ok(Some(Box::new(AccountInfo { accounts })))
    }
}
