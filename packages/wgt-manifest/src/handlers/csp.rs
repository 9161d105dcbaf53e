//! Handlers for `<tizen:content-security-policy>` and its report-only twin.

use manifest_parser::utils::get_one_or_many;
use manifest_parser::{HandlerResult, Manifest, ManifestData, ManifestHandler};

use crate::config::TIZEN_NAMESPACE;

/// Which of the two policy elements a handler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    Csp,
    CspReportOnly,
}

impl SecurityType {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SecurityType::Csp => CspInfo::KEY,
            SecurityType::CspReportOnly => CspInfo::REPORT_ONLY_KEY,
        }
    }
}

/// Policy text of the first tizen element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CspInfo {
    pub security_rules: String,
}

impl CspInfo {
    pub const KEY: &'static str = "widget.content-security-policy";
    pub const REPORT_ONLY_KEY: &'static str = "widget.content-security-policy-report-only";
}

pub struct CspHandler {
    security_type: SecurityType,
}

impl CspHandler {
    #[must_use]
    pub fn new(security_type: SecurityType) -> Self {
        Self { security_type }
    }
}

impl ManifestHandler for CspHandler {
    fn key(&self) -> &str {
        self.security_type.key()
    }

    fn parse(&self, manifest: &Manifest) -> HandlerResult<Option<Box<dyn ManifestData>>> {
        let Some(policy) = get_one_or_many(manifest.value(), self.key(), TIZEN_NAMESPACE)
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        Ok(Some(Box::new(CspInfo {
            security_rules: policy.get_string("#text").unwrap_or_default().to_string(),
        })))
    }
}
