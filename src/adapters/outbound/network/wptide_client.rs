use super::http_client::{build_client, trim_base_url};
use crate::compat_check::domain::CompatibilityAudit;
use crate::ports::outbound::CompatAuditRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Public WPTide API root
pub const DEFAULT_WPTIDE_API_URL: &str = "https://wptide.org";

const AUDIT_TIMEOUT: Duration = Duration::from_secs(20);

/// WpTideClient adapter for the WPTide PHP-compatibility audits
pub struct WpTideClient {
    client: reqwest::Client,
    base_url: String,
}

impl WpTideClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_WPTIDE_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(AUDIT_TIMEOUT)?,
            base_url: trim_base_url(base_url),
        })
    }

    async fn fetch_report(&self, slug: &str, version: &str) -> Result<Value> {
        let url = format!(
            "{}/api/v1/audit/wporg/plugin/{}/{}?reports=all",
            self.base_url,
            urlencoding::encode(slug),
            urlencoding::encode(version)
        );
        let response = self.client.get(&url).timeout(AUDIT_TIMEOUT).send().await?;
        // Error statuses still carry a JSON body that is inspected below
        Ok(response.json().await?)
    }

    /// Interprets an audit body; anything unexpected is `NoData`
    fn parse_audit(body: &Value) -> CompatibilityAudit {
        if !body.is_object() || body.get("error").is_some() {
            return CompatibilityAudit::NoData;
        }

        let status = match body.get("status") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if status == "404" {
            return CompatibilityAudit::NoData;
        }

        let versions = body
            .pointer("/reports/phpcs_phpcompatibilitywp/report/compatible")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        CompatibilityAudit::from_versions(versions)
    }
}

#[async_trait]
impl CompatAuditRepository for WpTideClient {
    async fn fetch_audit(&self, slug: &str, latest_version: &str) -> CompatibilityAudit {
        match self.fetch_report(slug, latest_version).await {
            Ok(body) => Self::parse_audit(&body),
            Err(e) => {
                tracing::warn!(slug, version = latest_version, error = %e, "WPTide audit lookup failed");
                CompatibilityAudit::NoData
            }
        }
    }
}
