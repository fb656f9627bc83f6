use super::http_client::{build_client, trim_base_url};
use crate::compat_check::domain::{LicenseVerdict, PortalFetchOutcome, PortalScanEntry};
use crate::ports::outbound::{PortalClient, PortalScanRequest};
use crate::shared::error::CompatError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Portal API root used when no other is configured
pub const DEFAULT_PORTAL_API_URL: &str = "https://www.compatshield.com/api/v1";

const PORTAL_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Serialize)]
struct SiteCredentials<'a> {
    license_key: &'a str,
    site: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ScanResultsBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Option<Vec<PortalScanEntry>>,
}

/// PortalHttpClient adapter for the licensed Portal backend
///
/// Transport failures and rejected requests become
/// [`CompatError::PortalRequestFailed`] carrying the Portal's own message
/// when the body had one.
pub struct PortalHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalHttpClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_PORTAL_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(PORTAL_TIMEOUT)?,
            base_url: trim_base_url(base_url),
        })
    }

    async fn post<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> Result<(u16, Value)> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CompatError::PortalRequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        // Portal bodies are optional on errors and on 202
        let text = response.text().await.unwrap_or_default();
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);
        tracing::debug!(endpoint, status, "Portal response");
        Ok((status, value))
    }

    /// First of `message`, `detail` or `error` that holds text
    fn upstream_message(body: &Value) -> Option<String> {
        ["message", "detail", "error"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
    }

    fn rejected(status: u16, body: &Value) -> anyhow::Error {
        let message = Self::upstream_message(body)
            .unwrap_or_else(|| format!("Portal returned status code {}", status));
        CompatError::PortalRequestFailed { message }.into()
    }

    fn is_success(status: u16) -> bool {
        (200..300).contains(&status)
    }
}

#[async_trait]
impl PortalClient for PortalHttpClient {
    async fn submit_scan(&self, request: &PortalScanRequest) -> Result<()> {
        let (status, body) = self.post("scan-requests", request).await?;
        if !Self::is_success(status) {
            return Err(Self::rejected(status, &body));
        }
        Ok(())
    }

    async fn fetch_results(&self, license_key: &str, site: &str) -> Result<PortalFetchOutcome> {
        let credentials = SiteCredentials { license_key, site };
        let (status, body) = self.post("scan-results", &credentials).await?;

        if status == 202 {
            return Ok(PortalFetchOutcome::Pending);
        }
        if !Self::is_success(status) {
            return Err(Self::rejected(status, &body));
        }

        let parsed: ScanResultsBody =
            serde_json::from_value(body).map_err(|e| CompatError::PortalRequestFailed {
                message: format!("Unexpected scan results body: {}", e),
            })?;

        match parsed.status.as_deref().map(str::to_lowercase).as_deref() {
            Some("pending") | Some("processing") | Some("queued") => Ok(PortalFetchOutcome::Pending),
            Some("completed") | Some("complete") | None => Ok(PortalFetchOutcome::Completed(
                parsed.results.unwrap_or_default(),
            )),
            Some(other) => Err(CompatError::PortalRequestFailed {
                message: format!("Unknown scan status '{}'", other),
            }
            .into()),
        }
    }

    async fn validate_license(&self, license_key: &str, site: &str) -> Result<LicenseVerdict> {
        let credentials = SiteCredentials { license_key, site };
        let (status, body) = self.post("licenses/validate", &credentials).await?;

        let flagged_valid = body.get("valid").and_then(Value::as_bool) == Some(true);
        Ok(LicenseVerdict {
            valid: Self::is_success(status) && flagged_valid,
            message: Self::upstream_message(&body),
        })
    }
}
