use crate::compat_check::domain::{LicenseVerdict, PluginInventoryItem, PortalFetchOutcome};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Body of a Portal scan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortalScanRequest {
    pub license_key: String,
    pub site: String,
    pub plugins: Vec<PluginInventoryItem>,
}

/// PortalClient port for the licensed compatibility backend
///
/// Unlike the public sources, Portal failures are reported: the user needs
/// to know why a license or scan action did not go through.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// Queues a compatibility scan for the submitted plugins
    ///
    /// # Errors
    /// Returns `CompatError::PortalRequestFailed` on transport failure or a
    /// rejected request, carrying the Portal's message when it sent one
    async fn submit_scan(&self, request: &PortalScanRequest) -> Result<()>;

    /// Fetches the results of the most recent scan for the site
    async fn fetch_results(&self, license_key: &str, site: &str) -> Result<PortalFetchOutcome>;

    /// Asks the Portal whether the key is valid for the site host
    ///
    /// An HTTP answer of any status yields a verdict; only a transport
    /// failure is an error.
    async fn validate_license(&self, license_key: &str, site: &str) -> Result<LicenseVerdict>;
}

#[async_trait]
impl<T: PortalClient + ?Sized> PortalClient for Arc<T> {
    async fn submit_scan(&self, request: &PortalScanRequest) -> Result<()> {
        (**self).submit_scan(request).await
    }

    async fn fetch_results(&self, license_key: &str, site: &str) -> Result<PortalFetchOutcome> {
        (**self).fetch_results(license_key, site).await
    }

    async fn validate_license(&self, license_key: &str, site: &str) -> Result<LicenseVerdict> {
        (**self).validate_license(license_key, site).await
    }
}
