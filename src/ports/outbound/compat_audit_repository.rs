use crate::compat_check::domain::CompatibilityAudit;
use async_trait::async_trait;

/// CompatAuditRepository port for the PHP-compatibility audit source
#[async_trait]
pub trait CompatAuditRepository: Send + Sync {
    /// Fetches the audit for one released version of a plugin
    ///
    /// Fail-soft: any failure, a 404 status, or an empty compatible list
    /// yields [`CompatibilityAudit::NoData`].
    async fn fetch_audit(&self, slug: &str, latest_version: &str) -> CompatibilityAudit;
}
