use super::aggregate_compatibility::RowAggregator;
use super::dashboard::DashboardUseCase;
use super::license::LicenseUseCase;
use super::portal_sync::PortalSyncUseCase;
use super::scan_cache::ScanCacheUseCase;
use crate::application::dto::{ActionOutcome, ScanRequest};
use crate::application::read_models::{DashboardReadModel, EnvironmentStats};
use crate::compat_check::domain::{LicenseState, Operator, Scope, SystemInfo};
use crate::ports::outbound::{
    ComponentSource, CoreVersionSource, KeyValueStore, PortalClient, SiteEnvironment,
};
use crate::shared::Result;
use std::time::Duration;

/// CompatActionsUseCase - authorized entry point for every trigger action
///
/// Each action checks the operator's capability before touching the store
/// or the network. Scoped actions check the capability of their scope;
/// license and Portal actions check the capability of the default scope.
///
/// # Type Parameters
/// * `S` - KeyValueStore shared by all sub use cases
/// * `A` - RowAggregator used to rebuild the cache
/// * `CS` - ComponentSource implementation
/// * `SE` - SiteEnvironment implementation
/// * `CV` - CoreVersionSource implementation
/// * `P` - PortalClient implementation
pub struct CompatActionsUseCase<S, A, CS, SE, CV, P> {
    operator: Operator,
    default_scope: Scope,
    scan_cache: ScanCacheUseCase<S, A>,
    license: LicenseUseCase<S, P>,
    portal_sync: PortalSyncUseCase<S, CS, P>,
    dashboard: DashboardUseCase<CS, SE, CV>,
}

impl<S, A, CS, SE, CV, P> CompatActionsUseCase<S, A, CS, SE, CV, P>
where
    S: KeyValueStore,
    A: RowAggregator,
    CS: ComponentSource,
    SE: SiteEnvironment,
    CV: CoreVersionSource,
    P: PortalClient,
{
    pub fn new(
        operator: Operator,
        default_scope: Scope,
        scan_cache: ScanCacheUseCase<S, A>,
        license: LicenseUseCase<S, P>,
        portal_sync: PortalSyncUseCase<S, CS, P>,
        dashboard: DashboardUseCase<CS, SE, CV>,
    ) -> Self {
        Self {
            operator,
            default_scope,
            scan_cache,
            license,
            portal_sync,
            dashboard,
        }
    }

    /// Cached (or freshly built) rows plus the environment summary,
    /// narrowed to the requested plugin status
    pub async fn report(&self, request: ScanRequest) -> Result<DashboardReadModel> {
        self.authorize(request.scope, "view compatibility report")?;
        let rows = self.scan_cache.get(request).await?;
        let stats = self.dashboard.stats(request.scope).await?;
        Ok(DashboardReadModel::new(request.scope, stats, rows)
            .with_status_filter(request.status))
    }

    pub async fn stats(&self, scope: Scope) -> Result<EnvironmentStats> {
        self.authorize(scope, "view environment stats")?;
        self.dashboard.stats(scope).await
    }

    /// Runtime details of the PHP installation, checked against the default scope
    pub async fn system_info(&self) -> Result<SystemInfo> {
        self.authorize(self.default_scope, "view system info")?;
        Ok(self.dashboard.system_info().await)
    }

    /// Drops the scope's cache, asks the Portal for a scan when licensed,
    /// then rebuilds so the next read is served from the cache
    pub async fn rescan(&self, scope: Scope) -> Result<ActionOutcome> {
        self.authorize(scope, "rescan")?;
        self.scan_cache.invalidate(scope)?;

        let scan_pending = if self.license.current()?.is_active() {
            match self.portal_sync.request_scan().await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Portal scan request failed during rescan");
                    false
                }
            }
        } else {
            false
        };

        let rows = self.scan_cache.get(ScanRequest::new(scope, true)).await?;
        let outcome = ActionOutcome::success(format!(
            "Rescan complete: {} plugin(s) checked.",
            rows.len()
        ));
        Ok(if scan_pending {
            outcome.pending()
        } else {
            outcome
        })
    }

    pub async fn request_scan(&self) -> Result<ActionOutcome> {
        self.authorize(self.default_scope, "request Portal scan")?;
        self.portal_sync.request_scan().await
    }

    pub async fn fetch_remote_results(&self) -> Result<ActionOutcome> {
        self.authorize(self.default_scope, "fetch Portal results")?;
        self.portal_sync.fetch_remote_results().await
    }

    pub async fn validate_license(&self, key: &str, site: &str) -> Result<ActionOutcome> {
        self.authorize(self.default_scope, "validate license")?;
        self.license.validate(key, site).await
    }

    pub fn save_license(&self, key: &str) -> Result<ActionOutcome> {
        self.authorize(self.default_scope, "save license")?;
        self.license.save(key)
    }

    pub fn license_state(&self) -> Result<LicenseState> {
        self.authorize(self.default_scope, "view license")?;
        self.license.current()
    }

    /// Polls the Portal for results; returns the number of fetches made
    pub async fn poll(&self, interval: Duration, max_runs: Option<u64>) -> Result<u64> {
        self.authorize(self.default_scope, "poll Portal results")?;
        Ok(self.portal_sync.poll(interval, max_runs).await)
    }

    fn authorize(&self, scope: Scope, action: &str) -> Result<()> {
        self.operator.require(scope.required_capability(), action)
    }
}
