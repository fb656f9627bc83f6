use super::license::normalize_site_host;
use super::persisted_state;
use crate::application::dto::ActionOutcome;
use crate::compat_check::domain::{
    LicenseState, PluginInventoryItem, PortalFetchOutcome, Scope,
};
use crate::compat_check::services::{OverrideMerger, SlugResolver};
use crate::ports::outbound::{ComponentSource, KeyValueStore, PortalClient, PortalScanRequest};
use crate::shared::error::CompatError;
use crate::shared::Result;
use std::time::Duration;

/// Default interval between background result fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// PortalSyncUseCase - exchanges scans and results with the Portal
///
/// Completed results are merged into the override map; the merge goes
/// through the same store helpers as every other writer, so the cached
/// rows of both scopes are dropped whenever an override changes.
pub struct PortalSyncUseCase<S, CS, P> {
    store: S,
    component_source: CS,
    portal: P,
    merger: OverrideMerger,
    site_url: String,
    inventory_scope: Scope,
}

impl<S, CS, P> PortalSyncUseCase<S, CS, P>
where
    S: KeyValueStore,
    CS: ComponentSource,
    P: PortalClient,
{
    pub fn new(store: S, component_source: CS, portal: P, site_url: impl Into<String>) -> Self {
        Self {
            store,
            component_source,
            portal,
            merger: OverrideMerger::default(),
            site_url: site_url.into(),
            inventory_scope: Scope::Site,
        }
    }

    pub fn with_merger(mut self, merger: OverrideMerger) -> Self {
        self.merger = merger;
        self
    }

    /// Scope whose activation flags accompany the submitted inventory
    pub fn with_inventory_scope(mut self, scope: Scope) -> Self {
        self.inventory_scope = scope;
        self
    }

    /// Submits the installed plugins for a Portal scan
    pub async fn request_scan(&self) -> Result<ActionOutcome> {
        let license = self.active_license()?;
        let site = normalize_site_host(&self.site_url)?;

        let plugins: Vec<PluginInventoryItem> = self
            .component_source
            .enumerate(self.inventory_scope)?
            .into_iter()
            .filter_map(|component| {
                let slug = SlugResolver::resolve(
                    &component.file_identifier,
                    &component.text_domain,
                    &component.homepage_url,
                );
                (!slug.is_empty()).then(|| PluginInventoryItem {
                    slug,
                    version: component.current_version,
                })
            })
            .collect();

        let count = plugins.len();
        self.portal
            .submit_scan(&PortalScanRequest {
                license_key: license.key,
                site: site.clone(),
                plugins,
            })
            .await?;

        tracing::info!(site = %site, plugins = count, "Portal scan requested");
        Ok(ActionOutcome::success(format!(
            "Scan requested for {} plugin(s). Results will be fetched when ready.",
            count
        ))
        .pending())
    }

    /// Fetches the latest Portal results and merges them into the overrides
    pub async fn fetch_remote_results(&self) -> Result<ActionOutcome> {
        let license = self.active_license()?;
        let site = normalize_site_host(&self.site_url)?;

        let entries = match self.portal.fetch_results(&license.key, &site).await? {
            PortalFetchOutcome::Pending => {
                tracing::debug!(site = %site, "Portal scan still pending");
                return Ok(ActionOutcome::success("Portal scan is still in progress.").pending());
            }
            PortalFetchOutcome::Completed(entries) => entries,
        };

        let computed = self.merger.compute(&entries);
        let mut overrides = persisted_state::read_overrides(&self.store)?;
        let changed = OverrideMerger::apply(computed, &mut overrides);
        if changed > 0 {
            persisted_state::write_overrides(&self.store, &overrides)?;
        }

        tracing::info!(entries = entries.len(), changed, "merged Portal results");
        Ok(ActionOutcome::success(format!(
            "Portal results merged: {} plugin(s) updated.",
            changed
        ))
        .with_updated_count(changed))
    }

    /// Runs `fetch_remote_results` on a fixed interval
    ///
    /// The first fetch happens immediately. Failures are logged and the loop
    /// keeps going. `max_runs` bounds the number of fetches; `None` polls
    /// until the task is dropped.
    pub async fn poll(&self, interval: Duration, max_runs: Option<u64>) -> u64 {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let mut runs = 0;
        loop {
            if max_runs.is_some_and(|max| runs >= max) {
                return runs;
            }
            ticker.tick().await;
            runs += 1;

            match self.fetch_remote_results().await {
                Ok(outcome) if outcome.scan_pending => {
                    tracing::debug!(run = runs, "poll: scan pending");
                }
                Ok(outcome) => {
                    tracing::info!(run = runs, updated = outcome.updated_count, "poll: results merged");
                }
                Err(e) => {
                    tracing::warn!(run = runs, error = %e, "poll: fetching Portal results failed");
                }
            }
        }
    }

    fn active_license(&self) -> Result<LicenseState> {
        let license = persisted_state::read_license(&self.store)?;
        if !license.is_active() {
            return Err(CompatError::LicenseRequired.into());
        }
        Ok(license)
    }
}
