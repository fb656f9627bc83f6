use crate::compat_check::domain::{
    AggregatedRow, InstalledComponent, RemoteMetadata, RemoteOverrideMap, Scope,
};
use crate::compat_check::services::{RowBuilder, SlugResolver};
use crate::ports::outbound::{
    CompatAuditRepository, ComponentSource, CoreVersionSource, PluginMetadataRepository,
    ProgressReporter, SiteEnvironment,
};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Default number of plugins looked up at the same time
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Produces the full row list for a scope
///
/// The result cache depends on this seam rather than on the concrete use
/// case so that cache behaviour can be observed independently.
#[async_trait]
pub trait RowAggregator: Send + Sync {
    async fn aggregate(
        &self,
        scope: Scope,
        overrides: &RemoteOverrideMap,
    ) -> Result<Vec<AggregatedRow>>;
}

#[async_trait]
impl<T: RowAggregator + ?Sized> RowAggregator for Arc<T> {
    async fn aggregate(
        &self,
        scope: Scope,
        overrides: &RemoteOverrideMap,
    ) -> Result<Vec<AggregatedRow>> {
        (**self).aggregate(scope, overrides).await
    }
}

/// AggregateCompatibilityUseCase - joins local plugins with remote data
///
/// # Type Parameters
/// * `CS` - ComponentSource implementation
/// * `SE` - SiteEnvironment implementation
/// * `CV` - CoreVersionSource implementation
/// * `MR` - PluginMetadataRepository implementation
/// * `AR` - CompatAuditRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct AggregateCompatibilityUseCase<CS, SE, CV, MR, AR, PR> {
    component_source: CS,
    site_environment: SE,
    core_version_source: CV,
    metadata_repository: MR,
    audit_repository: AR,
    progress_reporter: PR,
    concurrency: usize,
}

impl<CS, SE, CV, MR, AR, PR> AggregateCompatibilityUseCase<CS, SE, CV, MR, AR, PR>
where
    CS: ComponentSource,
    SE: SiteEnvironment,
    CV: CoreVersionSource,
    MR: PluginMetadataRepository,
    AR: CompatAuditRepository,
    PR: ProgressReporter,
{
    pub fn new(
        component_source: CS,
        site_environment: SE,
        core_version_source: CV,
        metadata_repository: MR,
        audit_repository: AR,
        progress_reporter: PR,
    ) -> Self {
        Self {
            component_source,
            site_environment,
            core_version_source,
            metadata_repository,
            audit_repository,
            progress_reporter,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets how many plugins are looked up at once (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Builds one row; every lookup for the component completes first
    async fn build_row(
        &self,
        component: &InstalledComponent,
        overrides: &RemoteOverrideMap,
        latest_core: &str,
    ) -> AggregatedRow {
        let slug = SlugResolver::resolve(
            &component.file_identifier,
            &component.text_domain,
            &component.homepage_url,
        );

        let metadata = if slug.is_empty() {
            RemoteMetadata::empty()
        } else {
            self.metadata_repository.fetch_metadata(&slug).await
        };

        let php_supported = match RowBuilder::php_override(&slug, overrides) {
            Some(value) => value.to_string(),
            None if !slug.is_empty() && metadata.has_latest_version() => {
                let audit = self
                    .audit_repository
                    .fetch_audit(&slug, metadata.latest_version())
                    .await;
                RowBuilder::php_from_audit(Some(&audit))
            }
            None => RowBuilder::php_from_audit(None),
        };

        tracing::debug!(
            file = %component.file_identifier,
            slug = %slug,
            "aggregated plugin row"
        );
        RowBuilder::build(component, &metadata, php_supported, latest_core)
    }
}

#[async_trait]
impl<CS, SE, CV, MR, AR, PR> RowAggregator for AggregateCompatibilityUseCase<CS, SE, CV, MR, AR, PR>
where
    CS: ComponentSource,
    SE: SiteEnvironment,
    CV: CoreVersionSource,
    MR: PluginMetadataRepository,
    AR: CompatAuditRepository,
    PR: ProgressReporter,
{
    async fn aggregate(
        &self,
        scope: Scope,
        overrides: &RemoteOverrideMap,
    ) -> Result<Vec<AggregatedRow>> {
        let components = self.component_source.enumerate(scope)?;
        let total = components.len();
        self.progress_reporter.report(&format!(
            "🔍 Checking {} plugin(s) for the {} scope...",
            total, scope
        ));

        let local_core = self.site_environment.local_core_version();
        let latest_core = self
            .core_version_source
            .latest_core_version(&local_core)
            .await;

        // `buffered` yields in input order, so rows keep enumeration order
        let row_futures: Vec<_> = components
            .iter()
            .map(|component| self.build_row(component, overrides, &latest_core))
            .collect();
        let mut pending = stream::iter(row_futures).buffered(self.concurrency);

        let mut rows = Vec::with_capacity(total);
        while let Some(row) = pending.next().await {
            self.progress_reporter
                .report_progress(rows.len() + 1, total, Some(&row.name));
            rows.push(row);
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Compatibility check complete: {} plugin(s)",
            rows.len()
        ));
        Ok(rows)
    }
}
