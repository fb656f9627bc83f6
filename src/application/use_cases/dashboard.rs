use crate::application::read_models::EnvironmentStats;
use crate::compat_check::domain::{Scope, SystemInfo};
use crate::ports::outbound::{ComponentSource, CoreVersionSource, SiteEnvironment};
use crate::shared::Result;

/// DashboardUseCase - gathers the environment summary for a scope
pub struct DashboardUseCase<CS, SE, CV> {
    component_source: CS,
    site_environment: SE,
    core_version_source: CV,
}

impl<CS, SE, CV> DashboardUseCase<CS, SE, CV>
where
    CS: ComponentSource,
    SE: SiteEnvironment,
    CV: CoreVersionSource,
{
    pub fn new(component_source: CS, site_environment: SE, core_version_source: CV) -> Self {
        Self {
            component_source,
            site_environment,
            core_version_source,
        }
    }

    pub async fn stats(&self, scope: Scope) -> Result<EnvironmentStats> {
        let components = self.component_source.enumerate(scope)?;
        let local_core = self.site_environment.local_core_version();
        let latest_core = self
            .core_version_source
            .latest_core_version(&local_core)
            .await;

        Ok(EnvironmentStats::from_components(
            &components,
            local_core,
            self.site_environment.php_version(),
            latest_core,
        ))
    }

    pub async fn system_info(&self) -> SystemInfo {
        self.site_environment.system_info().await
    }
}
