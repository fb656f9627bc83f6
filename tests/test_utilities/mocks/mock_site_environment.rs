use async_trait::async_trait;
use wp_plugin_compat::prelude::*;

/// Mock SiteEnvironment with fixed versions and optional runtime details
#[derive(Clone)]
pub struct MockSiteEnvironment {
    core_version: String,
    php_version: String,
    system_info: Option<SystemInfo>,
}

impl MockSiteEnvironment {
    pub fn new(core_version: &str, php_version: &str) -> Self {
        Self {
            core_version: core_version.to_string(),
            php_version: php_version.to_string(),
            system_info: None,
        }
    }

    pub fn with_system_info(mut self, info: SystemInfo) -> Self {
        self.system_info = Some(info);
        self
    }
}

#[async_trait]
impl SiteEnvironment for MockSiteEnvironment {
    fn local_core_version(&self) -> String {
        self.core_version.clone()
    }

    fn php_version(&self) -> String {
        self.php_version.clone()
    }

    async fn system_info(&self) -> SystemInfo {
        self.system_info
            .clone()
            .unwrap_or_else(|| SystemInfo::new(self.php_version.clone()))
    }
}

/// Mock CoreVersionSource; `None` behaves like an unreachable API
#[derive(Clone)]
pub struct MockCoreVersionSource {
    latest: Option<String>,
}

impl MockCoreVersionSource {
    pub fn new(latest: &str) -> Self {
        Self {
            latest: Some(latest.to_string()),
        }
    }

    pub fn unreachable() -> Self {
        Self { latest: None }
    }
}

#[async_trait]
impl CoreVersionSource for MockCoreVersionSource {
    async fn latest_core_version(&self, local_version: &str) -> String {
        self.latest
            .clone()
            .unwrap_or_else(|| local_version.to_string())
    }
}
