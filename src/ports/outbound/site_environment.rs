use crate::compat_check::domain::SystemInfo;
use async_trait::async_trait;

/// SiteEnvironment port describing the running WordPress installation
#[async_trait]
pub trait SiteEnvironment: Send + Sync {
    /// Core version of the running site (e.g. "6.4.3")
    fn local_core_version(&self) -> String;

    /// PHP version serving the site, or "Unknown"
    fn php_version(&self) -> String;

    /// Disk space, PHP limits and loaded extensions
    ///
    /// Environments that cannot inspect the runtime report only the PHP
    /// version, with every other value unknown.
    async fn system_info(&self) -> SystemInfo {
        SystemInfo::new(self.php_version())
    }
}

#[async_trait]
impl<T: SiteEnvironment + ?Sized> SiteEnvironment for std::sync::Arc<T> {
    fn local_core_version(&self) -> String {
        (**self).local_core_version()
    }

    fn php_version(&self) -> String {
        (**self).php_version()
    }

    async fn system_info(&self) -> SystemInfo {
        (**self).system_info().await
    }
}
