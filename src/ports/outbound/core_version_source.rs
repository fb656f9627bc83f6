use async_trait::async_trait;

/// CoreVersionSource port for the latest stable WordPress release
#[async_trait]
pub trait CoreVersionSource: Send + Sync {
    /// Returns the latest stable core version
    ///
    /// Never fails: any transport or parsing problem yields `local_version`.
    async fn latest_core_version(&self, local_version: &str) -> String;
}

#[async_trait]
impl<T: CoreVersionSource + ?Sized> CoreVersionSource for std::sync::Arc<T> {
    async fn latest_core_version(&self, local_version: &str) -> String {
        (**self).latest_core_version(local_version).await
    }
}
