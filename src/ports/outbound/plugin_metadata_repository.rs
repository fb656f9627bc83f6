use crate::compat_check::domain::RemoteMetadata;
use async_trait::async_trait;

/// PluginMetadataRepository port for plugin-directory metadata
///
/// # Async Support
/// Implementations must be `Send + Sync` so lookups for several plugins
/// can be in flight at once.
#[async_trait]
pub trait PluginMetadataRepository: Send + Sync {
    /// Fetches metadata for a slug
    ///
    /// Fail-soft: an empty slug, a transport error, or an upstream error body
    /// all yield [`RemoteMetadata::empty`].
    async fn fetch_metadata(&self, slug: &str) -> RemoteMetadata;
}
