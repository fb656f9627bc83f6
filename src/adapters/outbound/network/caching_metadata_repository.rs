use crate::compat_check::domain::RemoteMetadata;
use crate::ports::outbound::PluginMetadataRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingMetadataRepository wraps a PluginMetadataRepository with an
/// in-memory, per-slug memo.
///
/// This is a decorator: the aggregator sees the same port whether a lookup
/// is served from memory or from the network. The map is safe for the
/// concurrent lookups of one aggregation. Empty records are not kept, so a
/// failed lookup is retried the next time the slug is requested.
pub struct CachingMetadataRepository<R: PluginMetadataRepository> {
    inner: R,
    cache: Arc<DashMap<String, RemoteMetadata>>,
}

impl<R: PluginMetadataRepository> CachingMetadataRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: PluginMetadataRepository> PluginMetadataRepository for CachingMetadataRepository<R> {
    async fn fetch_metadata(&self, slug: &str) -> RemoteMetadata {
        if let Some(cached) = self.cache.get(slug) {
            return cached.clone();
        }

        let metadata = self.inner.fetch_metadata(slug).await;
        if !metadata.is_empty() {
            self.cache.insert(slug.to_string(), metadata.clone());
        }
        metadata
    }
}
