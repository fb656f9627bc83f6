use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wp_plugin_compat::prelude::*;

/// Mock PluginMetadataRepository keyed by slug; unknown slugs are empty
#[derive(Clone, Default)]
pub struct MockMetadataRepository {
    records: HashMap<String, RemoteMetadata>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(
        mut self,
        slug: &str,
        latest: &str,
        tested: &str,
        resolved: &str,
        total: &str,
    ) -> Self {
        self.records.insert(
            slug.to_string(),
            RemoteMetadata {
                tested_up_to_core_version: Some(tested.to_string()),
                latest_version: Some(latest.to_string()),
                support_threads_total: Some(total.to_string()),
                support_threads_resolved: Some(resolved.to_string()),
                requires_php: None,
            },
        );
        self
    }

    pub fn requested_slugs(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PluginMetadataRepository for MockMetadataRepository {
    async fn fetch_metadata(&self, slug: &str) -> RemoteMetadata {
        self.requested.lock().unwrap().push(slug.to_string());
        self.records.get(slug).cloned().unwrap_or_default()
    }
}
