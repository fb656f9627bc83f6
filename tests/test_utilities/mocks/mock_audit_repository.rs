use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wp_plugin_compat::prelude::*;

/// Mock CompatAuditRepository keyed by `slug@version`
#[derive(Clone, Default)]
pub struct MockAuditRepository {
    audits: HashMap<String, Vec<String>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl MockAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audit(mut self, slug: &str, version: &str, php_versions: &[&str]) -> Self {
        self.audits.insert(
            format!("{}@{}", slug, version),
            php_versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn requested_keys(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompatAuditRepository for MockAuditRepository {
    async fn fetch_audit(&self, slug: &str, latest_version: &str) -> CompatibilityAudit {
        let key = format!("{}@{}", slug, latest_version);
        self.requested.lock().unwrap().push(key.clone());
        match self.audits.get(&key) {
            Some(versions) => CompatibilityAudit::from_versions(versions.clone()),
            None => CompatibilityAudit::NoData,
        }
    }
}
