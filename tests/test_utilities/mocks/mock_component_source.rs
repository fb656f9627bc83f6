use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wp_plugin_compat::prelude::*;

/// Mock ComponentSource returning a fixed plugin list
///
/// Site scope uses each component's own `is_active`; network scope uses
/// the file identifiers passed to `with_network_active`.
#[derive(Clone, Default)]
pub struct MockComponentSource {
    components: Vec<InstalledComponent>,
    network_active: Vec<String>,
    pub calls: Arc<AtomicUsize>,
}

impl MockComponentSource {
    pub fn new(components: Vec<InstalledComponent>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    pub fn with_network_active(mut self, files: &[&str]) -> Self {
        self.network_active = files.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ComponentSource for MockComponentSource {
    fn enumerate(&self, scope: Scope) -> Result<Vec<InstalledComponent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match scope {
            Scope::Site => self.components.clone(),
            Scope::Network => self
                .components
                .iter()
                .cloned()
                .map(|c| {
                    let active = self.network_active.contains(&c.file_identifier);
                    c.activated(active)
                })
                .collect(),
        })
    }
}
