use crate::compat_check::domain::InstalledComponent;
use crate::compat_check::services::VersionComparator;
use serde::Serialize;

/// Summary cards shown above the compatibility table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentStats {
    pub wp_version: String,
    pub php_version: String,
    pub plugins_total: usize,
    pub plugins_active: usize,
    pub plugins_inactive: usize,
    pub wp_latest: String,
}

impl EnvironmentStats {
    pub fn from_components(
        components: &[InstalledComponent],
        wp_version: impl Into<String>,
        php_version: impl Into<String>,
        wp_latest: impl Into<String>,
    ) -> Self {
        let plugins_total = components.len();
        let plugins_active = components.iter().filter(|c| c.is_active).count();

        Self {
            wp_version: wp_version.into(),
            php_version: php_version.into(),
            plugins_total,
            plugins_active,
            plugins_inactive: plugins_total.saturating_sub(plugins_active),
            wp_latest: wp_latest.into(),
        }
    }

    pub fn is_on_latest_core(&self) -> bool {
        VersionComparator::is_at_least(&self.wp_version, &self.wp_latest)
    }

    /// Sentence shown under the cards about the core release
    pub fn core_notice(&self) -> String {
        if self.is_on_latest_core() {
            "You are already on the latest WordPress version.".to_string()
        } else {
            format!(
                "The latest stable WordPress version available is: {}",
                self.wp_latest
            )
        }
    }
}
