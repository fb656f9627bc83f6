use crate::compat_check::domain::{
    ActivationStatus, AggregatedRow, CompatibilityAudit, InstalledComponent, RemoteMetadata,
    RemoteOverrideMap, Upgradeable, NO_DATA,
};
use crate::compat_check::services::VersionComparator;

/// Tested-up-to value that always counts as upgradeable.
///
/// Carried over unchanged from the plugin's established behavior; there is
/// no recorded rationale, so it is kept as an explicit special case.
pub const ALWAYS_UPGRADEABLE_TESTED_WP: &str = "6.2.0";

/// Support-thread count the directory reports for plugins with no threads
pub const ZERO_THREADS: &str = ":0";

pub const NO_ISSUES: &str = "There Are No Issues";

/// Derivation rules that turn fetched records into an [`AggregatedRow`]
pub struct RowBuilder;

impl RowBuilder {
    pub fn upgradeable(tested_wp: &str, latest_core: &str) -> Upgradeable {
        if tested_wp == NO_DATA {
            return Upgradeable::NoData;
        }
        if VersionComparator::is_at_least(tested_wp, latest_core) {
            return Upgradeable::Yes;
        }
        if tested_wp == ALWAYS_UPGRADEABLE_TESTED_WP {
            return Upgradeable::Yes;
        }
        Upgradeable::No
    }

    /// `<resolved>/<total>` with colons stripped
    pub fn issues_ratio(resolved: &str, total: &str) -> String {
        if resolved == ZERO_THREADS && total == ZERO_THREADS {
            return NO_ISSUES.to_string();
        }
        if resolved == NO_DATA || total == NO_DATA {
            return NO_DATA.to_string();
        }
        format!("{}/{}", resolved.replace(':', ""), total.replace(':', ""))
    }

    /// Returns the override for the slug if one exists
    ///
    /// `None` means the audit source has to be consulted.
    pub fn php_override<'a>(slug: &str, overrides: &'a RemoteOverrideMap) -> Option<&'a str> {
        if slug.is_empty() {
            return None;
        }
        overrides.get(slug)
    }

    pub fn build(
        component: &InstalledComponent,
        metadata: &RemoteMetadata,
        php_supported: String,
        latest_core: &str,
    ) -> AggregatedRow {
        let current_version = if component.current_version.trim().is_empty() {
            NO_DATA.to_string()
        } else {
            component.current_version.clone()
        };

        AggregatedRow {
            name: component.display_name().to_string(),
            current_version,
            latest_version: metadata.latest_version().to_string(),
            tested_wp: metadata.tested_wp().to_string(),
            php_supported,
            status: ActivationStatus::from_active(component.is_active),
            upgradeable: Self::upgradeable(metadata.tested_wp(), latest_core),
            issues_ratio: Self::issues_ratio(
                metadata.support_resolved(),
                metadata.support_total(),
            ),
        }
    }

    /// Value for the PHP column when neither override nor audit applies
    pub fn php_from_audit(audit: Option<&CompatibilityAudit>) -> String {
        audit
            .map(CompatibilityAudit::display_value)
            .unwrap_or_else(|| NO_DATA.to_string())
    }
}
