//! Dashboard read model for query operations

use super::environment_stats::EnvironmentStats;
use super::export_row::ExportRow;
use crate::compat_check::domain::{ActivationStatus, AggregatedRow, Scope};
use serde::Serialize;

/// Everything a formatter needs to render one scope's report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReadModel {
    pub scope: Scope,
    pub stats: EnvironmentStats,
    pub rows: Vec<AggregatedRow>,
    /// Set when `rows` only holds plugins with this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<ActivationStatus>,
    /// RFC 3339 timestamp of when the report was rendered
    pub generated_at: String,
}

impl DashboardReadModel {
    pub fn new(scope: Scope, stats: EnvironmentStats, rows: Vec<AggregatedRow>) -> Self {
        Self {
            scope,
            stats,
            rows,
            status_filter: None,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Keeps only the rows with `status`; `None` keeps every row
    pub fn with_status_filter(mut self, status: Option<ActivationStatus>) -> Self {
        if let Some(status) = status {
            self.rows.retain(|row| row.status == status);
        }
        self.status_filter = status;
        self
    }

    /// Flattened export projection, one entry per row, in table order
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.rows.iter().map(ExportRow::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat_check::domain::{InstalledComponent, Upgradeable};

    fn row(name: &str, status: ActivationStatus) -> AggregatedRow {
        AggregatedRow {
            name: name.to_string(),
            current_version: "1.0".to_string(),
            latest_version: "1.0".to_string(),
            tested_wp: "6.5".to_string(),
            php_supported: "8.0".to_string(),
            status,
            upgradeable: Upgradeable::Yes,
            issues_ratio: "0/0".to_string(),
        }
    }

    fn model() -> DashboardReadModel {
        let components = [
            InstalledComponent::new("a/a.php", "A").activated(true),
            InstalledComponent::new("b/b.php", "B"),
        ];
        let stats = EnvironmentStats::from_components(&components, "6.5", "8.2", "6.5");
        DashboardReadModel::new(
            Scope::Site,
            stats,
            vec![
                row("A", ActivationStatus::Activated),
                row("B", ActivationStatus::Deactivated),
                row("C", ActivationStatus::Activated),
            ],
        )
    }

    #[test]
    fn test_status_filter_keeps_matching_rows_in_order() {
        let filtered = model().with_status_filter(Some(ActivationStatus::Activated));

        let names: Vec<&str> = filtered.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(filtered.status_filter, Some(ActivationStatus::Activated));
        // The summary still describes the whole site
        assert_eq!(filtered.stats.plugins_total, 2);
    }

    #[test]
    fn test_no_status_filter_keeps_everything() {
        let unfiltered = model().with_status_filter(None);
        assert_eq!(unfiltered.rows.len(), 3);

        let json = serde_json::to_value(&unfiltered).unwrap();
        assert!(json.get("status_filter").is_none());

        let json = serde_json::to_value(model().with_status_filter(Some(ActivationStatus::Deactivated))).unwrap();
        assert_eq!(json["status_filter"], "Deactivated");
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    }
}
