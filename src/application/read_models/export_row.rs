use crate::compat_check::domain::{AggregatedRow, Scope};

/// Suggested file name for CSV exports
pub const EXPORT_FILE_NAME: &str = "plugin-compatibility-export.csv";

/// One CSV line of the export, already flattened for spreadsheets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub current_version: String,
    pub latest_version: String,
    pub tested_wp: String,
    pub php_supported: String,
    pub status: String,
    pub upgradeable: String,
    pub issues_ratio: String,
}

impl ExportRow {
    /// Column headers in export order
    pub fn headers(scope: Scope) -> [&'static str; 8] {
        [
            "Plugin Name",
            "Current Plugin Version",
            "Latest Plugin Version",
            "Compatible With WordPress Version",
            "Supported PHP Version",
            scope.status_column_label(),
            "Updateable With Latest Version of WordPress",
            "Issues Resolved in Last Two Months",
        ]
    }

    /// Projects a row: commas in free text become spaces and the issues
    /// ratio gets a leading `'` so spreadsheets keep "3/10" as text
    pub fn from_row(row: &AggregatedRow) -> Self {
        Self {
            name: row.name.replace(',', " "),
            current_version: row.current_version.clone(),
            latest_version: row.latest_version.clone(),
            tested_wp: row.tested_wp.clone(),
            php_supported: row.php_supported.replace(',', " "),
            status: row.status.as_str().to_string(),
            upgradeable: row.upgradeable.as_str().to_string(),
            issues_ratio: format!("'{}", row.issues_ratio.replace(':', "")),
        }
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            &self.name,
            &self.current_version,
            &self.latest_version,
            &self.tested_wp,
            &self.php_supported,
            &self.status,
            &self.upgradeable,
            &self.issues_ratio,
        ]
    }
}
