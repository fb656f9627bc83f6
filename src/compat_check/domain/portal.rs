//! Records exchanged with the licensed Portal backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One compatibility record from a completed Portal scan
///
/// The Portal is loosely typed: `php_version` may be a comma-separated
/// string or an array, and `compatible` may be a boolean, a number or a
/// string. Missing fields deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortalScanEntry {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub php_version: Value,
    #[serde(default)]
    pub standard: String,
    #[serde(default)]
    pub compatible: Value,
}

impl PortalScanEntry {
    /// Individual PHP version tokens, trimmed, empties dropped
    pub fn php_tokens(&self) -> Vec<String> {
        let raw: Vec<String> = match &self.php_version {
            Value::String(s) => s.split(',').map(str::to_string).collect(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Value::Number(n) => vec![n.to_string()],
            _ => Vec::new(),
        };

        raw.into_iter()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Normalizes the loosely encoded compatibility flag
    pub fn is_compatible(&self) -> bool {
        match &self.compatible {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "compatible"
            ),
            _ => false,
        }
    }
}

/// Result of asking the Portal for scan results
#[derive(Debug, Clone, PartialEq)]
pub enum PortalFetchOutcome {
    /// The scan has not finished yet
    Pending,
    Completed(Vec<PortalScanEntry>),
}

/// Portal answer to a license validation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseVerdict {
    pub valid: bool,
    /// Upstream explanation, when the Portal gave one
    pub message: Option<String>,
}

/// A plugin submitted with a Portal scan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInventoryItem {
    pub slug: String,
    pub version: String,
}
