use super::NO_DATA;
use serde::{Deserialize, Serialize};

/// Activation state of a plugin within the evaluated scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationStatus {
    Activated,
    Deactivated,
}

impl ActivationStatus {
    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            ActivationStatus::Activated
        } else {
            ActivationStatus::Deactivated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationStatus::Activated => "Activated",
            ActivationStatus::Deactivated => "Deactivated",
        }
    }
}

impl std::str::FromStr for ActivationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "activated" | "active" => Ok(ActivationStatus::Activated),
            "deactivated" | "inactive" => Ok(ActivationStatus::Deactivated),
            _ => Err(format!(
                "Invalid plugin status: {}. Please specify 'activated' or 'deactivated'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ActivationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a plugin is safe to keep when upgrading core to the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgradeable {
    Yes,
    No,
    #[serde(rename = "No Data")]
    NoData,
}

impl Upgradeable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upgradeable::Yes => "Yes",
            Upgradeable::No => "No",
            Upgradeable::NoData => NO_DATA,
        }
    }
}

/// One output row per installed plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub name: String,
    pub current_version: String,
    pub latest_version: String,
    pub tested_wp: String,
    pub php_supported: String,
    pub status: ActivationStatus,
    pub upgradeable: Upgradeable,
    pub issues_ratio: String,
}

impl AggregatedRow {
    /// True when the installed version matches a known latest release
    pub fn is_up_to_date(&self) -> bool {
        self.latest_version != NO_DATA && self.current_version == self.latest_version
    }
}
