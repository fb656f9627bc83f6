use serde::{Deserialize, Serialize};

/// Stored Portal license. Changed only by explicit save or validate actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseState {
    pub key: String,
    pub valid: bool,
}

impl LicenseState {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        !self.key.trim().is_empty()
    }

    /// Portal features are available only with a set and validated key
    pub fn is_active(&self) -> bool {
        self.is_set() && self.valid
    }
}
