use super::NO_DATA;

/// Plugin-directory metadata for one slug
///
/// Every field is optional; an absent field reads as "No Data". The whole
/// record is empty when the slug is empty or the directory reports an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    pub tested_up_to_core_version: Option<String>,
    pub latest_version: Option<String>,
    pub support_threads_total: Option<String>,
    pub support_threads_resolved: Option<String>,
    pub requires_php: Option<String>,
}

impl RemoteMetadata {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn tested_wp(&self) -> &str {
        Self::or_no_data(&self.tested_up_to_core_version)
    }

    pub fn latest_version(&self) -> &str {
        Self::or_no_data(&self.latest_version)
    }

    pub fn support_total(&self) -> &str {
        Self::or_no_data(&self.support_threads_total)
    }

    pub fn support_resolved(&self) -> &str {
        Self::or_no_data(&self.support_threads_resolved)
    }

    pub fn requires_php(&self) -> &str {
        Self::or_no_data(&self.requires_php)
    }

    /// Whether a latest version is known, which the audit lookup needs
    pub fn has_latest_version(&self) -> bool {
        self.latest_version() != NO_DATA
    }

    fn or_no_data(value: &Option<String>) -> &str {
        match value.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => NO_DATA,
        }
    }
}
