use crate::compat_check::domain::{ActivationStatus, Scope};

/// ScanRequest - read request for one scope's compatibility rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    pub scope: Scope,
    /// Skip the cached rows and rebuild from the live sources
    pub force_rebuild: bool,
    /// Only report plugins with this status; the cache always holds every row
    pub status: Option<ActivationStatus>,
}

impl ScanRequest {
    pub fn new(scope: Scope, force_rebuild: bool) -> Self {
        Self {
            scope,
            force_rebuild,
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<ActivationStatus>) -> Self {
        self.status = status;
        self
    }
}
