use serde::Serialize;

/// Structured result returned by every trigger action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    /// Number of override entries that changed
    pub updated_count: usize,
    /// True while the Portal is still working on a submitted scan
    pub scan_pending: bool,
}

impl ActionOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            updated_count: 0,
            scan_pending: false,
        }
    }

    pub fn with_updated_count(mut self, updated_count: usize) -> Self {
        self.updated_count = updated_count;
        self
    }

    pub fn pending(mut self) -> Self {
        self.scan_pending = true;
        self
    }
}
