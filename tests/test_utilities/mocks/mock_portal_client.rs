use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wp_plugin_compat::compat_check::domain::{LicenseVerdict, PortalFetchOutcome, PortalScanEntry};
use wp_plugin_compat::ports::outbound::PortalScanRequest;
use wp_plugin_compat::prelude::*;

/// Mock PortalClient with scripted answers
#[derive(Clone)]
pub struct MockPortalClient {
    verdict: LicenseVerdict,
    outcome: PortalFetchOutcome,
    pub submissions: Arc<Mutex<Vec<PortalScanRequest>>>,
}

impl MockPortalClient {
    pub fn new() -> Self {
        Self {
            verdict: LicenseVerdict {
                valid: true,
                message: None,
            },
            outcome: PortalFetchOutcome::Pending,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            verdict: LicenseVerdict {
                valid: false,
                message: Some(message.to_string()),
            },
            ..Self::new()
        }
    }

    pub fn with_results(mut self, entries: Vec<PortalScanEntry>) -> Self {
        self.outcome = PortalFetchOutcome::Completed(entries);
        self
    }

    pub fn submitted(&self) -> Vec<PortalScanRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

impl Default for MockPortalClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortalClient for MockPortalClient {
    async fn submit_scan(&self, request: &PortalScanRequest) -> Result<()> {
        self.submissions.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn fetch_results(&self, _license_key: &str, _site: &str) -> Result<PortalFetchOutcome> {
        Ok(self.outcome.clone())
    }

    async fn validate_license(&self, _license_key: &str, _site: &str) -> Result<LicenseVerdict> {
        Ok(self.verdict.clone())
    }
}
