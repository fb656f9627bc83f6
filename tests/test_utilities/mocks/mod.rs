/// Mock implementations for testing
mod mock_audit_repository;
mod mock_component_source;
mod mock_metadata_repository;
mod mock_portal_client;
mod mock_progress_reporter;
mod mock_site_environment;

pub use mock_audit_repository::MockAuditRepository;
pub use mock_component_source::MockComponentSource;
pub use mock_metadata_repository::MockMetadataRepository;
pub use mock_portal_client::MockPortalClient;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_site_environment::{MockCoreVersionSource, MockSiteEnvironment};
