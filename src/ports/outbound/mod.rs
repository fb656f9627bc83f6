/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod component_source;
pub mod compat_audit_repository;
pub mod core_version_source;
pub mod formatter;
pub mod key_value_store;
pub mod output_presenter;
pub mod plugin_metadata_repository;
pub mod portal_client;
pub mod progress_reporter;
pub mod site_environment;

pub use component_source::ComponentSource;
pub use compat_audit_repository::CompatAuditRepository;
pub use core_version_source::CoreVersionSource;
pub use formatter::ReportFormatter;
pub use key_value_store::{load_json, save_json, KeyValueStore};
pub use output_presenter::OutputPresenter;
pub use plugin_metadata_repository::PluginMetadataRepository;
pub use portal_client::{PortalClient, PortalScanRequest};
pub use progress_reporter::ProgressReporter;
pub use site_environment::SiteEnvironment;
