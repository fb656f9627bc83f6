/// Use cases module containing application business logic orchestration
mod aggregate_compatibility;
mod compat_actions;
mod dashboard;
mod license;
pub mod persisted_state;
mod portal_sync;
mod scan_cache;

pub use aggregate_compatibility::{
    AggregateCompatibilityUseCase, RowAggregator, DEFAULT_CONCURRENCY,
};
pub use compat_actions::CompatActionsUseCase;
pub use dashboard::DashboardUseCase;
pub use license::{normalize_site_host, LicenseUseCase};
pub use portal_sync::{PortalSyncUseCase, DEFAULT_POLL_INTERVAL};
pub use scan_cache::ScanCacheUseCase;
