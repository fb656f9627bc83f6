pub mod aggregated_row;
pub mod authorization;
pub mod compatibility_audit;
pub mod installed_component;
pub mod license_state;
pub mod override_map;
pub mod portal;
pub mod remote_metadata;
pub mod scope;
pub mod system_info;

pub use aggregated_row::{ActivationStatus, AggregatedRow, Upgradeable};
pub use authorization::{Capability, Operator};
pub use compatibility_audit::CompatibilityAudit;
pub use installed_component::InstalledComponent;
pub use license_state::LicenseState;
pub use override_map::RemoteOverrideMap;
pub use portal::{LicenseVerdict, PluginInventoryItem, PortalFetchOutcome, PortalScanEntry};
pub use remote_metadata::RemoteMetadata;
pub use scope::Scope;
pub use system_info::{DiskUsage, PhpSetting, SystemInfo, PHP_INI_SETTINGS, UNKNOWN};

/// Placeholder shown wherever a value could not be resolved
pub const NO_DATA: &str = "No Data";
