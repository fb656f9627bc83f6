//! wp-plugin-compat - plugin compatibility checker for WordPress sites
//!
//! This library compares the plugins installed on a WordPress site with
//! WordPress.org release metadata, WPTide PHP-compatibility audits and
//! optional licensed Portal scan results, and renders the outcome as an
//! HTML dashboard, a CSV export or JSON. It follows hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`compat_check`): Domain model and pure services
//!   (version comparison, slug resolution, row building, override merge)
//! - **Application Layer** (`application`): Use cases, DTOs, read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use wp_plugin_compat::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let site = Path::new("/var/www/html");
//! let plugins = Arc::new(PluginDirectoryReader::new(site));
//! let environment = Arc::new(LocalSiteEnvironment::detect(site, None).await);
//! let wporg = Arc::new(WpOrgClient::new()?);
//!
//! let aggregator = AggregateCompatibilityUseCase::new(
//!     plugins.clone(),
//!     environment.clone(),
//!     wporg.clone(),
//!     CachingMetadataRepository::new(WpOrgClient::new()?),
//!     WpTideClient::new()?,
//!     StderrProgressReporter::new(),
//! );
//! let cache = ScanCacheUseCase::new(MemoryStore::new(), aggregator);
//!
//! let rows = cache.get(ScanRequest::new(Scope::Site, false)).await?;
//! let stats = DashboardUseCase::new(plugins, environment, wporg)
//!     .stats(Scope::Site)
//!     .await?;
//! let report = DashboardReadModel::new(Scope::Site, stats, rows);
//! println!("{}", CsvFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compat_check;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, LocalSiteEnvironment, PluginDirectoryReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{CsvFormatter, HtmlFormatter, JsonFormatter};
    pub use crate::adapters::outbound::network::{
        CachingMetadataRepository, PortalHttpClient, WpOrgClient, WpTideClient,
    };
    pub use crate::adapters::outbound::storage::{FileStore, MemoryStore};
    pub use crate::application::dto::{ActionOutcome, OutputFormat, ScanRequest};
    pub use crate::application::read_models::{DashboardReadModel, EnvironmentStats, ExportRow};
    pub use crate::application::use_cases::{
        AggregateCompatibilityUseCase, CompatActionsUseCase, DashboardUseCase, LicenseUseCase,
        PortalSyncUseCase, RowAggregator, ScanCacheUseCase,
    };
    pub use crate::compat_check::domain::{
        ActivationStatus, AggregatedRow, Capability, CompatibilityAudit, InstalledComponent,
        DiskUsage, LicenseState, Operator, RemoteMetadata, RemoteOverrideMap, Scope, SystemInfo,
        Upgradeable, NO_DATA,
    };
    pub use crate::compat_check::services::{
        OverrideMerger, RowBuilder, SlugResolver, VersionComparator,
    };
    pub use crate::ports::outbound::{
        CompatAuditRepository, ComponentSource, CoreVersionSource, KeyValueStore,
        OutputPresenter, PluginMetadataRepository, PortalClient, ProgressReporter,
        ReportFormatter, SiteEnvironment,
    };
    pub use crate::shared::Result;
}
