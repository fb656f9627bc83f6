//! Read models for CQRS-lite pattern
//!
//! View-optimized structs handed to the formatters: the dashboard model
//! with its environment statistics, and the flattened export projection.

pub mod dashboard_read_model;
pub mod environment_stats;
pub mod export_row;

pub use dashboard_read_model::DashboardReadModel;
pub use environment_stats::EnvironmentStats;
pub use export_row::{ExportRow, EXPORT_FILE_NAME};
