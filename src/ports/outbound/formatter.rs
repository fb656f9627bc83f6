use crate::application::read_models::DashboardReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering the compatibility table
///
/// This port abstracts the output formats (HTML dashboard, CSV export, JSON).
pub trait ReportFormatter {
    /// Formats the dashboard read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &DashboardReadModel) -> Result<String>;
}
