use crate::adapters::outbound::formatters::{CsvFormatter, HtmlFormatter, JsonFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selects the formatter adapter for an [`OutputFormat`], keeping the
/// binary free of concrete formatter types.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use wp_plugin_compat::application::dto::OutputFormat;
    /// use wp_plugin_compat::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Csv);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Html => Box::new(HtmlFormatter::new()),
            OutputFormat::Csv => Box::new(CsvFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Html => "📝 Rendering HTML compatibility report...",
            OutputFormat::Csv => "📝 Exporting compatibility table as CSV...",
            OutputFormat::Json => "📝 Rendering JSON compatibility report...",
        }
    }
}
