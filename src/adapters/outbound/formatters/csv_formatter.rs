use crate::application::read_models::{DashboardReadModel, ExportRow};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Line separator used between CSV records
const CSV_LINE_SEPARATOR: &str = "\r\n";

/// CsvFormatter adapter producing the spreadsheet export
///
/// Columns follow [`ExportRow::headers`]. Cells containing a comma, a
/// double quote, a line feed or a carriage return are quoted with inner
/// quotes doubled.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape_cell(value: &str) -> String {
        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn join_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
        cells
            .into_iter()
            .map(Self::escape_cell)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, model: &DashboardReadModel) -> Result<String> {
        let mut lines = Vec::with_capacity(model.rows.len() + 1);
        lines.push(Self::join_cells(ExportRow::headers(model.scope)));
        for row in model.export_rows() {
            lines.push(Self::join_cells(row.cells()));
        }
        Ok(lines.join(CSV_LINE_SEPARATOR))
    }
}
