use crate::application::read_models::{DashboardReadModel, EnvironmentStats, ExportRow};
use crate::compat_check::domain::{AggregatedRow, Scope};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

const PAGE_TITLE: &str = "Check Your Plugin Compatibility";

/// Row highlight for plugins running their latest release
const CURRENT_COLOR: &str = "#135e96";
/// Row highlight for everything else
const OUTDATED_COLOR: &str = "#f64855";

const NO_DATA_NOTE: &str = "Note: \"No Data\" plugins were not found on WordPress.org \
(custom or licensed). Check with the author/vendor for their latest version.";
const REVIEW_NOTE: &str = "After reviewing the table above, update WordPress accordingly.";

const STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Roboto,sans-serif;margin:2rem;color:#1d2327}\
.cards{display:flex;gap:1rem;flex-wrap:wrap;margin-bottom:1rem}\
.card{border:1px solid #c3c4c7;border-radius:4px;padding:.75rem 1rem;min-width:10rem}\
.card .label{font-size:.85rem;color:#50575e}\
.card .value{font-size:1.4rem;font-weight:600}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #c3c4c7;padding:.4rem .6rem;text-align:left}\
th{background:#f0f0f1}\
tr.current td{color:#135e96}\
tr.outdated td{color:#f64855}";

/// HtmlFormatter adapter rendering the dashboard as a standalone page
///
/// Produces the stat cards, the core release notice and one table row per
/// plugin, coloured by whether it runs its latest release.
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    fn stat_cards(scope: Scope, stats: &EnvironmentStats) -> Vec<(&'static str, String)> {
        let (active_label, inactive_label) = match scope {
            Scope::Site => ("Plugins Active", "Plugins Inactive"),
            Scope::Network => ("Plugins Active (Network)", "Plugins Inactive (Network)"),
        };
        vec![
            ("WordPress", stats.wp_version.clone()),
            ("PHP", stats.php_version.clone()),
            ("Plugins Installed", stats.plugins_total.to_string()),
            (active_label, stats.plugins_active.to_string()),
            (inactive_label, stats.plugins_inactive.to_string()),
        ]
    }

    fn row_style(row: &AggregatedRow) -> (&'static str, &'static str) {
        if row.is_up_to_date() {
            ("current", CURRENT_COLOR)
        } else {
            ("outdated", OUTDATED_COLOR)
        }
    }

    fn write_cards(out: &mut String, model: &DashboardReadModel) -> std::fmt::Result {
        writeln!(out, "<div class=\"cards\">")?;
        for (label, value) in Self::stat_cards(model.scope, &model.stats) {
            writeln!(
                out,
                "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                Self::escape(label),
                Self::escape(&value)
            )?;
        }
        writeln!(out, "</div>")?;
        writeln!(
            out,
            "<p class=\"core-notice\">{}</p>",
            Self::escape(&model.stats.core_notice())
        )
    }

    fn write_table(out: &mut String, model: &DashboardReadModel) -> std::fmt::Result {
        writeln!(out, "<table>")?;
        write!(out, "<thead><tr>")?;
        for header in ExportRow::headers(model.scope) {
            write!(out, "<th>{}</th>", Self::escape(header))?;
        }
        writeln!(out, "</tr></thead>")?;

        writeln!(out, "<tbody>")?;
        for row in &model.rows {
            let (class, color) = Self::row_style(row);
            write!(out, "<tr class=\"{}\" style=\"color:{}\">", class, color)?;
            let cells: [&str; 8] = [
                row.name.as_str(),
                &row.current_version,
                &row.latest_version,
                &row.tested_wp,
                &row.php_supported,
                row.status.as_str(),
                row.upgradeable.as_str(),
                &row.issues_ratio,
            ];
            for cell in cells {
                write!(out, "<td>{}</td>", Self::escape(cell))?;
            }
            writeln!(out, "</tr>")?;
        }
        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format(&self, model: &DashboardReadModel) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", PAGE_TITLE)?;
        writeln!(out, "<style>{}</style>", STYLE)?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<h1>{}</h1>", PAGE_TITLE)?;
        Self::write_cards(&mut out, model)?;
        if let Some(status) = model.status_filter {
            writeln!(
                out,
                "<p class=\"filter\"><b>Filter By Plugin Status:</b> {}</p>",
                status
            )?;
        }
        Self::write_table(&mut out, model)?;
        writeln!(out, "<p class=\"note\">{}</p>", Self::escape(NO_DATA_NOTE))?;
        writeln!(out, "<p class=\"note\">{}</p>", Self::escape(REVIEW_NOTE))?;
        writeln!(
            out,
            "<footer>Scope: {} &middot; Generated {}</footer>",
            model.scope,
            Self::escape(&model.generated_at)
        )?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }
}
