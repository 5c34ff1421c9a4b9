//! HTML table fragments for material pages.

use std::fmt::Write as _;

use matdoc_shared::{ImageEntry, PropertiesTable, TablesConfig, TextPolicy};

use crate::escape::{apply_policy, escape_html};

/// Width share of each properties column as a CSS value.
///
/// `total / n` percent per column, or a single `auto` column when `n == 0`.
pub fn column_widths(column_count: usize, total_width_percent: f64) -> Vec<String> {
    if column_count == 0 {
        return vec!["auto".to_string()];
    }
    let share = total_width_percent / column_count as f64;
    vec![format!("{share}%"); column_count]
}

/// Render a properties table: one header cell per column, one row per record.
pub fn render_properties_table(
    table: &PropertiesTable,
    tables: &TablesConfig,
    policy: TextPolicy,
) -> String {
    let mut html = String::from("<table class=\"properties-table\">\n");
    push_colgroup(
        &mut html,
        &column_widths(table.columns.len(), tables.total_width_percent),
    );

    html.push_str("<thead>\n<tr>\n");
    for column in &table.columns {
        let _ = writeln!(html, "<th>{}</th>", apply_policy(&column.name, policy));
    }
    html.push_str("</tr>\n</thead>\n");

    html.push_str("<tbody>\n");
    for row in table.rows() {
        html.push_str("<tr>\n");
        for value in row {
            let _ = writeln!(html, "<td>{}</td>", apply_policy(&value.to_string(), policy));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");

    html
}

/// Render the characterization table: label cell, then the image itself.
///
/// `src` and `alt` attributes are always attribute-escaped; the label cell
/// follows the text policy.
pub fn render_characterization_table(
    images: &[ImageEntry],
    tables: &TablesConfig,
    policy: TextPolicy,
) -> String {
    let mut html = String::from("<table class=\"characterization-table\">\n");
    push_colgroup(
        &mut html,
        &[
            tables.label_column_width.clone(),
            tables.image_column_width.clone(),
        ],
    );

    html.push_str("<tbody>\n");
    for image in images {
        html.push_str("<tr>\n");
        let _ = writeln!(html, "<td>{}</td>", apply_policy(&image.label, policy));
        let _ = writeln!(
            html,
            "<td><img src=\"{}\" alt=\"{}\" style=\"width: {}\"></td>",
            escape_html(&image.file_name),
            escape_html(&image.label),
            tables.image_width,
        );
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");

    html
}

fn push_colgroup(html: &mut String, widths: &[String]) {
    html.push_str("<colgroup>\n");
    for width in widths {
        let _ = writeln!(html, "<col style=\"width: {width}\">");
    }
    html.push_str("</colgroup>\n");
}
