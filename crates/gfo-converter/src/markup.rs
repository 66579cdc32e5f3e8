//! HTML for the rows appended to the results container.

use crate::view::ResultRow;

pub fn row_class(row: &ResultRow) -> &'static str {
    match row {
        ResultRow::Converted { .. } => "converted-url",
        ResultRow::Downloadable { .. } => "downloadable-url",
    }
}

/// Inner HTML of a row element. Both URLs are escaped since they come
/// straight from the input field.
pub fn row_markup(row: &ResultRow) -> String {
    match row {
        ResultRow::Converted { original, derived } => format!(
            concat!(
                "<div class=\"converted-url-icon center\">",
                "<i class=\"material-symbols-outlined\">link</i>",
                "</div>",
                "<input class=\"converted-url-input converted-url-input-old\" value=\"{}\" readonly>",
                "<input class=\"converted-url-input converted-url-input-new\" value=\"{}\" readonly>",
            ),
            escape_html(original),
            escape_html(derived)
        ),
        ResultRow::Downloadable { original, derived } => format!(
            concat!(
                "<div class=\"downloadable-url-icon center\">",
                "<i class=\"material-symbols-outlined\">archive</i>",
                "</div>",
                "<input class=\"downloadable-url-input downloadable-url-input-old\" value=\"{}\" readonly>",
                "<div class=\"downloadable-url-download-button-carrier center\">",
                "<a class=\"downloadable-url-download-button\" href=\"{}\">Download</a>",
                "</div>",
            ),
            escape_html(original),
            escape_html(derived)
        ),
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
