//! HTML output for formatted citations.
//!
//! Citations are embedded as-is: whatever markup the formatter produced
//! (and any unescaped field text) ends up in the fragment.

use crate::formatter::escape_html;
use crate::style::CitationStyle;

/// Wraps one formatted citation in its display element.
pub fn wrap_citation(citation: &str) -> String {
    format!("<div class=\"citation\">{}</div>", citation)
}

/// Builds the copy-paste HTML block: one wrapped citation per line.
///
/// # Returns
///
/// An empty string when there are no citations.
pub fn render_html_code(citations: &[String]) -> String {
    citations
        .iter()
        .map(|c| wrap_citation(c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generates a standalone HTML page holding the citation block.
///
/// # Arguments
///
/// * `citations` - The formatted citations, in display order
/// * `style` - The style they were formatted with, used in the page title
pub fn render_html_document(citations: &[String], style: CitationStyle) -> String {
    let title = escape_html(&format!("Bibliography ({})", style));
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>{}</title>\n", title));
    output.push_str("</head>\n<body>\n");
    let body = render_html_code(citations);
    if !body.is_empty() {
        output.push_str(&body);
        output.push('\n');
    }
    output.push_str("</body>\n</html>\n");
    output
}
