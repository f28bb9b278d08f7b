//! Citation formatting.
//!
//! Renders bibliography entries through the template table. Formatting is a
//! pure function of the entry, its position and the options: it never fails
//! and never mutates its input. Output order always matches input order.

use serde::Deserialize;

use crate::entry::{BibliographyEntry, Field};
use crate::style::CitationStyle;
use crate::template::{template, Token};

/// Placeholder the original web front-end printed for absent fields.
pub const COMPAT_PLACEHOLDER: &str = "undefined";

/// Options controlling how field values are inserted into templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// HTML-escape field values before inserting them. Template markup such
    /// as `<em>` is never escaped.
    pub escape_fields: bool,
    /// Text rendered in place of an absent field.
    pub missing_field_placeholder: String,
    /// Drop the leading period of a template separator when the field value
    /// before it already ends with one (`Doe, J.` + `. ` gives `Doe, J. `).
    pub collapse_periods: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            escape_fields: false,
            missing_field_placeholder: String::new(),
            collapse_periods: true,
        }
    }
}

impl FormatOptions {
    /// Options reproducing the original output byte for byte: unescaped
    /// fields, a literal `undefined` for absent ones and no period collapsing.
    pub fn compat() -> Self {
        Self {
            escape_fields: false,
            missing_field_placeholder: COMPAT_PLACEHOLDER.to_string(),
            collapse_periods: false,
        }
    }
}

/// Formats a single entry.
///
/// `index` is the entry's 0-based position in its sequence; only numbered
/// styles use it.
pub fn format_entry(
    entry: &BibliographyEntry,
    style: CitationStyle,
    index: usize,
    options: &FormatOptions,
) -> String {
    let mut out = String::new();
    let mut after_value = false;

    for token in template(style, &entry.entry_type) {
        match *token {
            Token::Lit(text) => {
                let text = match text.strip_prefix('.') {
                    Some(rest) if after_value && options.collapse_periods && out.ends_with('.') => {
                        rest
                    }
                    _ => text,
                };
                out.push_str(text);
            }
            Token::Text(field) => push_field(&mut out, entry, field, options),
            Token::Emph(field) => {
                out.push_str("<em>");
                push_field(&mut out, entry, field, options);
                out.push_str("</em>");
            }
            Token::Number => out.push_str(&(index + 1).to_string()),
            Token::Optional {
                field,
                before,
                after,
            } => {
                if let Some(value) = entry.field(field).filter(|v| !v.is_empty()) {
                    out.push_str(before);
                    push_value(&mut out, value, options);
                    out.push_str(after);
                }
            }
        }
        after_value = matches!(token, Token::Text(_));
    }

    out
}

fn push_field(out: &mut String, entry: &BibliographyEntry, field: Field, options: &FormatOptions) {
    match entry.field(field) {
        Some(value) => push_value(out, value, options),
        None => out.push_str(&options.missing_field_placeholder),
    }
}

fn push_value(out: &mut String, value: &str, options: &FormatOptions) {
    if options.escape_fields {
        out.push_str(&escape_html(value));
    } else {
        out.push_str(value);
    }
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Formats every entry in `entries` with the given style and options.
///
/// The result has the same length and order as the input.
pub fn format_bibliography_with(
    entries: &[BibliographyEntry],
    style: CitationStyle,
    options: &FormatOptions,
) -> Vec<String> {
    tracing::debug!(style = %style, entries = entries.len(), "formatting bibliography");
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format_entry(entry, style, index, options))
        .collect()
}

/// Formats entries with a style chosen by name.
///
/// Names that match none of the five styles fall back to MLA.
pub fn format_bibliography(entries: &[BibliographyEntry], style: &str) -> Vec<String> {
    format_bibliography_with(
        entries,
        CitationStyle::from_name(style),
        &FormatOptions::default(),
    )
}

pub fn format_bibliography_mla(entries: &[BibliographyEntry]) -> Vec<String> {
    format_bibliography_with(entries, CitationStyle::Mla, &FormatOptions::default())
}

pub fn format_bibliography_apa(entries: &[BibliographyEntry]) -> Vec<String> {
    format_bibliography_with(entries, CitationStyle::Apa, &FormatOptions::default())
}

pub fn format_bibliography_chicago(entries: &[BibliographyEntry]) -> Vec<String> {
    format_bibliography_with(entries, CitationStyle::Chicago, &FormatOptions::default())
}

pub fn format_bibliography_harvard(entries: &[BibliographyEntry]) -> Vec<String> {
    format_bibliography_with(entries, CitationStyle::Harvard, &FormatOptions::default())
}

/// Vancouver citations are numbered by position, starting at 1.
pub fn format_bibliography_vancouver(entries: &[BibliographyEntry]) -> Vec<String> {
    format_bibliography_with(entries, CitationStyle::Vancouver, &FormatOptions::default())
}
