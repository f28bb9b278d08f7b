//! Entry loading.
//!
//! Reads bibliography entries from BibTeX sources or from stored JSON
//! records, supporting both standard JSON arrays and JSONL format (one JSON
//! object per line).

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::bibtex::parse_bibtex;
use crate::entry::BibliographyEntry;

/// Errors that can occur when loading entries.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },

    #[error("Entries must be a JSON array")]
    NotAnArray,

    #[error("Invalid BibTeX: {0}")]
    Bibtex(String),
}

/// How to interpret loaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Bibtex,
    Json,
    /// Decide from the content itself.
    Detect,
}

impl SourceFormat {
    /// Picks a format from a file extension: `.bib` is BibTeX, `.json` and
    /// `.jsonl` are JSON, anything else is detected from content.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bib") => SourceFormat::Bibtex,
            Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("jsonl") => {
                SourceFormat::Json
            }
            _ => SourceFormat::Detect,
        }
    }
}

/// Loads entries from a BibTeX, JSON or JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content is invalid.
pub fn load_entries(path: &Path) -> Result<Vec<BibliographyEntry>, LoadError> {
    let content = fs::read_to_string(path)?;
    let entries = parse_entries(&content, SourceFormat::from_path(path))?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded entries");
    Ok(entries)
}

/// Parses entries from in-memory content.
///
/// With [`SourceFormat::Detect`], content starting with `@` (after leading
/// whitespace and `%` comment lines) is BibTeX; everything else is JSON.
pub fn parse_entries(
    content: &str,
    format: SourceFormat,
) -> Result<Vec<BibliographyEntry>, LoadError> {
    match format {
        SourceFormat::Bibtex => parse_bibtex(content),
        SourceFormat::Json => parse_json_entries(content),
        SourceFormat::Detect if looks_like_bibtex(content) => parse_bibtex(content),
        SourceFormat::Detect => parse_json_entries(content),
    }
}

fn looks_like_bibtex(content: &str) -> bool {
    content
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !line.starts_with('%'))
        .is_some_and(|line| line.starts_with('@'))
}

/// Parses a JSON array or JSONL document into entries.
///
/// # Returns
///
/// An empty list for blank content.
fn parse_json_entries(content: &str) -> Result<Vec<BibliographyEntry>, LoadError> {
    let trimmed = content.trim();

    // Empty content returns no entries
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    // Check if it's a JSON array
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    // A complete JSON document: one object is one entry, scalars are rejected
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) if value.is_object() => return Ok(vec![serde_json::from_value(value)?]),
        Ok(_) => return Err(LoadError::NotAnArray),
        Err(_) => {}
    }

    // Treat as JSONL: parse each non-empty line as a JSON object
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<BibliographyEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                return Err(LoadError::JsonlError {
                    line: line_num + 1, // 1-indexed line numbers
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(entries)
}
