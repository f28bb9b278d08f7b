//! Citation style selection.
//!
//! The five supported styles and the lookup rules callers use to pick one by
//! name.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named citation formatting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CitationStyle {
    #[default]
    Mla,
    Apa,
    Chicago,
    Harvard,
    Vancouver,
}

/// Returned by the strict [`FromStr`] parse when the name matches no style.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown citation style '{0}'")]
pub struct UnknownStyle(pub String);

impl CitationStyle {
    /// Every style, in the order they are offered to users.
    pub const ALL: [CitationStyle; 5] = [
        CitationStyle::Mla,
        CitationStyle::Apa,
        CitationStyle::Chicago,
        CitationStyle::Harvard,
        CitationStyle::Vancouver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CitationStyle::Mla => "MLA",
            CitationStyle::Apa => "APA",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Harvard => "Harvard",
            CitationStyle::Vancouver => "Vancouver",
        }
    }

    /// Resolves a style name, falling back to MLA when nothing matches.
    ///
    /// Names must match exactly: `"apa"` and `" APA "` are unknown and give MLA.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|UnknownStyle(name)| {
            tracing::warn!(style = %name, "unknown citation style, falling back to MLA");
            CitationStyle::Mla
        })
    }

    /// Looser lookup for typed input: ignores case and surrounding whitespace.
    pub fn from_name_ignore_case(name: &str) -> Result<Self, UnknownStyle> {
        let trimmed = name.trim();
        CitationStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStyle(name.to_string()))
    }

    /// Whether citations carry a positional reference number.
    pub fn is_numbered(self) -> bool {
        matches!(self, CitationStyle::Vancouver)
    }
}

impl FromStr for CitationStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CitationStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the list of available style names.
pub fn style_names() -> Vec<&'static str> {
    CitationStyle::ALL.iter().map(|s| s.name()).collect()
}
