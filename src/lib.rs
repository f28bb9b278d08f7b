//! bibfmt: format bibliography entries as citations.
//!
//! This library provides functionality to:
//! - Load entries from BibTeX sources or stored JSON records
//! - Search and select stored entries
//! - Format entries as MLA, APA, Chicago, Harvard or Vancouver citations
//! - Wrap formatted citations in copy-paste HTML

pub mod bibtex;
pub mod entry;
pub mod formatter;
pub mod load;
pub mod output;
pub mod search;
pub mod store;
pub mod style;
pub mod template;

pub use bibtex::parse_bibtex;
pub use entry::{BibliographyEntry, EntryType, Field};
pub use formatter::{
    format_bibliography, format_bibliography_apa, format_bibliography_chicago,
    format_bibliography_harvard, format_bibliography_mla, format_bibliography_vancouver,
    format_bibliography_with, format_entry, FormatOptions,
};
pub use load::{load_entries, parse_entries, LoadError, SourceFormat};
pub use output::{render_html_code, render_html_document, wrap_citation};
pub use search::{filter_entries, merge_selection, remove_by_id};
pub use store::{EntryStore, JsonFileStore, MemoryStore, StoreError};
pub use style::{style_names, CitationStyle, UnknownStyle};
