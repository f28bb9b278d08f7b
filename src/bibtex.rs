//! BibTeX input.
//!
//! The grammar is handled entirely by the `biblatex` crate; this module only
//! maps its entries onto [`BibliographyEntry`].

use biblatex::{Bibliography, ChunksExt, Entry};

use crate::entry::{BibliographyEntry, EntryType, Field};
use crate::load::LoadError;

/// Parses BibTeX source into entries, in source order.
///
/// The citation key becomes the entry `id`. Template fields are copied
/// verbatim (braces removed, no name parsing); all other fields are dropped.
///
/// # Errors
///
/// Returns `LoadError::Bibtex` if the source is not valid BibTeX.
pub fn parse_bibtex(source: &str) -> Result<Vec<BibliographyEntry>, LoadError> {
    let bibliography =
        Bibliography::parse(source).map_err(|e| LoadError::Bibtex(e.to_string()))?;

    let entries: Vec<BibliographyEntry> = bibliography.iter().map(convert_entry).collect();
    tracing::debug!(entries = entries.len(), "parsed BibTeX source");
    Ok(entries)
}

fn convert_entry(entry: &Entry) -> BibliographyEntry {
    let tag = entry.entry_type.to_string().to_lowercase();
    let mut converted = BibliographyEntry::new(EntryType::from_tag(&tag)).with_id(&entry.key);

    for (name, chunks) in &entry.fields {
        match Field::from_name(name) {
            Some(field) => converted.set_field(field, chunks.format_verbatim()),
            None => tracing::trace!(key = %entry.key, field = %name, "skipping field"),
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
@article{doe2020,
  author = {Doe, J.},
  title = {On Foo},
  journal = {J. Bar},
  volume = {3},
  year = {2020},
  pages = {1-10},
  doi = {10.1000/foo}
}

@book{roe1999,
  author = {Roe, R. and Poe, P.},
  title = {The {Bar} Book},
  publisher = {Pub},
  address = {Boston},
  year = 1999
}
"#;

    #[test]
    fn test_parse_bibtex_maps_fields() {
        // Given: two BibTeX entries
        // When: we parse them
        let entries = parse_bibtex(SAMPLE).unwrap();

        // Then: they keep source order, keys and template fields
        assert_eq!(entries.len(), 2);

        let article = &entries[0];
        assert_eq!(article.id.as_deref(), Some("doe2020"));
        assert_eq!(article.entry_type, EntryType::Article);
        assert_eq!(article.author.as_deref(), Some("Doe, J."));
        assert_eq!(article.journal.as_deref(), Some("J. Bar"));
        assert_eq!(article.pages.as_deref(), Some("1-10"));

        let book = &entries[1];
        assert_eq!(book.entry_type, EntryType::Book);
        assert_eq!(book.author.as_deref(), Some("Roe, R. and Poe, P."));
        assert_eq!(book.title.as_deref(), Some("The Bar Book"));
        assert_eq!(book.address.as_deref(), Some("Boston"));
        assert_eq!(book.year.as_deref(), Some("1999"));
    }

    #[test]
    fn test_parse_bibtex_inproceedings() {
        let source = "@inproceedings{k, title = {T}, booktitle = {Proc. X}}";
        let entries = parse_bibtex(source).unwrap();
        assert_eq!(entries[0].entry_type, EntryType::InProceedings);
        assert_eq!(entries[0].booktitle.as_deref(), Some("Proc. X"));
    }

    #[test]
    fn test_parse_bibtex_empty() {
        assert!(parse_bibtex("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bibtex_invalid() {
        let result = parse_bibtex("@article{broken, title = {unclosed");
        assert!(matches!(result, Err(LoadError::Bibtex(_))));
    }
}
