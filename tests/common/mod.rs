//! Shared test entries and helpers for integration tests.

#![allow(dead_code)]

use bibfmt::{BibliographyEntry, EntryType, Field};

/// A fully populated journal article.
pub fn article() -> BibliographyEntry {
    BibliographyEntry::new(EntryType::Article)
        .with_id("doe2020")
        .with(Field::Author, "Doe, J.")
        .with(Field::Title, "On Foo")
        .with(Field::Journal, "J. Bar")
        .with(Field::Volume, "3")
        .with(Field::Year, "2020")
        .with(Field::Pages, "1-10")
}

/// A fully populated book, including its address.
pub fn book() -> BibliographyEntry {
    BibliographyEntry::new(EntryType::Book)
        .with_id("roe1999")
        .with(Field::Author, "Roe, R.")
        .with(Field::Title, "Bar Book")
        .with(Field::Publisher, "Pub Co")
        .with(Field::Year, "1999")
        .with(Field::Address, "Boston")
}

/// A fully populated conference paper.
pub fn inproceedings() -> BibliographyEntry {
    BibliographyEntry::new(EntryType::InProceedings)
        .with_id("poe2018")
        .with(Field::Author, "Poe, P.")
        .with(Field::Title, "Baz Method")
        .with(Field::Booktitle, "Proc. Qux")
        .with(Field::Year, "2018")
        .with(Field::Pages, "5-9")
}

/// The three entries above, in that order.
pub fn sample_entries() -> Vec<BibliographyEntry> {
    vec![article(), book(), inproceedings()]
}

/// BibTeX source describing the same three entries.
pub const SAMPLE_BIB: &str = r#"@article{doe2020,
  author = {Doe, J.},
  title = {On Foo},
  journal = {J. Bar},
  volume = {3},
  year = {2020},
  pages = {1-10}
}

@book{roe1999,
  author = {Roe, R.},
  title = {Bar Book},
  publisher = {Pub Co},
  address = {Boston},
  year = {1999}
}

@inproceedings{poe2018,
  author = {Poe, P.},
  title = {Baz Method},
  booktitle = {Proc. Qux},
  year = {2018},
  pages = {5-9}
}
"#;
