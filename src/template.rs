//! Citation templates.
//!
//! Each (style, entry type) pair maps to an ordered list of tokens. Rendering
//! a template is plain concatenation, so the table below is the single place
//! where field order, punctuation and markup are defined.

use crate::entry::EntryType;
use crate::entry::Field::{self, *};
use crate::style::CitationStyle;

/// One piece of a citation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Literal text, emitted as is.
    Lit(&'static str),
    /// A field value.
    Text(Field),
    /// A field value wrapped in `<em>` markup.
    Emph(Field),
    /// The 1-based position of the entry in the input sequence.
    Number,
    /// `before`, the field value and `after`, emitted only when the field is
    /// present and non-empty.
    Optional {
        field: Field,
        before: &'static str,
        after: &'static str,
    },
}

use Token::{Emph, Lit, Number, Optional, Text};

/// Template row of one style: article, book, inproceedings, fallback.
struct StyleTemplates {
    article: &'static [Token],
    book: &'static [Token],
    inproceedings: &'static [Token],
    fallback: &'static [Token],
}

#[rustfmt::skip]
const MLA: StyleTemplates = StyleTemplates {
    article: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" "), Emph(Journal),
        Lit(", vol. "), Text(Volume), Lit(", "), Text(Year), Lit(", pp. "), Text(Pages), Lit("."),
    ],
    book: &[
        Text(Author), Lit(". "), Emph(Title), Lit(". "), Text(Publisher), Lit(", "), Text(Year),
        Lit("."),
    ],
    inproceedings: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" "), Emph(Booktitle), Lit(", "),
        Text(Year), Lit(", pp. "), Text(Pages), Lit("."),
    ],
    fallback: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" "), Text(Year), Lit("."),
    ],
};

#[rustfmt::skip]
const APA: StyleTemplates = StyleTemplates {
    article: &[
        Text(Author), Lit(". ("), Text(Year), Lit("). "), Text(Title), Lit(". "), Emph(Journal),
        Lit(", "), Text(Volume), Lit(", "), Text(Pages), Lit("."),
    ],
    book: &[
        Text(Author), Lit(". ("), Text(Year), Lit("). "), Emph(Title), Lit(". "), Text(Publisher),
        Lit("."),
    ],
    inproceedings: &[
        Text(Author), Lit(". ("), Text(Year), Lit("). "), Text(Title), Lit(". "),
        Emph(Booktitle), Lit(" (pp. "), Text(Pages), Lit(")."),
    ],
    fallback: &[
        Text(Author), Lit(". ("), Text(Year), Lit("). "), Text(Title), Lit("."),
    ],
};

#[rustfmt::skip]
const HARVARD: StyleTemplates = StyleTemplates {
    article: &[
        Text(Author), Lit(" ("), Text(Year), Lit(") '"), Text(Title), Lit("', "), Emph(Journal),
        Lit(", "), Text(Volume), Lit(", pp. "), Text(Pages), Lit("."),
    ],
    book: &[
        Text(Author), Lit(" ("), Text(Year), Lit(") "), Emph(Title), Lit(", "), Text(Publisher),
        Optional { field: Address, before: ", ", after: "" },
        Lit("."),
    ],
    inproceedings: &[
        Text(Author), Lit(" ("), Text(Year), Lit(") '"), Text(Title), Lit("', "),
        Emph(Booktitle), Lit(", pp. "), Text(Pages), Lit("."),
    ],
    fallback: &[
        Text(Author), Lit(" ("), Text(Year), Lit(") '"), Text(Title), Lit("'."),
    ],
};

#[rustfmt::skip]
const VANCOUVER: StyleTemplates = StyleTemplates {
    article: &[
        Number, Lit(". "), Text(Author), Lit(". "), Text(Title), Lit(". "), Text(Journal),
        Lit(". "), Text(Year), Lit(";"), Text(Volume), Lit(":"), Text(Pages), Lit("."),
    ],
    book: &[
        Number, Lit(". "), Text(Author), Lit(". "), Text(Title), Lit(". "),
        Optional { field: Address, before: "", after: ": " },
        Text(Publisher), Lit("; "), Text(Year), Lit("."),
    ],
    inproceedings: &[
        Number, Lit(". "), Text(Author), Lit(". "), Text(Title), Lit(". In: "), Text(Booktitle),
        Lit("; "), Text(Year), Lit(". p. "), Text(Pages), Lit("."),
    ],
    fallback: &[
        Number, Lit(". "), Text(Author), Lit(". "), Text(Title), Lit(". "), Text(Year), Lit("."),
    ],
};

#[rustfmt::skip]
const CHICAGO: StyleTemplates = StyleTemplates {
    article: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" "), Emph(Journal), Lit(" "),
        Text(Volume), Lit(" ("), Text(Year), Lit("): "), Text(Pages), Lit("."),
    ],
    book: &[
        Text(Author), Lit(". "), Emph(Title), Lit(". "),
        Optional { field: Address, before: "", after: ": " },
        Text(Publisher), Lit(", "), Text(Year), Lit("."),
    ],
    inproceedings: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" In "), Emph(Booktitle), Lit(", "),
        Text(Pages), Lit(". "), Text(Year), Lit("."),
    ],
    fallback: &[
        Text(Author), Lit(". \""), Text(Title), Lit(".\" "), Text(Year), Lit("."),
    ],
};

/// Returns the template for a style and entry type.
///
/// Unknown and missing entry types resolve to the style's fallback template.
pub fn template(style: CitationStyle, entry_type: &EntryType) -> &'static [Token] {
    let row = match style {
        CitationStyle::Mla => &MLA,
        CitationStyle::Apa => &APA,
        CitationStyle::Chicago => &CHICAGO,
        CitationStyle::Harvard => &HARVARD,
        CitationStyle::Vancouver => &VANCOUVER,
    };
    match entry_type {
        EntryType::Article => row.article,
        EntryType::Book => row.book,
        EntryType::InProceedings => row.inproceedings,
        EntryType::Other(_) | EntryType::Missing => row.fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_and_missing_types_share_fallback() {
        for style in CitationStyle::ALL {
            let other = template(style, &EntryType::Other("misc".to_string()));
            let missing = template(style, &EntryType::Missing);
            assert_eq!(other, missing, "{} fallback differs", style);
        }
    }

    #[test]
    fn test_number_token_only_in_vancouver() {
        let types = [
            EntryType::Article,
            EntryType::Book,
            EntryType::InProceedings,
            EntryType::Missing,
        ];
        for style in CitationStyle::ALL {
            for entry_type in &types {
                let numbered = template(style, entry_type).first() == Some(&Number);
                assert_eq!(numbered, style.is_numbered(), "{} {:?}", style, entry_type);
            }
        }
    }

    #[test]
    fn test_address_is_conditional_only_for_books() {
        // Given: the book templates of the styles that print a location
        for style in [CitationStyle::Harvard, CitationStyle::Vancouver, CitationStyle::Chicago] {
            let book = template(style, &EntryType::Book);

            // Then: the address appears exactly once, as an optional segment
            let optional = book
                .iter()
                .filter(|t| matches!(t, Optional { field: Address, .. }))
                .count();
            assert_eq!(optional, 1, "{} book template", style);
            assert!(!book.contains(&Text(Address)));
        }
    }
}
