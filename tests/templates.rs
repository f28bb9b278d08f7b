//! Golden tests for the citation templates, using TOML fixtures.
//!
//! Each file in `tests/fixtures/templates/` holds the cases of one style.
//! A case formats a single entry and compares the exact output.

mod common;

use std::fs;
use std::path::Path;

use bibfmt::{
    format_bibliography, format_bibliography_chicago, format_bibliography_harvard,
    format_bibliography_vancouver, format_entry, BibliographyEntry, CitationStyle, EntryType,
    Field, FormatOptions,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(rename = "case")]
    cases: Vec<Case>,
}

/// A single golden case.
#[derive(Debug, Deserialize)]
struct Case {
    /// Name of the test case
    name: String,
    /// Style name, resolved like the dispatcher does
    style: String,
    /// Position of the entry in its sequence
    #[serde(default)]
    index: usize,
    /// Formatting options (defaults when omitted)
    #[serde(default)]
    options: FormatOptions,
    entry: BibliographyEntry,
    expected: String,
}

/// Load all fixture files from a directory, sorted by file name.
fn load_fixtures(dir: &Path) -> Vec<(String, FixtureFile)> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "toml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: FixtureFile = toml::from_str(&content)
                .unwrap_or_else(|e| panic!("invalid fixture {}: {}", path.display(), e));
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            (name, fixture)
        })
        .collect()
}

#[test]
fn test_template_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates");
    let fixtures = load_fixtures(&fixtures_dir);
    assert_eq!(fixtures.len(), 6, "expected one fixture file per style plus compat");

    let mut ran = 0;
    for (file, fixture) in fixtures {
        for case in fixture.cases {
            let style = CitationStyle::from_name(&case.style);
            let result = format_entry(&case.entry, style, case.index, &case.options);
            assert_eq!(
                result, case.expected,
                "Fixture '{}' case '{}' output mismatch",
                file, case.name
            );
            ran += 1;
        }
    }
    assert!(ran >= 30, "only {} template cases ran", ran);
}

// =============================================================================
// Dispatcher and sequence behavior
// =============================================================================

#[test]
fn test_every_style_every_known_type_is_distinct() {
    // Given: the three fully populated entries
    let entries = common::sample_entries();

    // When: formatting them in every style
    for style in CitationStyle::ALL {
        let result = format_bibliography(&entries, style.name());

        // Then: one citation per entry, and no template leaked another's slot
        assert_eq!(result.len(), 3);
        assert!(result[0].contains("1-10"), "{}: {}", style, result[0]);
        assert!(result[1].contains("Pub Co"), "{}: {}", style, result[1]);
        assert!(result[2].contains("Proc. Qux"), "{}: {}", style, result[2]);
    }
}

#[test]
fn test_unknown_type_uses_fallback_for_every_style() {
    let mut misc = common::article();
    misc.entry_type = EntryType::Other("misc".to_string());
    let expected = [
        (CitationStyle::Mla, r#"Doe, J. "On Foo." 2020."#),
        (CitationStyle::Apa, "Doe, J. (2020). On Foo."),
        (CitationStyle::Chicago, r#"Doe, J. "On Foo." 2020."#),
        (CitationStyle::Harvard, "Doe, J. (2020) 'On Foo'."),
        (CitationStyle::Vancouver, "1. Doe, J. On Foo. 2020."),
    ];

    for (style, want) in expected {
        assert_eq!(
            format_entry(&misc, style, 0, &FormatOptions::default()),
            want,
            "{} misc",
            style
        );
    }

    // An absent type behaves the same way
    misc.entry_type = EntryType::Missing;
    assert_eq!(
        format_entry(&misc, CitationStyle::Apa, 0, &FormatOptions::default()),
        "Doe, J. (2020). On Foo."
    );
}

#[test]
fn test_unknown_style_name_formats_as_mla() {
    let entries = common::sample_entries();
    assert_eq!(
        format_bibliography(&entries, "IEEE"),
        format_bibliography(&entries, "MLA")
    );
}

#[test]
fn test_style_names_match_exactly() {
    // Given: the article and names that differ from "APA" only in case or padding
    let entries = vec![common::article()];
    let mla = format_bibliography(&entries, "MLA");

    // When/Then: they are not recognized, so the citation is MLA
    for name in ["apa", " APA ", "Apa"] {
        assert_eq!(format_bibliography(&entries, name), mla, "{:?}", name);
    }
    assert_eq!(
        format_bibliography(&entries, "APA"),
        vec!["Doe, J. (2020). On Foo. <em>J. Bar</em>, 3, 1-10.".to_string()]
    );
}

#[test]
fn test_vancouver_numbering_follows_input_order() {
    // Given: three entries and the same entries reversed
    let entries = common::sample_entries();
    let reversed: Vec<_> = entries.iter().rev().cloned().collect();

    // When: formatting both in Vancouver
    let forward = format_bibliography_vancouver(&entries);
    let backward = format_bibliography_vancouver(&reversed);

    // Then: numbers follow position, so each entry's number changes
    assert!(forward[0].starts_with("1. Doe"));
    assert!(forward[1].starts_with("2. Roe"));
    assert!(forward[2].starts_with("3. Poe"));
    assert!(backward[0].starts_with("1. Poe"));
    assert!(backward[2].starts_with("3. Doe"));
    assert_eq!(
        forward[0].trim_start_matches("1. "),
        backward[2].trim_start_matches("3. ")
    );
}

#[test]
fn test_address_segment_present_once_or_absent() {
    let with_address = common::book();
    let mut without_address = common::book();
    without_address.address = None;
    let mut empty_address = common::book();
    empty_address.set_field(Field::Address, "");

    let harvard = format_bibliography_harvard(&[
        with_address.clone(),
        without_address.clone(),
        empty_address.clone(),
    ]);
    assert_eq!(harvard[0].matches(", Boston").count(), 1);
    assert_eq!(harvard[1], "Roe, R. (1999) <em>Bar Book</em>, Pub Co.");
    assert_eq!(harvard[2], harvard[1]);

    let chicago = format_bibliography_chicago(&[with_address, without_address, empty_address]);
    assert_eq!(chicago[0].matches("Boston: ").count(), 1);
    assert_eq!(chicago[1], "Roe, R. <em>Bar Book</em>. Pub Co, 1999.");
    assert_eq!(chicago[2], chicago[1]);
}

#[test]
fn test_address_absent_in_compat_mode_has_no_placeholder() {
    let mut book = common::book();
    book.address = None;

    let result = format_entry(&book, CitationStyle::Vancouver, 4, &FormatOptions::compat());

    assert_eq!(result, "5. Roe, R.. Bar Book. Pub Co; 1999.");
    assert!(!result.contains("undefined"));
}
