//! Searching and selecting stored entries.

use crate::entry::BibliographyEntry;

/// Returns the entries matching `query`, in their original order.
///
/// An entry matches when its title or author contains the query
/// (case-insensitive) or its year contains it verbatim. A blank query
/// matches everything.
pub fn filter_entries<'a>(
    entries: &'a [BibliographyEntry],
    query: &str,
) -> Vec<&'a BibliographyEntry> {
    let query = query.trim();
    if query.is_empty() {
        return entries.iter().collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            let in_text = |value: &Option<String>| {
                value
                    .as_deref()
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            };
            in_text(&entry.title)
                || in_text(&entry.author)
                || entry.year.as_deref().is_some_and(|y| y.contains(query))
        })
        .collect()
}

/// Appends `incoming` to `selection`, skipping entries whose id is already
/// selected. Entries without an id are always appended.
pub fn merge_selection(
    mut selection: Vec<BibliographyEntry>,
    incoming: impl IntoIterator<Item = BibliographyEntry>,
) -> Vec<BibliographyEntry> {
    for entry in incoming {
        let duplicate = entry.id.is_some()
            && selection.iter().any(|existing| existing.id == entry.id);
        if !duplicate {
            selection.push(entry);
        }
    }
    selection
}

/// Removes every entry with the given id, returning how many were removed.
pub fn remove_by_id(entries: &mut Vec<BibliographyEntry>, id: &str) -> usize {
    let before = entries.len();
    entries.retain(|entry| entry.id.as_deref() != Some(id));
    before - entries.len()
}
