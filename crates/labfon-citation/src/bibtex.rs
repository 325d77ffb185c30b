//! BibTeX export.

use std::fmt::Write;

use labfon_model::{Publication, PublicationType};

/// Entry key used when a record has no id.
pub const DEFAULT_ENTRY_KEY: &str = "ref";

/// Formats a record as a BibTeX entry. Only non-empty fields are written,
/// one per line; the year line is omitted for undated records.
pub fn to_bibtex(publication: &Publication) -> String {
    let entry_type = match publication.kind {
        Some(PublicationType::ArticleJournal) => "article",
        _ => "misc",
    };
    let key = match publication.id.trim() {
        "" => DEFAULT_ENTRY_KEY,
        id => id,
    };

    let authors = publication
        .authors
        .iter()
        .filter(|author| !author.family_name.is_empty() || !author.given_name.is_empty())
        .map(|author| format!("{}, {}", author.family_name, author.given_name))
        .collect::<Vec<_>>()
        .join(" and ");
    let title: String = publication
        .title
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .collect();
    let year = publication.year().map(|year| year.to_string());

    let fields = [
        ("author", Some(authors.as_str())),
        ("title", Some(title.as_str())),
        ("journal", publication.container.title.as_deref()),
        ("volume", publication.container.volume.as_deref()),
        ("number", publication.container.issue.as_deref()),
        ("pages", publication.page_range.as_deref()),
        ("year", year.as_deref()),
    ];

    let mut entry = format!("@{entry_type}{{{key},\n");
    for (name, value) in fields {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            let _ = writeln!(entry, "  {name} = {{{value}}},");
        }
    }
    entry.push_str("}\n");
    entry
}
