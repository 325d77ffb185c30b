//! The collection query engine: free-text search, facet filters, sort.

use labfon_model::Publication;
use tracing::trace;

use crate::facet::{Facet, FacetFilter, FacetFilters};
use crate::sort::SortKey;

/// Search text, facet filters and sort key for one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    filters: FacetFilters,
    sort_key: SortKey,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        self.set_search_text(text);
        self
    }

    #[must_use]
    pub fn with_facet(mut self, facet: Facet, filter: impl Into<FacetFilter>) -> Self {
        self.filters.set(facet, filter.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Stores the search text trimmed; matching is case-insensitive.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.trim().to_string();
    }

    pub fn set_facet(&mut self, facet: Facet, filter: FacetFilter) {
        self.filters.set(facet, filter);
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Clears search and facets; the sort key is kept.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.filters = FacetFilters::default();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &FacetFilters {
        &self.filters
    }

    pub fn facet(&self, facet: Facet) -> &FacetFilter {
        self.filters.get(facet)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Whether any search text or facet constraint is set.
    pub fn has_filters(&self) -> bool {
        !self.search_text.is_empty() || !self.filters.is_all()
    }

    pub fn matches(&self, publication: &Publication) -> bool {
        let needle = self.search_text.to_lowercase();
        matches_search(&needle, publication) && self.filters.matches(publication)
    }
}

/// Text searched by the free-text filter: title, author names, container
/// title and subtitle.
pub fn searchable_text(publication: &Publication) -> String {
    let authors = publication
        .authors
        .iter()
        .filter_map(labfon_model::Author::citation_name)
        .collect::<Vec<_>>()
        .join("; ");
    [
        publication.title.as_deref().unwrap_or_default(),
        authors.as_str(),
        publication.container.title.as_deref().unwrap_or_default(),
        publication.subtitle.as_deref().unwrap_or_default(),
    ]
    .join(" ")
    .to_lowercase()
}

fn matches_search(needle: &str, publication: &Publication) -> bool {
    needle.is_empty() || searchable_text(publication).contains(needle)
}

/// Runs the query against the full collection and returns the positions
/// of the matching records in result order. The collection is not
/// modified.
pub fn apply_query(records: &[Publication], query: &QueryState) -> Vec<usize> {
    let needle = query.search_text.to_lowercase();
    let mut selected: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, publication)| {
            matches_search(&needle, publication) && query.filters.matches(publication)
        })
        .map(|(index, _)| index)
        .collect();

    // `sort_by` is stable, so equal keys keep collection order.
    selected.sort_by(|a, b| query.sort_key.compare(&records[*a], &records[*b]));

    trace!(
        total = records.len(),
        matches = selected.len(),
        sort = %query.sort_key,
        "applied query"
    );
    selected
}

/// Convenience form of [`apply_query`] returning the records themselves.
pub fn filter_and_sort<'a>(records: &'a [Publication], query: &QueryState) -> Vec<&'a Publication> {
    apply_query(records, query)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}
