//! Stateful publication listing.
//!
//! [`PublicationCatalog`] owns the full collection, its facet index and the
//! query and page state, and keeps the cached result consistent with them
//! after every mutation.

use labfon_model::{Publication, PublicationType, type_label};
use tracing::debug;

use crate::facet::{Facet, FacetFilter, FacetIndex};
use crate::pagination::{PageMarker, PageState, PageWindow};
use crate::query::{QueryState, apply_query};
use crate::sort::SortKey;

#[derive(Debug, Clone, Default)]
pub struct PublicationCatalog {
    records: Vec<Publication>,
    facets: FacetIndex,
    query: QueryState,
    page: PageState,
    results: Vec<usize>,
}

impl PublicationCatalog {
    pub fn new(records: Vec<Publication>, items_per_page: usize) -> Self {
        let mut catalog = Self {
            page: PageState::new(items_per_page),
            ..Self::default()
        };
        catalog.replace_records(records);
        catalog
    }

    /// Replaces the collection. Query state returns to its defaults and the
    /// listing goes back to page 1; the page size is kept.
    pub fn replace_records(&mut self, records: Vec<Publication>) {
        self.facets = FacetIndex::build(&records);
        self.records = records;
        self.query = QueryState::default();
        self.page.reset();
        self.refresh();
        debug!(records = self.records.len(), "publication catalog loaded");
    }

    pub fn records(&self) -> &[Publication] {
        &self.records
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.query.set_search_text(text);
        self.requery();
    }

    pub fn set_facet(&mut self, facet: Facet, filter: FacetFilter) {
        self.query.set_facet(facet, filter);
        self.requery();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.query.set_sort_key(sort_key);
        self.requery();
    }

    /// Clears search text and every facet. The sort key is kept.
    pub fn reset_filters(&mut self) {
        self.query.clear_filters();
        self.requery();
    }

    /// Removes a single active filter.
    pub fn remove_filter(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Search => self.set_search_text(""),
            FilterKind::Facet(facet) => self.set_facet(facet, FacetFilter::All),
        }
    }

    /// Changes only the current page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page.go_to(page, self.results.len());
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.page.set_items_per_page(items_per_page);
        self.page.clamp(self.results.len());
    }

    fn requery(&mut self) {
        self.page.reset();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.results = apply_query(&self.records, &self.query);
        self.page.clamp(self.results.len());
    }

    /// Every matching record in result order.
    pub fn results(&self) -> impl Iterator<Item = &Publication> + '_ {
        self.results.iter().map(|index| &self.records[*index])
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn window(&self) -> PageWindow {
        self.page.window(self.results.len())
    }

    /// Records on the current page.
    pub fn visible(&self) -> Vec<&Publication> {
        self.window()
            .slice(&self.results)
            .iter()
            .map(|index| &self.records[*index])
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<PageMarker> {
        self.window().page_numbers()
    }

    /// Current page grouped by year, when the sort is year-based. Groups
    /// come from the paginated slice, so a year may continue on the next
    /// page.
    pub fn year_groups(&self) -> Option<Vec<YearGroup<'_>>> {
        if !self.query.sort_key().is_year_based() {
            return None;
        }
        let mut groups: Vec<YearGroup<'_>> = Vec::new();
        for publication in self.visible() {
            let year = publication.year();
            if let Some(group) = groups.last_mut().filter(|group| group.year == year) {
                group.items.push(publication);
                continue;
            }
            groups.push(YearGroup {
                year,
                label: publication.year_facet_value(),
                items: vec![publication],
            });
        }
        Some(groups)
    }

    pub fn statistics(&self) -> Statistics {
        let shown = self.results.len();
        let breakdown = (self.query.facet(Facet::Type).is_all() && shown > 0).then(|| {
            let mut counts: Vec<TypeCount> = Vec::new();
            for publication in self.results() {
                let kind = publication.kind.unwrap_or(PublicationType::Other);
                match counts.iter_mut().find(|entry| entry.kind == kind) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(TypeCount {
                        kind,
                        label: type_label(Some(kind)),
                        count: 1,
                    }),
                }
            }
            counts
        });
        Statistics {
            shown,
            total: self.records.len(),
            breakdown,
        }
    }

    /// Active constraints in display order: search first, then facets.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.query.search_text().is_empty() {
            active.push(ActiveFilter {
                kind: FilterKind::Search,
                value: self.query.search_text().to_string(),
            });
        }
        for (facet, value) in self.query.filters().active() {
            let value = match facet {
                Facet::Type => value
                    .parse::<PublicationType>()
                    .map_or_else(|_| value.to_string(), |kind| kind.label().to_string()),
                Facet::Year | Facet::Author => value.to_string(),
            };
            active.push(ActiveFilter {
                kind: FilterKind::Facet(facet),
                value,
            });
        }
        active
    }
}

/// Records of one year on the current page.
#[derive(Debug, Clone)]
pub struct YearGroup<'a> {
    pub year: Option<i32>,
    pub label: String,
    pub items: Vec<&'a Publication>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub kind: PublicationType,
    pub label: &'static str,
    pub count: usize,
}

/// Result counts for the statistics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub shown: usize,
    pub total: usize,
    /// Per-type counts in first-seen order; only when the type facet is
    /// unconstrained and something matched.
    pub breakdown: Option<Vec<TypeCount>>,
}

impl Statistics {
    /// "Exibindo N [de M] publicação/publicações".
    pub fn headline(&self) -> String {
        let noun = if self.shown == 1 {
            "publicação"
        } else {
            "publicações"
        };
        if self.shown == self.total {
            format!("Exibindo {} {noun}", self.shown)
        } else {
            format!("Exibindo {} de {} {noun}", self.shown, self.total)
        }
    }

    pub fn breakdown_text(&self) -> Option<String> {
        self.breakdown.as_ref().map(|counts| {
            counts
                .iter()
                .map(|entry| format!("{}: {}", entry.label, entry.count))
                .collect::<Vec<_>>()
                .join(" | ")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Search,
    Facet(Facet),
}

/// A removable constraint shown above the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub value: String,
}

impl ActiveFilter {
    pub fn text(&self) -> String {
        match self.kind {
            FilterKind::Search => format!("Busca: \"{}\"", self.value),
            FilterKind::Facet(facet) => format!("{}: {}", facet.label(), self.value),
        }
    }
}
