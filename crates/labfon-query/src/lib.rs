//! Search, facet filtering, sorting and pagination over publications.
//!
//! Every query is recomputed from the full collection; nothing is indexed
//! incrementally.

pub mod catalog;
pub mod collation;
pub mod facet;
pub mod pagination;
pub mod query;
pub mod sort;

pub use catalog::{
    ActiveFilter, FilterKind, PublicationCatalog, Statistics, TypeCount, YearGroup,
};
pub use collation::{compare_pt, compare_pt_base};
pub use facet::{Facet, FacetFilter, FacetFilters, FacetIndex, FacetOption};
pub use pagination::{
    DEFAULT_ITEMS_PER_PAGE, PAGE_SIZE_OPTIONS, PageMarker, PageState, PageWindow, page_numbers,
    total_pages,
};
pub use query::{QueryState, apply_query, filter_and_sort, searchable_text};
pub use sort::SortKey;
