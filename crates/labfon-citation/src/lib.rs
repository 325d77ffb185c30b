//! Citation codec for publication records.
//!
//! Records map to ABNT display citations (with `<strong>`/`<em>` markup),
//! short citations for compact listings, plain text for copying, and BibTeX
//! entries for reference managers. All functions are total: missing fields
//! turn into placeholder tokens.

pub mod abnt;
pub mod bibtex;
pub mod plain;
pub mod sanitize;
pub mod style;

use labfon_model::Publication;

pub use abnt::CitationFormatter;
pub use bibtex::to_bibtex;
pub use plain::to_plain_text;
pub use sanitize::{HtmlSanitizer, Sanitizer, escape_html};
pub use style::CitationStyle;

/// Full display citation using the default HTML sanitizer.
pub fn format_citation(publication: &Publication) -> String {
    CitationFormatter::<HtmlSanitizer>::default().full(publication)
}

/// Short citation using the default HTML sanitizer.
pub fn format_short_citation(publication: &Publication) -> String {
    CitationFormatter::<HtmlSanitizer>::default().short(publication)
}
