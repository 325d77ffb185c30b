use std::path::PathBuf;

use labfon_render::{RenderOutcome, SiteReport};

/// Result of `labfon site`.
#[derive(Debug)]
pub struct SiteResult {
    pub report: SiteReport,
    /// Outcome of the publications region, when a document was given.
    pub publications: Option<RenderOutcome>,
    pub output: Option<PathBuf>,
    pub html: String,
}

impl SiteResult {
    pub fn has_errors(&self) -> bool {
        self.report.failures() > 0 || matches!(self.publications, Some(RenderOutcome::Failed(_)))
    }
}

/// Result of `labfon publications`.
#[derive(Debug)]
pub struct ListingResult {
    pub outcome: RenderOutcome,
    /// Markup of the publications region.
    pub markup: String,
    pub announcement: Option<String>,
    pub headline: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub rows: Vec<ListingRow>,
}

/// One publication on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Position in the full result, starting at 1.
    pub position: usize,
    pub id: String,
    pub year: String,
    pub kind: &'static str,
    pub citation: String,
}
