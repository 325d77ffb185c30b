//! ABNT-style display citations.
//!
//! Every free-text field is escaped by the sanitizer before interpolation;
//! the `<strong>` and `<em>` wrappers are added here and are the only
//! markup in the output.

use labfon_model::placeholders::{
    NO_AUTHOR, NO_AUTHOR_SHORT, NO_BOOK, NO_DATE, NO_INSTITUTION, NO_JOURNAL, NO_PLACE,
    NO_PUBLISHER, NO_TITLE,
};
use labfon_model::{Author, Publication, PublicationType};

use crate::sanitize::{HtmlSanitizer, Sanitizer};

/// Degree label for thesis records without a specific type label.
pub const GENERIC_THESIS_LABEL: &str = "Trabalho acadêmico";

/// Formats publication records as citation strings.
#[derive(Debug, Clone, Default)]
pub struct CitationFormatter<S = HtmlSanitizer> {
    sanitizer: S,
}

impl<S: Sanitizer> CitationFormatter<S> {
    pub fn new(sanitizer: S) -> Self {
        Self { sanitizer }
    }

    pub fn sanitizer(&self) -> &S {
        &self.sanitizer
    }

    /// Full display citation, dispatched on the record type. Untyped
    /// records are cited as journal articles.
    pub fn full(&self, publication: &Publication) -> String {
        match publication.citation_kind() {
            PublicationType::ArticleJournal => self.article(publication),
            PublicationType::Chapter => self.chapter(publication),
            PublicationType::UndergraduateThesis
            | PublicationType::MasterThesis
            | PublicationType::DoctoralThesis => self.thesis(publication),
            PublicationType::SpecialIssue => self.special_issue(publication),
            PublicationType::Other => self.generic(publication),
        }
    }

    /// `SURNAME[ et al.]. Title. year.` for the compact listing.
    pub fn short(&self, publication: &Publication) -> String {
        let first = publication
            .first_author()
            .and_then(Author::family)
            .map_or_else(
                || NO_AUTHOR_SHORT.to_string(),
                |family| self.sanitizer.escape(&family.to_uppercase()),
            );
        // "et al." already ends with the separating period.
        let lead = if publication.authors.len() > 1 {
            format!("{first} et al.")
        } else {
            format!("{first}.")
        };
        format!(
            "{lead} {}. {}.",
            self.title(publication),
            self.year(publication)
        )
    }

    /// Author list: `SURNAME, Given` entries joined by `; `. Authors
    /// without a surname are skipped.
    pub fn authors(&self, authors: &[Author]) -> String {
        let formatted: Vec<String> = authors
            .iter()
            .filter_map(|author| {
                author.family().map(|family| {
                    format!(
                        "{}, {}",
                        self.sanitizer.escape(&family.to_uppercase()),
                        self.sanitizer.escape(author.given_name.trim())
                    )
                })
            })
            .collect();
        if formatted.is_empty() {
            NO_AUTHOR.to_string()
        } else {
            formatted.join("; ")
        }
    }

    fn article(&self, publication: &Publication) -> String {
        let pages = publication
            .page_range
            .as_deref()
            .map(|pages| format!("p. {}", self.sanitizer.escape(pages)));
        let details = self.volume_issue(publication).into_iter().chain(pages);
        format!(
            "{}. {}. {}{}, {}.",
            self.authors(&publication.authors),
            strong(&self.title(publication)),
            em(&self.journal(publication)),
            joined_details(details),
            self.year(publication)
        )
    }

    fn chapter(&self, publication: &Publication) -> String {
        let book = self.text_or(publication.container.title.as_deref(), NO_BOOK);
        let place = self.text_or(publication.imprint.place.as_deref(), NO_PLACE);
        let publisher = self.text_or(publication.imprint.publisher.as_deref(), NO_PUBLISHER);
        let pages = publication
            .page_range
            .as_deref()
            .map(|pages| format!(". p. {}", self.sanitizer.escape(pages)))
            .unwrap_or_default();
        format!(
            "{}. {}. In: {}. {place}: {publisher}, {}{pages}.",
            self.authors(&publication.authors),
            self.title(publication),
            em(&book),
            self.year(publication)
        )
    }

    fn thesis(&self, publication: &Publication) -> String {
        let year = self.year(publication);
        let pages = publication
            .page_range
            .as_deref()
            .map(|pages| format!("{} f. ", self.sanitizer.escape(pages)))
            .unwrap_or_default();
        let label = match publication.genre.as_deref() {
            Some(genre) => self.sanitizer.escape(genre),
            None => publication
                .kind
                .and_then(|kind| kind.thesis_label())
                .unwrap_or(GENERIC_THESIS_LABEL)
                .to_string(),
        };
        let institution = self.text_or(publication.imprint.publisher.as_deref(), NO_INSTITUTION);
        let place = self.text_or(publication.imprint.place.as_deref(), NO_PLACE);
        format!(
            "{}. {}. {year}. {pages}{label} – {institution}, {place}, {year}.",
            self.authors(&publication.authors),
            strong(&self.title(publication)),
        )
    }

    fn special_issue(&self, publication: &Publication) -> String {
        format!(
            "{} (Org.). {}. {}{}, {}.",
            self.authors(&publication.authors),
            strong(&self.title(publication)),
            em(&self.journal(publication)),
            joined_details(self.volume_issue(publication)),
            self.year(publication)
        )
    }

    fn generic(&self, publication: &Publication) -> String {
        format!(
            "{}. {}. {}.",
            self.authors(&publication.authors),
            strong(&self.title(publication)),
            self.year(publication)
        )
    }

    fn volume_issue(&self, publication: &Publication) -> Vec<String> {
        let container = &publication.container;
        let volume = container
            .volume
            .as_deref()
            .map(|volume| format!("v. {}", self.sanitizer.escape(volume)));
        let issue = container
            .issue
            .as_deref()
            .map(|issue| format!("n. {}", self.sanitizer.escape(issue)));
        volume.into_iter().chain(issue).collect()
    }

    fn title(&self, publication: &Publication) -> String {
        self.text_or(publication.title.as_deref(), NO_TITLE)
    }

    fn journal(&self, publication: &Publication) -> String {
        self.text_or(publication.container.title.as_deref(), NO_JOURNAL)
    }

    fn year(&self, publication: &Publication) -> String {
        publication
            .year()
            .map_or_else(|| NO_DATE.to_string(), |year| year.to_string())
    }

    /// Escaped text, or the placeholder (which needs no escaping).
    fn text_or(&self, value: Option<&str>, placeholder: &str) -> String {
        value.map_or_else(|| placeholder.to_string(), |text| self.sanitizer.escape(text))
    }
}

fn strong(content: &str) -> String {
    format!("<strong>{content}</strong>")
}

fn em(content: &str) -> String {
    format!("<em>{content}</em>")
}

/// `, a, b` for non-empty details, nothing otherwise.
fn joined_details(details: impl IntoIterator<Item = String>) -> String {
    let details: Vec<String> = details.into_iter().collect();
    if details.is_empty() {
        String::new()
    } else {
        format!(", {}", details.join(", "))
    }
}
