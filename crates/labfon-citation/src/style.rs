use std::fmt;
use std::str::FromStr;

use labfon_model::Publication;

use crate::abnt::CitationFormatter;
use crate::bibtex::to_bibtex;
use crate::plain::to_plain_text;
use crate::sanitize::Sanitizer;

/// Output style of a citation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CitationStyle {
    /// Full ABNT citation with emphasis markup.
    #[default]
    Full,
    /// First author, title and year.
    Short,
    /// Full citation with markup removed.
    Plain,
    BibTex,
}

impl CitationStyle {
    pub const fn all() -> &'static [CitationStyle] {
        &[Self::Full, Self::Short, Self::Plain, Self::BibTex]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Short => "short",
            Self::Plain => "plain",
            Self::BibTex => "bibtex",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| format!("Unknown citation style: {s}"))
    }
}

impl<S: Sanitizer> CitationFormatter<S> {
    pub fn format(&self, publication: &Publication, style: CitationStyle) -> String {
        match style {
            CitationStyle::Full => self.full(publication),
            CitationStyle::Short => self.short(publication),
            CitationStyle::Plain => to_plain_text(&self.full(publication)),
            CitationStyle::BibTex => to_bibtex(publication),
        }
    }
}
