use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use labfon_model::Publication;
use serde::{Deserialize, Serialize};

use crate::collation::compare_pt;

/// Sort order for the publication listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first; undated records last.
    #[default]
    YearDesc,
    /// Oldest first; undated records first.
    YearAsc,
    /// First author's surname.
    AuthorAsc,
    TitleAsc,
    /// Type label, not the raw identifier.
    #[serde(rename = "type")]
    Type,
}

impl SortKey {
    pub const fn all() -> &'static [SortKey] {
        &[
            Self::YearDesc,
            Self::YearAsc,
            Self::AuthorAsc,
            Self::TitleAsc,
            Self::Type,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YearDesc => "year-desc",
            Self::YearAsc => "year-asc",
            Self::AuthorAsc => "author-asc",
            Self::TitleAsc => "title-asc",
            Self::Type => "type",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::YearDesc => "Ano (mais recente)",
            Self::YearAsc => "Ano (mais antigo)",
            Self::AuthorAsc => "Autor (A-Z)",
            Self::TitleAsc => "Título (A-Z)",
            Self::Type => "Tipo",
        }
    }

    /// Whether results under this order may be grouped by year.
    pub const fn is_year_based(&self) -> bool {
        matches!(self, Self::YearDesc | Self::YearAsc)
    }

    /// Compares two records under this order. Ties are `Equal` so a stable
    /// sort keeps their prior relative order.
    pub fn compare(&self, a: &Publication, b: &Publication) -> Ordering {
        match self {
            Self::YearDesc => b.sort_year().cmp(&a.sort_year()),
            Self::YearAsc => a.sort_year().cmp(&b.sort_year()),
            Self::AuthorAsc => compare_pt(first_surname(a), first_surname(b)),
            Self::TitleAsc => compare_pt(
                a.title.as_deref().unwrap_or_default(),
                b.title.as_deref().unwrap_or_default(),
            ),
            Self::Type => compare_pt(a.type_label(), b.type_label()),
        }
    }
}

fn first_surname(publication: &Publication) -> &str {
    publication
        .first_author()
        .map_or("", |author| author.family_name.as_str())
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| format!("Unknown sort key: {s}"))
    }
}
