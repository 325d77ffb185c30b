//! Bibliographic publication records.
//!
//! Records are decoded leniently: any field may be missing, `null` or of
//! the wrong JSON type and falls back to its default. Blank strings are
//! treated as absent and the publication year is normalized to an optional
//! integer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::placeholders::NO_DATE_FACET;
use crate::serde_util;

/// Publication kind, as found in the `type` field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationType {
    ArticleJournal,
    Chapter,
    UndergraduateThesis,
    MasterThesis,
    DoctoralThesis,
    SpecialIssue,
    /// Any type identifier outside the declared set.
    #[serde(other)]
    Other,
}

impl PublicationType {
    /// All declared kinds, in declaration order.
    pub const fn all() -> &'static [PublicationType] {
        &[
            Self::ArticleJournal,
            Self::Chapter,
            Self::UndergraduateThesis,
            Self::MasterThesis,
            Self::DoctoralThesis,
            Self::SpecialIssue,
            Self::Other,
        ]
    }

    /// Identifier as it appears in the source JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArticleJournal => "article-journal",
            Self::Chapter => "chapter",
            Self::UndergraduateThesis => "undergraduate-thesis",
            Self::MasterThesis => "master-thesis",
            Self::DoctoralThesis => "doctoral-thesis",
            Self::SpecialIssue => "special-issue",
            Self::Other => "other",
        }
    }

    /// Human-readable label used in badges, facets and type sorting.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ArticleJournal => "Artigo",
            Self::Chapter => "Capítulo de livro",
            Self::UndergraduateThesis => "Monografia",
            Self::MasterThesis => "Dissertação",
            Self::DoctoralThesis => "Tese",
            Self::SpecialIssue => "Dossiê especial",
            Self::Other => GENERIC_TYPE_LABEL,
        }
    }

    /// Degree label used in thesis citations.
    pub const fn thesis_label(&self) -> Option<&'static str> {
        match self {
            Self::UndergraduateThesis => Some("Monografia (Graduação)"),
            Self::MasterThesis => Some("Dissertação (Mestrado)"),
            Self::DoctoralThesis => Some("Tese (Doutorado)"),
            _ => None,
        }
    }

    pub const fn is_thesis(&self) -> bool {
        matches!(
            self,
            Self::UndergraduateThesis | Self::MasterThesis | Self::DoctoralThesis
        )
    }
}

/// Label shown for a record whose type is missing or unrecognized.
pub const GENERIC_TYPE_LABEL: &str = "Publicação";

/// Label for an optional type; records without a type get the generic label.
pub fn type_label(kind: Option<PublicationType>) -> &'static str {
    kind.map_or(GENERIC_TYPE_LABEL, |k| k.label())
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("Unknown publication type: {s}"))
    }
}

/// One author of a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub family_name: String,
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub given_name: String,
}

impl Author {
    pub fn new(family_name: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            given_name: given_name.into(),
        }
    }

    /// Surname with surrounding whitespace removed, if any.
    pub fn family(&self) -> Option<&str> {
        let trimmed = self.family_name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// `SURNAME, Given` form used by citations and free-text search.
    /// Authors without a surname have no citation name.
    pub fn citation_name(&self) -> Option<String> {
        self.family()
            .map(|family| format!("{}, {}", family.to_uppercase(), self.given_name.trim()))
    }
}

/// Journal or book a publication appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, deserialize_with = "serde_util::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub issue: Option<String>,
}

/// Publication date, place and publisher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imprint {
    #[serde(default, deserialize_with = "serde_util::year")]
    pub date: Option<i32>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub place: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    #[serde(default, deserialize_with = "serde_util::text")]
    pub url: Option<String>,
}

/// A bibliographic record from the `references` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default, deserialize_with = "serde_util::identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub subtitle: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "serde_util::publication_type")]
    pub kind: Option<PublicationType>,
    /// Explicit degree label overriding the thesis-type label.
    #[serde(default, deserialize_with = "serde_util::text")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "serde_util::list")]
    pub authors: Vec<Author>,
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub container: Container,
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub imprint: Imprint,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub page_range: Option<String>,
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub access: Access,
}

impl Publication {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: PublicationType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.imprint.date = Some(year);
        self
    }

    #[must_use]
    pub fn with_author(mut self, family_name: &str, given_name: &str) -> Self {
        self.authors.push(Author::new(family_name, given_name));
        self
    }

    #[must_use]
    pub fn with_container(mut self, title: &str) -> Self {
        self.container.title = Some(title.to_string());
        self
    }

    /// Kind used for citation dispatch; untyped records cite as articles.
    pub fn citation_kind(&self) -> PublicationType {
        self.kind.unwrap_or(PublicationType::ArticleJournal)
    }

    pub fn year(&self) -> Option<i32> {
        self.imprint.date
    }

    /// Year used by the year sorts; a missing date counts as 0.
    pub fn sort_year(&self) -> i32 {
        self.imprint.date.unwrap_or(0)
    }

    /// Year in the string form used by the year facet.
    pub fn year_facet_value(&self) -> String {
        self.imprint
            .date
            .map_or_else(|| NO_DATE_FACET.to_string(), |year| year.to_string())
    }

    /// Type identifier used by the type facet.
    pub fn type_facet_value(&self) -> Option<&'static str> {
        self.kind.map(|kind| kind.as_str())
    }

    pub fn type_label(&self) -> &'static str {
        type_label(self.kind)
    }

    pub fn first_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// Whether any author has exactly this surname.
    pub fn has_author(&self, family_name: &str) -> bool {
        self.authors.iter().any(|a| a.family_name == family_name)
    }
}
