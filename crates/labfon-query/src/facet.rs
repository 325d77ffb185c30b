//! Facet filters and the facet index.
//!
//! The index is built from the full collection so the available options
//! never shrink as filters narrow the result.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use labfon_model::placeholders::NO_DATE_FACET;
use labfon_model::{Publication, PublicationType};

use crate::collation::compare_pt;

/// Wildcard value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Year,
    Type,
    Author,
}

impl Facet {
    pub const fn all() -> &'static [Facet] {
        &[Self::Year, Self::Type, Self::Author]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Type => "type",
            Self::Author => "author",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Year => "Ano",
            Self::Type => "Tipo",
            Self::Author => "Autor",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|facet| facet.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown facet: {s}"))
    }
}

/// Value selected for one facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FacetFilter {
    #[default]
    All,
    Value(String),
}

impl FacetFilter {
    pub fn value(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL {
            Self::All
        } else {
            Self::Value(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Value(value) => value,
        }
    }
}

impl From<&str> for FacetFilter {
    fn from(value: &str) -> Self {
        Self::value(value)
    }
}

impl fmt::Display for FacetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filter per declared facet. The set of facets is fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    year: FacetFilter,
    kind: FacetFilter,
    author: FacetFilter,
}

impl FacetFilters {
    pub fn get(&self, facet: Facet) -> &FacetFilter {
        match facet {
            Facet::Year => &self.year,
            Facet::Type => &self.kind,
            Facet::Author => &self.author,
        }
    }

    pub fn set(&mut self, facet: Facet, filter: FacetFilter) {
        match facet {
            Facet::Year => self.year = filter,
            Facet::Type => self.kind = filter,
            Facet::Author => self.author = filter,
        }
    }

    pub fn is_all(&self) -> bool {
        Facet::all().iter().all(|facet| self.get(*facet).is_all())
    }

    /// Facets with a constraint, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = (Facet, &str)> + '_ {
        Facet::all().iter().filter_map(|facet| match self.get(*facet) {
            FacetFilter::All => None,
            FacetFilter::Value(value) => Some((*facet, value.as_str())),
        })
    }

    /// Whether a record satisfies every active facet.
    pub fn matches(&self, publication: &Publication) -> bool {
        self.active()
            .all(|(facet, value)| facet_matches(facet, value, publication))
    }
}

fn facet_matches(facet: Facet, value: &str, publication: &Publication) -> bool {
    match facet {
        Facet::Year => publication.year_facet_value() == value,
        Facet::Type => publication.type_facet_value() == Some(value),
        Facet::Author => publication.has_author(value),
    }
}

/// An option offered for a facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Distinct facet values of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    years: Vec<String>,
    types: Vec<PublicationType>,
    authors: Vec<String>,
}

impl FacetIndex {
    pub fn build(records: &[Publication]) -> Self {
        let mut years = BTreeSet::new();
        let mut types = BTreeSet::new();
        let mut authors = BTreeSet::new();

        for publication in records {
            years.insert(publication.year());
            if let Some(kind) = publication.kind {
                types.insert(kind);
            }
            for author in &publication.authors {
                if !author.family_name.is_empty() {
                    authors.insert(author.family_name.clone());
                }
            }
        }

        // Newest first, undated last.
        let mut years: Vec<Option<i32>> = years.into_iter().collect();
        years.sort_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, None) => std::cmp::Ordering::Equal,
        });
        let years = years
            .into_iter()
            .map(|year| year.map_or_else(|| NO_DATE_FACET.to_string(), |y| y.to_string()))
            .collect();

        let mut types: Vec<PublicationType> = types.into_iter().collect();
        types.sort_by_key(PublicationType::as_str);

        let mut authors: Vec<String> = authors.into_iter().collect();
        authors.sort_by(|a, b| compare_pt(a, b));

        Self {
            years,
            types,
            authors,
        }
    }

    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn types(&self) -> &[PublicationType] {
        &self.types
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Options for a facet, in display order. Type options carry labels.
    pub fn options(&self, facet: Facet) -> Vec<FacetOption> {
        match facet {
            Facet::Year => plain_options(&self.years),
            Facet::Type => self
                .types
                .iter()
                .map(|kind| FacetOption {
                    value: kind.as_str().to_string(),
                    label: kind.label().to_string(),
                })
                .collect(),
            Facet::Author => plain_options(&self.authors),
        }
    }
}

fn plain_options(values: &[String]) -> Vec<FacetOption> {
    values
        .iter()
        .map(|value| FacetOption {
            value: value.clone(),
            label: value.clone(),
        })
        .collect()
}
