//! Input JSON documents.
//!
//! The site document maps section keys to arrays of records; the
//! publications document carries a `references` array. Both keep the raw
//! JSON for each section so the renderer can check its shape before
//! decoding records.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::publication::Publication;

/// Recognized top-level keys of the site document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Team,
    ResearchLines,
    Partnerships,
}

impl SectionKey {
    pub const fn all() -> &'static [SectionKey] {
        &[Self::Team, Self::ResearchLines, Self::Partnerships]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "equipe",
            Self::ResearchLines => "linhas_pesquisa",
            Self::Partnerships => "parcerias",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The site data document (`equipe`, `linhas_pesquisa`, `parcerias`).
#[derive(Debug, Clone)]
pub struct SiteDocument {
    sections: Map<String, Value>,
    loaded_at: DateTime<Utc>,
}

impl SiteDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(sections) = value else {
            return Err(ModelError::InvalidShape {
                section: "document".to_string(),
                expected: "object",
                found: json_kind(&value),
            });
        };
        debug!(keys = sections.len(), "loaded site document");
        Ok(Self {
            sections,
            loaded_at: Utc::now(),
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json_str(&read_document(path)?)
    }

    /// Raw JSON of a section. Absent and `null` sections both yield `None`.
    pub fn section(&self, key: SectionKey) -> Option<&Value> {
        self.sections.get(key.as_str()).filter(|value| !value.is_null())
    }

    /// Top-level keys that are not recognized sections.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.sections
            .keys()
            .map(String::as_str)
            .filter(|key| !SectionKey::all().iter().any(|s| s.as_str() == *key))
            .collect()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// The publications document (`{"references": [...]}`).
#[derive(Debug, Clone)]
pub struct PublicationsDocument {
    references: Option<Value>,
    loaded_at: DateTime<Utc>,
}

impl PublicationsDocument {
    pub const REFERENCES_KEY: &'static str = "references";

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(ModelError::InvalidShape {
                section: Self::REFERENCES_KEY.to_string(),
                expected: "object",
                found: json_kind(&value),
            });
        };
        let references = map.remove(Self::REFERENCES_KEY).filter(|v| !v.is_null());
        Ok(Self {
            references,
            loaded_at: Utc::now(),
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json_str(&read_document(path)?)
    }

    /// Raw `references` value, if present.
    pub fn references(&self) -> Option<&Value> {
        self.references.as_ref()
    }

    /// Decodes every publication. A missing `references` key yields an
    /// empty list.
    pub fn publications(&self) -> Result<Vec<Publication>> {
        match &self.references {
            Some(value) => decode_records(Self::REFERENCES_KEY, value),
            None => Ok(Vec::new()),
        }
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Decodes an array of records. A non-array value is an input-shape error.
pub fn decode_records<T: DeserializeOwned>(section: &str, value: &Value) -> Result<Vec<T>> {
    let Value::Array(items) = value else {
        return Err(ModelError::InvalidShape {
            section: section.to_string(),
            expected: "array",
            found: json_kind(value),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            <T as Deserialize>::deserialize(item).map_err(|error| ModelError::InvalidRecord {
                section: section.to_string(),
                index,
                message: error.to_string(),
            })
        })
        .collect()
}

/// JSON type name, for shape error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })
}
