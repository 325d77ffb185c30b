//! Institutional partnership records (`parcerias`).

use serde::{Deserialize, Serialize};

use crate::serde_util;

/// Type assigned to partnerships without a `tipo`.
pub const DEFAULT_PARTNERSHIP_TYPE: &str = "parceria";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    #[serde(rename = "nome", default, deserialize_with = "serde_util::lenient")]
    pub name: String,
    /// Acronym.
    #[serde(rename = "sigla", default, deserialize_with = "serde_util::lenient")]
    pub acronym: String,
    #[serde(rename = "localizacao", default, deserialize_with = "serde_util::lenient")]
    pub location: String,
    #[serde(rename = "tipo", default, deserialize_with = "serde_util::lenient")]
    pub kind: String,
    #[serde(rename = "descricao", default, deserialize_with = "serde_util::lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "serde_util::lenient")]
    pub url: String,
}

impl Partnership {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn kind_key(&self) -> &str {
        let kind = self.kind.trim();
        if kind.is_empty() {
            DEFAULT_PARTNERSHIP_TYPE
        } else {
            kind
        }
    }

    /// Display label for the known partnership types.
    pub fn kind_label(&self) -> Option<&'static str> {
        match self.kind_key() {
            "universidade" => Some("Instituição de Ensino"),
            "agencia-fomento" => Some("Agência de Fomento"),
            "internacional" => Some("Parceria Internacional"),
            _ => None,
        }
    }
}
