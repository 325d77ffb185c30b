//! Team member records (`equipe`).

use serde::{Deserialize, Serialize};

use crate::serde_util;

/// Category keys in display order. Unknown categories are rendered after
/// these, in the order they first appear.
pub const CATEGORY_ORDER: &[&str] = &[
    "coordenacao",
    "docentes",
    "pos_graduacao",
    "graduacao",
    "egressos",
];

/// Category assigned to members without one.
pub const DEFAULT_CATEGORY: &str = "outros";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "nome", default, deserialize_with = "serde_util::text")]
    pub name: Option<String>,
    #[serde(rename = "cargo", default, deserialize_with = "serde_util::text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub bio: Option<String>,
    /// Lattes curriculum URL.
    #[serde(default, deserialize_with = "serde_util::text")]
    pub lattes: Option<String>,
    #[serde(rename = "foto", default, deserialize_with = "serde_util::text")]
    pub photo: Option<String>,
    #[serde(rename = "categoria", default, deserialize_with = "serde_util::text")]
    pub category: Option<String>,
    #[serde(rename = "instituicao", default, deserialize_with = "serde_util::text")]
    pub institution: Option<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Name used for ordering; members without a name sort first.
    pub fn sort_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Position of a category in the fixed display order.
pub fn category_rank(key: &str) -> Option<usize> {
    CATEGORY_ORDER.iter().position(|candidate| *candidate == key)
}
