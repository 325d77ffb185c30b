//! Research line records (`linhas_pesquisa`).

use serde::{Deserialize, Serialize};

use crate::serde_util;

pub const DEFAULT_ICON: &str = "fa-solid fa-flask";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchLine {
    #[serde(rename = "nome", default, deserialize_with = "serde_util::text")]
    pub name: Option<String>,
    #[serde(rename = "descricao", default, deserialize_with = "serde_util::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "serde_util::text")]
    pub icon: Option<String>,
    #[serde(rename = "estudantes", default, deserialize_with = "serde_util::count")]
    pub students: u32,
    #[serde(rename = "pesquisadores", default, deserialize_with = "serde_util::count")]
    pub researchers: u32,
    #[serde(rename = "ordem", default, deserialize_with = "serde_util::order")]
    pub order: i64,
}

impl ResearchLine {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            name: Some(name.into()),
            order,
            ..Self::default()
        }
    }

    /// Description to display. Placeholder descriptions (starting with `[`)
    /// are hidden.
    pub fn visible_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|description| !description.starts_with('['))
    }

    pub fn icon_class(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_description_is_hidden() {
        let mut line = ResearchLine::new("Prosódia", 1);
        line.description = Some("[Descrição a definir]".to_string());
        assert_eq!(line.visible_description(), None);
        line.description = Some("Estudos de entonação".to_string());
        assert_eq!(line.visible_description(), Some("Estudos de entonação"));
    }

    #[test]
    fn counts_accept_numeric_strings() {
        let line: ResearchLine =
            serde_json::from_str(r#"{"nome": "X", "estudantes": "3", "ordem": null}"#).unwrap();
        assert_eq!(line.students, 3);
        assert_eq!(line.researchers, 0);
        assert_eq!(line.order, 0);
    }
}
