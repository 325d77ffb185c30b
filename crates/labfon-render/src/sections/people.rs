//! Team section (`equipe`), grouped by category.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use labfon_citation::{HtmlSanitizer, Sanitizer};
use labfon_model::placeholders::NO_NAME;
use labfon_model::{TeamMember, category_rank};
use labfon_query::compare_pt_base;

use crate::announce::Announcer;
use crate::error::Result;
use crate::helpers::truncate;
use crate::markup::MarkupWriter;
use crate::prefs::PreferenceStore;
use crate::renderer::{Content, RenderOptions, SectionTemplate};

pub const VIEW_MODE_KEY: &str = "people-view-mode";

pub const PLACEHOLDER_AVATAR: &str = "assets/images/placeholder-avatar.jpg";

pub const BIO_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeopleViewMode {
    #[default]
    Grid,
    List,
    Card,
}

impl PeopleViewMode {
    pub const fn all() -> &'static [PeopleViewMode] {
        &[Self::Grid, Self::List, Self::Card]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for PeopleViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeopleViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| format!("Unknown view mode: {s}"))
    }
}

/// Members of one category, sorted by name.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub key: &'a str,
    pub members: Vec<&'a TeamMember>,
}

/// Groups members by category: known categories in their fixed order,
/// then unknown ones in first-seen order. Members are sorted by name,
/// ignoring case and accents. `members` itself is left untouched.
pub fn group_by_category(members: &[TeamMember]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for member in members {
        let key = member.category_key();
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.members.push(member),
            None => groups.push(CategoryGroup {
                key,
                members: vec![member],
            }),
        }
    }
    // Stable: unknown categories keep their first-seen order.
    groups.sort_by_key(|group| category_rank(group.key).unwrap_or(usize::MAX));
    for group in &mut groups {
        group
            .members
            .sort_by(|a, b| compare_pt_base(a.sort_name(), b.sort_name()));
    }
    groups
}

/// `Um pesquisador carregado` / `N pesquisadores carregados`.
pub fn loaded_announcement(count: usize) -> String {
    if count == 1 {
        "Um pesquisador carregado".to_string()
    } else {
        format!("{count} pesquisadores carregados")
    }
}

/// Template for the team region.
pub struct PeopleSection {
    members: Vec<TeamMember>,
    view_mode: PeopleViewMode,
    sanitizer: HtmlSanitizer,
    preferences: Box<dyn PreferenceStore>,
}

impl PeopleSection {
    pub fn new(preferences: Box<dyn PreferenceStore>) -> Self {
        let view_mode = preferences
            .get(VIEW_MODE_KEY)
            .and_then(|value| match value.parse() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    warn!("Ignoring stored view mode: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        Self {
            members: Vec::new(),
            view_mode,
            sanitizer: HtmlSanitizer::default(),
            preferences,
        }
    }

    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: HtmlSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn view_mode(&self) -> PeopleViewMode {
        self.view_mode
    }

    /// Switches and persists the view mode.
    pub fn set_view_mode(&mut self, mode: PeopleViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        if let Err(e) = self.preferences.set(VIEW_MODE_KEY, mode.as_str()) {
            warn!("Failed to persist people view mode: {}", e);
        }
    }

    fn write_group(&self, w: &mut MarkupWriter, group: &CategoryGroup<'_>) -> Result<()> {
        let id = format!("categoria-{}", group.key);
        let grid_class = format!("pesquisadores-grid view-{}", self.view_mode);
        w.open(
            "section",
            &[("id", id.as_str()), ("class", "categoria-section")],
        )?;
        w.open("div", &[("class", grid_class.as_str())])?;
        for member in &group.members {
            self.write_card(w, member)?;
        }
        w.close("div")?;
        w.close("section")
    }

    fn write_card(&self, w: &mut MarkupWriter, member: &TeamMember) -> Result<()> {
        let name = member
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_NAME);
        let aria = format!("Pesquisador: {name}");
        let photo = member.photo.as_deref().unwrap_or(PLACEHOLDER_AVATAR);
        let alt = format!("Foto de {name}");

        w.open(
            "article",
            &[
                ("class", "pesquisador-card"),
                ("role", "article"),
                ("aria-label", aria.as_str()),
            ],
        )?;
        w.open("figure", &[("class", "pesquisador-foto")])?;
        w.void(
            "img",
            &[("src", photo), ("alt", alt.as_str()), ("loading", "lazy")],
        )?;
        w.close("figure")?;

        w.open("div", &[("class", "pesquisador-content")])?;
        w.open("header", &[("class", "pesquisador-header")])?;
        w.text_element("h3", &[("class", "pesquisador-nome")], name)?;
        if let Some(role) = &member.role {
            w.text_element("span", &[("class", "pesquisador-cargo")], role)?;
        }
        if let Some(institution) = &member.institution {
            w.text_element("span", &[("class", "pesquisador-instituicao")], institution)?;
        }
        w.close("header")?;
        let bio = truncate(member.bio.as_deref().unwrap_or_default(), BIO_MAX_CHARS, "...");
        w.text_element("p", &[("class", "pesquisador-bio")], &bio)?;

        w.open("div", &[("class", "pesquisador-links")])?;
        if let Some(lattes) = member
            .lattes
            .as_deref()
            .and_then(|url| self.sanitizer.sanitize_url(url))
        {
            let label = format!("Currículo Lattes de {name}");
            w.text_element(
                "a",
                &[
                    ("href", lattes.as_str()),
                    ("target", "_blank"),
                    ("rel", "noopener noreferrer"),
                    ("class", "btn btn-secondary"),
                    ("aria-label", label.as_str()),
                ],
                "Currículo Lattes",
            )?;
        }
        if let Some(email) = &member.email {
            let href = format!("mailto:{email}");
            let label = format!("Email de {name}");
            w.text_element(
                "a",
                &[
                    ("href", href.as_str()),
                    ("class", "btn btn-secondary"),
                    ("aria-label", label.as_str()),
                ],
                "Email",
            )?;
        }
        w.close("div")?;
        w.close("div")?;
        w.close("article")
    }
}

impl SectionTemplate for PeopleSection {
    type Record = TeamMember;

    fn name(&self) -> &'static str {
        "equipe"
    }

    fn default_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_loading_message("Carregando pesquisadores...")
            .with_error_message("Erro ao carregar pesquisadores.")
            .with_empty_message("Nenhum pesquisador cadastrado.")
    }

    fn load(&mut self, records: Vec<TeamMember>) {
        self.members = records;
    }

    fn template(&self) -> Result<Content> {
        group_by_category(&self.members)
            .iter()
            .map(|group| {
                let mut w = MarkupWriter::new();
                self.write_group(&mut w, group)?;
                w.finish()
            })
            .collect::<Result<Vec<_>>>()
            .map(Content::Fragments)
    }

    fn after_render(&mut self, announcer: &mut Announcer) {
        announcer.announce(loaded_announcement(self.members.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<'a>(groups: &[CategoryGroup<'a>]) -> Vec<&'a str> {
        groups.iter().map(|group| group.key).collect()
    }

    #[test]
    fn known_categories_come_first_in_fixed_order() {
        let members = vec![
            TeamMember::new("Zé", "visitantes"),
            TeamMember::new("Bia", "graduacao"),
            TeamMember::new("Ana", "coordenacao"),
            TeamMember::new("Caio", "colaboradores"),
            TeamMember::new("Duda", "docentes"),
        ];
        let groups = group_by_category(&members);
        assert_eq!(
            keys(&groups),
            vec![
                "coordenacao",
                "docentes",
                "graduacao",
                "visitantes",
                "colaboradores"
            ]
        );
    }

    #[test]
    fn members_sorted_ignoring_accents_and_case() {
        let members = vec![
            TeamMember::new("Érica", "docentes"),
            TeamMember::new("bruno", "docentes"),
            TeamMember::new("Eduardo", "docentes"),
        ];
        let groups = group_by_category(&members);
        let names: Vec<&str> = groups[0].members.iter().map(|m| m.sort_name()).collect();
        assert_eq!(names, vec!["bruno", "Eduardo", "Érica"]);
        assert_eq!(members[0].sort_name(), "Érica");
    }

    #[test]
    fn missing_category_uses_default_group() {
        let members = vec![TeamMember {
            name: Some("Ana".into()),
            ..TeamMember::default()
        }];
        assert_eq!(keys(&group_by_category(&members)), vec!["outros"]);
    }

    #[test]
    fn announcement_pluralizes() {
        assert_eq!(loaded_announcement(1), "Um pesquisador carregado");
        assert_eq!(loaded_announcement(4), "4 pesquisadores carregados");
    }
}
