//! Publications listing: search, facets, sort, pagination and citation
//! actions.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error, warn};

use labfon_citation::{CitationFormatter, Sanitizer, to_bibtex, to_plain_text};
use labfon_model::Publication;
use labfon_query::{
    DEFAULT_ITEMS_PER_PAGE, Facet, FacetFilter, FacetOption, FilterKind, PageMarker,
    PublicationCatalog, SortKey,
};

use crate::announce::{Announcer, NotificationKind, Notifier};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::error::Result;
use crate::markup::MarkupWriter;
use crate::prefs::PreferenceStore;
use crate::renderer::{Content, RenderOptions, SectionTemplate};

pub const VIEW_MODE_KEY: &str = "publications-view-mode";
pub const ITEMS_PER_PAGE_KEY: &str = "publications-items-per-page";

pub const FILTERED_EMPTY_MESSAGE: &str =
    "Nenhuma publicação encontrada com os filtros selecionados.";

const SEARCH_PLACEHOLDER: &str = "Buscar por título, autor, palavra-chave...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PublicationViewMode {
    Compact,
    #[default]
    Detailed,
}

impl PublicationViewMode {
    pub const fn all() -> &'static [PublicationViewMode] {
        &[Self::Compact, Self::Detailed]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Detailed => "detailed",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compact => "Visualização compacta",
            Self::Detailed => "Visualização detalhada",
        }
    }

    const fn icon(&self) -> &'static str {
        match self {
            Self::Compact => "≡",
            Self::Detailed => "▤",
        }
    }

    /// Live-region message for switching to this mode.
    pub fn announcement(&self) -> String {
        format!("{} ativada", self.label())
    }
}

impl fmt::Display for PublicationViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationViewMode {
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

/// `Nenhuma publicação encontrada` / `Uma publicação encontrada` /
/// `N publicações encontradas`.
pub fn results_announcement(count: usize) -> String {
    match count {
        0 => "Nenhuma publicação encontrada".to_string(),
        1 => "Uma publicação encontrada".to_string(),
        n => format!("{n} publicações encontradas"),
    }
}

/// Template for the publications region.
///
/// Holds the catalog (query and page state), the view mode and the
/// preference store the mode and page size are persisted to.
pub struct PublicationsSection {
    catalog: PublicationCatalog,
    view_mode: PublicationViewMode,
    formatter: CitationFormatter,
    preferences: Box<dyn PreferenceStore>,
    pending_announcement: Option<String>,
}

impl PublicationsSection {
    /// Reads the view mode and page size from `preferences`. Invalid stored
    /// values fall back to the defaults.
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
        let items_per_page = preferences
            .get(ITEMS_PER_PAGE_KEY)
            .and_then(|value| parse_items_per_page(&value))
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);
        Self {
            catalog: PublicationCatalog::new(Vec::new(), items_per_page),
            view_mode,
            formatter: CitationFormatter::default(),
            preferences,
            pending_announcement: None,
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: CitationFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn catalog(&self) -> &PublicationCatalog {
        &self.catalog
    }

    pub fn view_mode(&self) -> PublicationViewMode {
        self.view_mode
    }

    pub fn find(&self, id: &str) -> Option<&Publication> {
        self.catalog.records().iter().find(|p| p.id == id)
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.catalog.set_search_text(text);
    }

    pub fn set_facet(&mut self, facet: Facet, filter: FacetFilter) {
        self.catalog.set_facet(facet, filter);
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.catalog.set_sort_key(sort_key);
    }

    pub fn reset_filters(&mut self) {
        self.catalog.reset_filters();
    }

    pub fn remove_filter(&mut self, kind: FilterKind) {
        self.catalog.remove_filter(kind);
    }

    pub fn set_page(&mut self, page: usize) {
        self.catalog.set_page(page);
    }

    /// Changes and persists the page size. Zero is ignored.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        if items_per_page == 0 {
            return;
        }
        self.catalog.set_items_per_page(items_per_page);
        self.persist(ITEMS_PER_PAGE_KEY, &items_per_page.to_string());
    }

    /// Switches and persists the view mode. Switching to the current mode
    /// does nothing.
    pub fn set_view_mode(&mut self, mode: PublicationViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.persist(VIEW_MODE_KEY, mode.as_str());
        self.pending_announcement = Some(mode.announcement());
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.preferences.set(key, value) {
            warn!(key, "Failed to persist preference: {}", e);
        }
    }

    /// Copies the plain-text citation to `clipboard` and reports the result
    /// through `notifier`.
    pub fn copy_citation(
        &self,
        publication: &Publication,
        clipboard: &mut dyn Clipboard,
        notifier: &mut Notifier,
    ) -> std::result::Result<(), ClipboardError> {
        let citation = to_plain_text(&self.formatter.full(publication));
        write_with_notification(
            clipboard,
            notifier,
            &citation,
            "Citação copiada!",
            "Erro ao copiar citação",
        )
    }

    /// Copies the BibTeX entry to `clipboard` and reports the result through
    /// `notifier`.
    pub fn export_bibtex(
        &self,
        publication: &Publication,
        clipboard: &mut dyn Clipboard,
        notifier: &mut Notifier,
    ) -> std::result::Result<(), ClipboardError> {
        write_with_notification(
            clipboard,
            notifier,
            &to_bibtex(publication),
            "BibTeX copiado!",
            "Erro ao copiar BibTeX",
        )
    }

    fn write_controls(&self, w: &mut MarkupWriter) -> Result<()> {
        let query = self.catalog.query();
        w.open("div", &[("class", "publications-controls")])?;

        w.open("div", &[("class", "controls-row controls-top")])?;
        w.open("div", &[("class", "search-container")])?;
        w.void(
            "input",
            &[
                ("type", "search"),
                ("id", "pub-search"),
                ("class", "search-input"),
                ("placeholder", SEARCH_PLACEHOLDER),
                ("aria-label", "Buscar publicações"),
                ("value", query.search_text()),
            ],
        )?;
        w.close("div")?;
        self.write_view_toggle(w)?;
        w.close("div")?;

        w.open("div", &[("class", "controls-row controls-bottom")])?;
        let facets = self.catalog.facets();
        for facet in Facet::all() {
            let id = format!("pub-filter-{}", facet.as_str());
            write_select(
                w,
                &id,
                facet.label(),
                &format!("Filtrar por {}", facet.label().to_lowercase()),
                Some("Todos"),
                &facets.options(*facet),
                query.facet(*facet).as_str(),
            )?;
        }
        let sort_options: Vec<FacetOption> = SortKey::all()
            .iter()
            .map(|key| FacetOption {
                value: key.as_str().to_string(),
                label: key.label().to_string(),
            })
            .collect();
        write_select(
            w,
            "pub-sort",
            "Ordenar",
            "Ordenar publicações",
            None,
            &sort_options,
            query.sort_key().as_str(),
        )?;
        w.close("div")?;

        w.open(
            "div",
            &[
                ("id", "active-filters"),
                ("class", "active-filters"),
                ("aria-live", "polite"),
            ],
        )?;
        for filter in self.catalog.active_filters() {
            let text = filter.text();
            let remove_label = format!("Remover filtro {text}");
            let target = match filter.kind {
                FilterKind::Search => "search",
                FilterKind::Facet(facet) => facet.as_str(),
            };
            w.open("span", &[("class", "filter-badge")])?;
            w.text(&text)?;
            w.text_element(
                "button",
                &[
                    ("type", "button"),
                    ("class", "filter-badge-remove"),
                    ("data-filter", target),
                    ("aria-label", remove_label.as_str()),
                ],
                "×",
            )?;
            w.close("span")?;
        }
        w.close("div")?;

        w.close("div")
    }

    fn write_view_toggle(&self, w: &mut MarkupWriter) -> Result<()> {
        w.open(
            "div",
            &[
                ("class", "view-toggle"),
                ("role", "group"),
                ("aria-label", "Modo de visualização"),
            ],
        )?;
        for mode in PublicationViewMode::all() {
            let active = *mode == self.view_mode;
            let class = if active {
                "view-toggle-btn active"
            } else {
                "view-toggle-btn"
            };
            w.open(
                "button",
                &[
                    ("type", "button"),
                    ("class", class),
                    ("data-view", mode.as_str()),
                    ("aria-label", mode.label()),
                    ("aria-pressed", if active { "true" } else { "false" }),
                    ("title", mode.label()),
                ],
            )?;
            w.text_element("span", &[("class", "icon")], mode.icon())?;
            w.close("button")?;
        }
        w.close("div")
    }

    fn write_statistics(&self, w: &mut MarkupWriter) -> Result<()> {
        let stats = self.catalog.statistics();
        w.open(
            "div",
            &[
                ("id", "pub-statistics"),
                ("class", "statistics-panel"),
                ("aria-live", "polite"),
            ],
        )?;
        w.text_element("span", &[("class", "stat-item")], &stats.headline())?;
        if let Some(breakdown) = stats.breakdown_text() {
            w.text_element("span", &[("class", "stat-breakdown")], &breakdown)?;
        }
        w.close("div")
    }

    fn write_listing(&self, w: &mut MarkupWriter) -> Result<()> {
        let class = format!("publications-container view-{}", self.view_mode);
        w.open(
            "div",
            &[("id", "publications-container"), ("class", class.as_str())],
        )?;
        let offset = self.catalog.window().start;
        match self.catalog.year_groups() {
            Some(groups) => {
                let mut index = offset;
                for group in groups {
                    w.open("section", &[("class", "year-group")])?;
                    w.text_element("h3", &[("class", "year-heading")], &group.label)?;
                    for publication in group.items {
                        self.write_card(w, publication, index)?;
                        index += 1;
                    }
                    w.close("section")?;
                }
            }
            None => {
                for (i, publication) in self.catalog.visible().into_iter().enumerate() {
                    self.write_card(w, publication, offset + i)?;
                }
            }
        }
        w.close("div")
    }

    fn write_card(
        &self,
        w: &mut MarkupWriter,
        publication: &Publication,
        index: usize,
    ) -> Result<()> {
        let index = index.to_string();
        w.open(
            "article",
            &[
                ("class", "publication-card"),
                ("role", "article"),
                ("data-pub-id", publication.id.as_str()),
                ("data-index", index.as_str()),
            ],
        )?;
        let url = publication
            .access
            .url
            .as_deref()
            .and_then(|url| self.formatter.sanitizer().sanitize_url(url));
        match self.view_mode {
            PublicationViewMode::Compact => {
                w.open("div", &[("class", "pub-compact-content")])?;
                w.text_element("span", &[("class", "pub-type-badge")], publication.type_label())?;
                w.raw_element(
                    "p",
                    &[("class", "pub-citation")],
                    &self.formatter.short(publication),
                )?;
                w.close("div")?;
                w.open("div", &[("class", "pub-actions")])?;
                if let Some(url) = &url {
                    w.text_element(
                        "a",
                        &[
                            ("href", url.as_str()),
                            ("target", "_blank"),
                            ("rel", "noopener noreferrer"),
                            ("class", "btn-icon"),
                            ("aria-label", "Acessar publicação"),
                            ("title", "Acessar publicação"),
                        ],
                        "🔗",
                    )?;
                }
                write_action(w, "btn-icon btn-copy", "Copiar citação", "📋")?;
                w.close("div")?;
            }
            PublicationViewMode::Detailed => {
                w.open("div", &[("class", "pub-header")])?;
                w.text_element("span", &[("class", "pub-type-badge")], publication.type_label())?;
                w.open("div", &[("class", "pub-actions")])?;
                if let Some(url) = &url {
                    w.text_element(
                        "a",
                        &[
                            ("href", url.as_str()),
                            ("target", "_blank"),
                            ("rel", "noopener noreferrer"),
                            ("class", "btn btn-sm"),
                            ("aria-label", "Acessar publicação"),
                        ],
                        "Acessar",
                    )?;
                }
                write_action(w, "btn btn-sm btn-copy", "Copiar citação", "Copiar citação")?;
                write_action(w, "btn btn-sm btn-bibtex", "Exportar BibTeX", "BibTeX")?;
                w.close("div")?;
                w.close("div")?;
                w.open("div", &[("class", "pub-content")])?;
                w.raw_element(
                    "p",
                    &[("class", "pub-citation")],
                    &self.formatter.full(publication),
                )?;
                if let Some(subtitle) = &publication.subtitle {
                    w.text_element("p", &[("class", "pub-subtitle")], subtitle)?;
                }
                w.close("div")?;
            }
        }
        w.close("article")
    }

    fn write_pagination(&self, w: &mut MarkupWriter) -> Result<()> {
        let window = self.catalog.window();
        if window.total_pages <= 1 {
            return Ok(());
        }
        w.open(
            "nav",
            &[("class", "pagination"), ("aria-label", "Paginação de publicações")],
        )?;
        if window.has_previous() {
            let previous = (window.current_page - 1).to_string();
            write_page_button(w, &previous, "Página anterior", "‹")?;
        }
        for marker in window.page_numbers() {
            match marker {
                PageMarker::Page(number) => {
                    let label = format!("Página {number}");
                    let number = number.to_string();
                    if marker == PageMarker::Page(window.current_page) {
                        w.text_element(
                            "span",
                            &[
                                ("class", "page-current"),
                                ("aria-current", "page"),
                                ("aria-label", label.as_str()),
                            ],
                            &number,
                        )?;
                    } else {
                        write_page_button(w, &number, &label, &number)?;
                    }
                }
                PageMarker::Ellipsis => {
                    w.text_element(
                        "span",
                        &[("class", "page-ellipsis"), ("aria-hidden", "true")],
                        "…",
                    )?;
                }
            }
        }
        if window.has_next() {
            let next = (window.current_page + 1).to_string();
            write_page_button(w, &next, "Próxima página", "›")?;
        }
        w.close("nav")
    }
}

impl SectionTemplate for PublicationsSection {
    type Record = Publication;

    fn name(&self) -> &'static str {
        "publications"
    }

    fn default_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_loading_message("Carregando publicações...")
            .with_error_message("Erro ao carregar publicações.")
            .with_empty_message("Nenhuma publicação cadastrada.")
    }

    fn load(&mut self, records: Vec<Publication>) {
        debug!(records = records.len(), "loading publications");
        self.catalog.replace_records(records);
    }

    fn template(&self) -> Result<Content> {
        let writers: [fn(&Self, &mut MarkupWriter) -> Result<()>; 4] = [
            Self::write_controls,
            Self::write_statistics,
            Self::write_listing,
            Self::write_pagination,
        ];
        let mut fragments = Vec::with_capacity(writers.len());
        for write in writers {
            let mut w = MarkupWriter::new();
            write(self, &mut w)?;
            fragments.push(w.finish()?);
        }
        Ok(Content::Fragments(fragments))
    }

    fn filtered_empty_message(&self) -> Option<String> {
        (self.catalog.result_count() == 0).then(|| FILTERED_EMPTY_MESSAGE.to_string())
    }

    fn after_render(&mut self, announcer: &mut Announcer) {
        let message = self
            .pending_announcement
            .take()
            .unwrap_or_else(|| results_announcement(self.catalog.result_count()));
        announcer.announce(message);
    }
}

fn parse_items_per_page(value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!(value, "Ignoring stored items per page");
            None
        }
    }
}

fn write_with_notification(
    clipboard: &mut dyn Clipboard,
    notifier: &mut Notifier,
    text: &str,
    success: &str,
    failure: &str,
) -> std::result::Result<(), ClipboardError> {
    match clipboard.write_text(text) {
        Ok(()) => {
            notifier.notify(NotificationKind::Success, success);
            Ok(())
        }
        Err(e) => {
            error!("Clipboard write failed: {}", e);
            notifier.notify(NotificationKind::Error, failure);
            Err(e)
        }
    }
}

fn write_select(
    w: &mut MarkupWriter,
    id: &str,
    label: &str,
    aria_label: &str,
    all_label: Option<&str>,
    options: &[FacetOption],
    selected: &str,
) -> Result<()> {
    w.open("div", &[("class", "filter-group")])?;
    w.text_element("label", &[("for", id), ("class", "filter-label")], label)?;
    w.open(
        "select",
        &[("id", id), ("class", "filter-select"), ("aria-label", aria_label)],
    )?;
    if let Some(all_label) = all_label {
        write_option(w, labfon_query::facet::ALL, all_label, selected)?;
    }
    for option in options {
        write_option(w, &option.value, &option.label, selected)?;
    }
    w.close("select")?;
    w.close("div")
}

fn write_option(w: &mut MarkupWriter, value: &str, label: &str, selected: &str) -> Result<()> {
    if value == selected {
        w.text_element("option", &[("value", value), ("selected", "selected")], label)
    } else {
        w.text_element("option", &[("value", value)], label)
    }
}

fn write_action(w: &mut MarkupWriter, class: &str, aria_label: &str, text: &str) -> Result<()> {
    w.text_element(
        "button",
        &[("type", "button"), ("class", class), ("aria-label", aria_label)],
        text,
    )
}

fn write_page_button(w: &mut MarkupWriter, page: &str, aria_label: &str, text: &str) -> Result<()> {
    w.text_element(
        "button",
        &[
            ("type", "button"),
            ("class", "page-btn"),
            ("data-page", page),
            ("aria-label", aria_label),
        ],
        text,
    )
}
