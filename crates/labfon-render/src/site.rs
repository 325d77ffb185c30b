//! Whole-site assembly: one renderer per section, all writing into one
//! page.

use tracing::{debug, info};

use labfon_model::{PublicationsDocument, SectionKey, SiteDocument};

use crate::clipboard::{Clipboard, ClipboardError};
use crate::page::Page;
use crate::prefs::SharedPreferences;
use crate::renderer::{RenderOutcome, ViewRenderer};
use crate::sections::{
    PartnershipsSection, PeopleSection, PublicationsSection, ResearchLinesSection,
};

pub const SITE_TITLE: &str = "Laboratório de Fonética";

pub const TEAM_REGION: &str = "equipe-container";
pub const RESEARCH_LINES_REGION: &str = "linhas-pesquisa-container";
pub const PARTNERSHIPS_REGION: &str = "parcerias-container";
pub const PUBLICATIONS_REGION: &str = "publicacoes-container";

/// Outcome of rendering a site document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    /// Sections that were present, with what their render did.
    pub rendered: Vec<(SectionKey, RenderOutcome)>,
    /// Recognized sections absent from the document.
    pub skipped: Vec<SectionKey>,
}

impl SiteReport {
    pub fn outcome(&self, key: SectionKey) -> Option<&RenderOutcome> {
        self.rendered
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, outcome)| outcome)
    }

    pub fn failures(&self) -> usize {
        self.rendered
            .iter()
            .filter(|(_, outcome)| matches!(outcome, RenderOutcome::Failed(_)))
            .count()
    }
}

pub struct Site {
    page: Page,
    team: ViewRenderer<PeopleSection>,
    research_lines: ViewRenderer<ResearchLinesSection>,
    partnerships: ViewRenderer<PartnershipsSection>,
    publications: ViewRenderer<PublicationsSection>,
}

impl Site {
    /// Builds the default page layout with one region per section.
    pub fn new(preferences: SharedPreferences) -> Self {
        let page = Page::new(SITE_TITLE)
            .with_region(TEAM_REGION, Some("Equipe"))
            .with_region(RESEARCH_LINES_REGION, Some("Linhas de Pesquisa"))
            .with_region(PUBLICATIONS_REGION, Some("Publicações"))
            .with_region(PARTNERSHIPS_REGION, Some("Parcerias"));
        Self::with_page(page, preferences)
    }

    /// Uses a caller-supplied page. Sections whose region is missing from
    /// `page` are skipped when rendered.
    pub fn with_page(page: Page, preferences: SharedPreferences) -> Self {
        Self {
            page,
            team: ViewRenderer::new(
                TEAM_REGION,
                PeopleSection::new(Box::new(preferences.clone())),
            ),
            research_lines: ViewRenderer::new(RESEARCH_LINES_REGION, ResearchLinesSection::new()),
            partnerships: ViewRenderer::new(PARTNERSHIPS_REGION, PartnershipsSection::new()),
            publications: ViewRenderer::new(
                PUBLICATIONS_REGION,
                PublicationsSection::new(Box::new(preferences)),
            ),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn team(&self) -> &ViewRenderer<PeopleSection> {
        &self.team
    }

    pub fn research_lines(&self) -> &ViewRenderer<ResearchLinesSection> {
        &self.research_lines
    }

    pub fn partnerships(&self) -> &ViewRenderer<PartnershipsSection> {
        &self.partnerships
    }

    pub fn publications(&self) -> &ViewRenderer<PublicationsSection> {
        &self.publications
    }

    /// Renders every recognized section present in `document`. Each section
    /// is independent: a failure in one leaves the others untouched.
    pub fn render(&mut self, document: &SiteDocument) -> SiteReport {
        let unknown = document.unknown_keys();
        if !unknown.is_empty() {
            debug!(keys = ?unknown, "ignoring unrecognized document keys");
        }

        let mut report = SiteReport::default();
        for key in SectionKey::all() {
            let Some(data) = document.section(*key) else {
                debug!(section = %key, "section absent from document, skipping");
                report.skipped.push(*key);
                continue;
            };
            let outcome = match key {
                SectionKey::Team => self.team.render(&mut self.page, Some(data)),
                SectionKey::ResearchLines => self.research_lines.render(&mut self.page, Some(data)),
                SectionKey::Partnerships => self.partnerships.render(&mut self.page, Some(data)),
            };
            report.rendered.push((*key, outcome));
        }
        self.page.set_data_loaded_at(document.loaded_at());
        info!(
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            failures = report.failures(),
            "site rendered"
        );
        report
    }

    /// Renders the publications region from its own document.
    pub fn render_publications(&mut self, document: &PublicationsDocument) -> RenderOutcome {
        self.publications
            .render(&mut self.page, document.references())
    }

    /// Applies a query or view change to the publications section and
    /// re-renders it.
    pub fn update_publications(
        &mut self,
        change: impl FnOnce(&mut PublicationsSection),
    ) -> RenderOutcome {
        self.publications.update(&mut self.page, change)
    }

    pub fn update_team(&mut self, change: impl FnOnce(&mut PeopleSection)) -> RenderOutcome {
        self.team.update(&mut self.page, change)
    }

    /// Copies the plain-text citation of publication `id`. Returns `None`
    /// when no such publication is loaded.
    pub fn copy_citation(
        &mut self,
        id: &str,
        clipboard: &mut dyn Clipboard,
    ) -> Option<Result<(), ClipboardError>> {
        let section = self.publications.template();
        let publication = section.find(id)?;
        Some(section.copy_citation(publication, clipboard, self.page.notifier_mut()))
    }

    /// Copies the BibTeX entry of publication `id`.
    pub fn export_bibtex(
        &mut self,
        id: &str,
        clipboard: &mut dyn Clipboard,
    ) -> Option<Result<(), ClipboardError>> {
        let section = self.publications.template();
        let publication = section.find(id)?;
        Some(section.export_bibtex(publication, clipboard, self.page.notifier_mut()))
    }
}
