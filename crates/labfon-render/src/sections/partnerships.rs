//! Partnerships section (`parcerias`).

use tracing::debug;

use labfon_citation::{HtmlSanitizer, Sanitizer};
use labfon_model::Partnership;

use crate::announce::Announcer;
use crate::error::Result;
use crate::markup::MarkupWriter;
use crate::renderer::{Content, RenderOptions, SectionTemplate};

/// `1 parceria carregada` / `N parcerias carregadas`.
pub fn loaded_announcement(count: usize) -> String {
    if count == 1 {
        format!("{count} parceria carregada")
    } else {
        format!("{count} parcerias carregadas")
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartnershipsSection {
    partnerships: Vec<Partnership>,
    sanitizer: HtmlSanitizer,
}

impl PartnershipsSection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: HtmlSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn partnerships(&self) -> &[Partnership] {
        &self.partnerships
    }

    fn write_card(&self, w: &mut MarkupWriter, partnership: &Partnership) -> Result<()> {
        let mut attributes = vec![
            ("class", "parceria-card"),
            ("data-tipo", partnership.kind_key()),
        ];
        if let Some(label) = partnership.kind_label() {
            attributes.push(("data-tipo-label", label));
        }
        w.open("article", &attributes)?;

        w.open("div", &[("class", "parceria-header")])?;
        w.open("div", &[("class", "parceria-name-wrapper")])?;
        w.text_element("h3", &[("class", "parceria-nome")], &partnership.name)?;
        if !partnership.acronym.is_empty() {
            w.text_element("span", &[("class", "parceria-sigla")], &partnership.acronym)?;
        }
        w.close("div")?;
        if !partnership.location.is_empty() {
            w.open("p", &[("class", "parceria-localizacao")])?;
            w.open("i", &[("class", "fa-solid fa-location-dot"), ("aria-hidden", "true")])?;
            w.close("i")?;
            w.text(&format!(" {}", partnership.location))?;
            w.close("p")?;
        }
        w.close("div")?;

        if !partnership.description.is_empty() {
            w.text_element(
                "p",
                &[("class", "parceria-descricao")],
                &partnership.description,
            )?;
        }

        if !partnership.url.is_empty() {
            match self.sanitizer.sanitize_url(&partnership.url) {
                Some(url) => {
                    let label = format!("Visitar website de {}", partnership.name);
                    w.open("div", &[("class", "parceria-link-wrapper")])?;
                    w.open(
                        "a",
                        &[
                            ("class", "parceria-link"),
                            ("href", url.as_str()),
                            ("target", "_blank"),
                            ("rel", "noopener noreferrer"),
                            ("aria-label", label.as_str()),
                        ],
                    )?;
                    w.text("Visitar website ")?;
                    w.open(
                        "i",
                        &[
                            ("class", "fa-solid fa-arrow-up-right-from-square"),
                            ("aria-hidden", "true"),
                        ],
                    )?;
                    w.close("i")?;
                    w.close("a")?;
                    w.close("div")?;
                }
                None => debug!(name = %partnership.name, "partnership url rejected, omitting link"),
            }
        }

        w.close("article")
    }
}

impl SectionTemplate for PartnershipsSection {
    type Record = Partnership;

    fn name(&self) -> &'static str {
        "parcerias"
    }

    fn default_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_loading_message("Carregando parcerias...")
            .with_error_message("Erro ao carregar parcerias.")
            .with_empty_message("Nenhuma parceria cadastrada.")
    }

    fn load(&mut self, records: Vec<Partnership>) {
        self.partnerships = records;
    }

    fn template(&self) -> Result<Content> {
        let mut fragments = Vec::with_capacity(self.partnerships.len());
        for partnership in &self.partnerships {
            let mut w = MarkupWriter::new();
            self.write_card(&mut w, partnership)?;
            fragments.push(w.finish()?);
        }
        Ok(Content::Fragments(fragments))
    }

    fn after_render(&mut self, announcer: &mut Announcer) {
        announcer.announce(loaded_announcement(self.partnerships.len()));
    }
}
