//! Research lines section (`linhas_pesquisa`).

use tracing::warn;

use labfon_model::ResearchLine;

use crate::error::Result;
use crate::markup::MarkupWriter;
use crate::renderer::{Content, RenderOptions, SectionTemplate};

#[derive(Debug, Clone, Default)]
pub struct ResearchLinesSection {
    lines: Vec<ResearchLine>,
}

impl ResearchLinesSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ResearchLine] {
        &self.lines
    }

    /// Named lines by ascending `ordem`; equal orders keep input order.
    pub fn ordered(&self) -> Vec<&ResearchLine> {
        let mut lines: Vec<&ResearchLine> = self
            .lines
            .iter()
            .filter(|line| {
                let named = line.name.as_deref().is_some_and(|name| !name.trim().is_empty());
                if !named {
                    warn!(order = line.order, "research line without a name, skipping");
                }
                named
            })
            .collect();
        lines.sort_by_key(|line| line.order);
        lines
    }
}

impl SectionTemplate for ResearchLinesSection {
    type Record = ResearchLine;

    fn name(&self) -> &'static str {
        "linhas_pesquisa"
    }

    fn default_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_loading_message("Carregando linhas de pesquisa...")
            .with_error_message("Erro ao carregar linhas de pesquisa.")
            .with_empty_message("Nenhuma linha de pesquisa cadastrada.")
    }

    fn load(&mut self, records: Vec<ResearchLine>) {
        self.lines = records;
    }

    fn template(&self) -> Result<Content> {
        let mut w = MarkupWriter::new();
        for line in self.ordered() {
            write_line(&mut w, line)?;
        }
        Ok(Content::Markup(w.finish()?))
    }
}

fn write_line(w: &mut MarkupWriter, line: &ResearchLine) -> Result<()> {
    w.open("div", &[("class", "research-line")])?;

    w.open("div", &[("class", "research-line-icon")])?;
    w.open("i", &[("class", line.icon_class()), ("aria-hidden", "true")])?;
    w.close("i")?;
    w.close("div")?;

    w.open("div", &[("class", "research-line-content")])?;
    w.open("div", &[("class", "research-line-header")])?;
    w.text_element(
        "h3",
        &[("class", "research-line-title")],
        line.name.as_deref().unwrap_or_default(),
    )?;
    w.close("div")?;
    if let Some(description) = line.visible_description() {
        w.text_element("p", &[("class", "research-line-description")], description)?;
    }
    w.close("div")?;

    w.open("div", &[("class", "research-line-stats")])?;
    write_stat(
        w,
        line.students,
        if line.students == 1 {
            "Estudante"
        } else {
            "Estudantes"
        },
    )?;
    write_stat(
        w,
        line.researchers,
        if line.researchers == 1 {
            "Pesquisador"
        } else {
            "Pesquisadores"
        },
    )?;
    w.close("div")?;

    w.close("div")
}

fn write_stat(w: &mut MarkupWriter, value: u32, label: &str) -> Result<()> {
    w.open("div", &[("class", "research-stat")])?;
    w.text_element("div", &[("class", "research-stat-number")], &value.to_string())?;
    w.text_element("div", &[("class", "research-stat-label")], label)?;
    w.close("div")
}
