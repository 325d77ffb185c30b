//! HTML fragment writer on top of `quick_xml`.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{RenderError, Result};

/// Writes an HTML fragment into memory. Text is escaped; `raw` content is
/// trusted markup (already sanitized).
pub struct MarkupWriter {
    writer: Writer<Vec<u8>>,
}

impl Default for MarkupWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| RenderError::Markup(e.to_string()))
    }

    pub fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(start(name, attributes)))
    }

    pub fn close(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Void element such as `<img>`.
    pub fn void(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(start(name, attributes)))
    }

    pub fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    pub fn raw(&mut self, markup: &str) -> Result<()> {
        self.write(Event::Text(BytesText::from_escaped(markup)))
    }

    /// `<name attrs>text</name>`.
    pub fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attributes)?;
        self.text(text)?;
        self.close(name)
    }

    /// `<name attrs>markup</name>` with trusted inner markup.
    pub fn raw_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        markup: &str,
    ) -> Result<()> {
        self.open(name, attributes)?;
        self.raw(markup)?;
        self.close(name)
    }

    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| RenderError::Markup(e.to_string()))
    }
}

fn start<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_elements() {
        let mut writer = MarkupWriter::new();
        writer.open("div", &[("class", "card")]).unwrap();
        writer.text_element("h3", &[], "Ana & Bia").unwrap();
        writer.void("img", &[("src", "a.jpg"), ("alt", "Foto")]).unwrap();
        writer.raw_element("p", &[], "<em>x</em>").unwrap();
        writer.close("div").unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            r#"<div class="card"><h3>Ana &amp; Bia</h3><img src="a.jpg" alt="Foto"/><p><em>x</em></p></div>"#
        );
    }

    #[test]
    fn text_is_escaped() {
        let mut writer = MarkupWriter::new();
        writer.text("<script>").unwrap();
        assert_eq!(writer.finish().unwrap(), "&lt;script&gt;");
    }
}
