//! Target regions and the HTML document they are assembled into.

use chrono::{DateTime, Utc};

use crate::announce::{Announcer, Notifier};
use crate::error::Result;
use crate::markup::MarkupWriter;
use crate::renderer::RenderStatus;

/// Id of the shared live-announcement region.
pub const LIVE_REGION_ID: &str = "aria-live-region";

/// Id of the transient notification element.
pub const NOTIFICATION_ID: &str = "pub-notification";

/// A uniquely identified display region.
#[derive(Debug, Clone)]
pub struct Region {
    id: String,
    heading: Option<String>,
    content: String,
    status: RenderStatus,
}

impl Region {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Current inner markup.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }
}

/// The set of regions renderers write into, plus the live region and the
/// notification slot.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    regions: Vec<Region>,
    announcer: Announcer,
    notifier: Notifier,
    data_loaded_at: Option<DateTime<Utc>>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            regions: Vec::new(),
            announcer: Announcer::default(),
            notifier: Notifier::default(),
            data_loaded_at: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, id: &str, heading: Option<&str>) -> Self {
        self.add_region(id, heading);
        self
    }

    /// Adds a region unless one with the same id exists.
    pub fn add_region(&mut self, id: &str, heading: Option<&str>) {
        if self.has_region(id) {
            return;
        }
        self.regions.push(Region {
            id: id.to_string(),
            heading: heading.map(str::to_string),
            content: String::new(),
            status: RenderStatus::Idle,
        });
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.region(id).is_some()
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Replaces a region's content. Returns `false` if the region does not
    /// exist.
    pub fn set_region(&mut self, id: &str, status: RenderStatus, content: String) -> bool {
        match self.regions.iter_mut().find(|region| region.id == id) {
            Some(region) => {
                region.status = status;
                region.content = content;
                true
            }
            None => false,
        }
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn announcer_mut(&mut self) -> &mut Announcer {
        &mut self.announcer
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn set_data_loaded_at(&mut self, loaded_at: DateTime<Utc>) {
        self.data_loaded_at = Some(loaded_at);
    }

    /// Renders the full HTML document.
    pub fn to_html(&self) -> Result<String> {
        let mut w = MarkupWriter::new();
        w.raw("<!DOCTYPE html>\n")?;
        w.open("html", &[("lang", "pt-BR")])?;
        w.open("head", &[])?;
        w.void("meta", &[("charset", "utf-8")])?;
        w.text_element("title", &[], &self.title)?;
        w.close("head")?;
        w.open("body", &[])?;
        w.text_element("h1", &[], &self.title)?;
        w.open("main", &[])?;
        for region in &self.regions {
            w.open(
                "section",
                &[("id", region.id.as_str()), ("data-status", region.status.as_str())],
            )?;
            if let Some(heading) = &region.heading {
                w.text_element("h2", &[], heading)?;
            }
            w.raw(&region.content)?;
            w.close("section")?;
        }
        w.close("main")?;

        w.text_element(
            "div",
            &[
                ("id", LIVE_REGION_ID),
                ("class", "sr-only"),
                ("role", "status"),
                ("aria-live", "polite"),
                ("aria-atomic", "true"),
            ],
            self.announcer.message().unwrap_or_default(),
        )?;
        if let Some(notification) = self.notifier.current() {
            let class = format!("notification notification-{}", notification.kind.as_str());
            w.text_element(
                "div",
                &[("id", NOTIFICATION_ID), ("class", class.as_str()), ("role", "alert")],
                &notification.message,
            )?;
        }
        if let Some(loaded_at) = self.data_loaded_at {
            let stamp = loaded_at.format("%Y-%m-%d %H:%M UTC").to_string();
            w.open("footer", &[])?;
            w.text_element("small", &[], &format!("Dados carregados em {stamp}"))?;
            w.close("footer")?;
        }
        w.close("body")?;
        w.close("html")?;
        w.finish()
    }
}
