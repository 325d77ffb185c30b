//! Render lifecycle for one display region.
//!
//! A [`ViewRenderer`] drives a [`SectionTemplate`] through
//! `idle -> loading -> {error, empty, rendered}`. Every call to
//! [`ViewRenderer::render`] restarts at `loading`. Template failures are
//! contained in the region; they are logged and shown as the error state,
//! never returned to the caller.
//!
//! # Re-entrancy
//!
//! Each renderer owns a [`RenderGuard`]. A render that finds the guard held
//! is dropped, not queued. The guard is released when the permit goes out of
//! scope, so every exit path (including early returns) frees it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use labfon_model::{decode_records, json_kind};

use crate::announce::Announcer;
use crate::error::{RenderError, Result};
use crate::markup::MarkupWriter;
use crate::page::Page;

pub const DEFAULT_LOADING_MESSAGE: &str = "Carregando...";
pub const DEFAULT_ERROR_MESSAGE: &str = "Erro ao carregar conteúdo.";
pub const DEFAULT_EMPTY_MESSAGE: &str = "Nenhum conteúdo disponível.";

/// Lifecycle state of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStatus {
    #[default]
    Idle,
    Loading,
    Error,
    Empty,
    Rendered,
}

impl RenderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Empty => "empty",
            Self::Rendered => "rendered",
        }
    }

    /// Whether the state only changes on the next render call.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error | Self::Empty | Self::Rendered)
    }
}

/// Single-slot render-in-progress flag.
#[derive(Debug, Clone, Default)]
pub struct RenderGuard {
    held: Arc<AtomicBool>,
}

impl RenderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the guard. Returns `None` if a render is already in progress.
    pub fn try_acquire(&self) -> Option<RenderPermit> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RenderPermit {
                held: Arc::clone(&self.held),
            })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Held while a render runs; releases the guard on drop.
#[derive(Debug)]
pub struct RenderPermit {
    held: Arc<AtomicBool>,
}

impl Drop for RenderPermit {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another render of this region was in progress.
    AlreadyRendering,
    /// The target region does not exist on the page.
    MissingRegion,
    /// `update` was called before any successful render.
    NotRendered,
}

/// What a render call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Skipped(SkipReason),
    Empty,
    Rendered,
    /// The region shows the error state; the detail is the failure message.
    Failed(String),
}

impl RenderOutcome {
    pub fn status(&self) -> Option<RenderStatus> {
        match self {
            Self::Skipped(_) => None,
            Self::Empty => Some(RenderStatus::Empty),
            Self::Rendered => Some(RenderStatus::Rendered),
            Self::Failed(_) => Some(RenderStatus::Error),
        }
    }
}

/// Messages for the loading, error and empty states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub loading_message: String,
    pub error_message: String,
    pub empty_message: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

/// Content produced by a template: one markup string or a list of
/// sibling fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Markup(String),
    Fragments(Vec<String>),
}

impl Content {
    pub fn into_markup(self) -> String {
        match self {
            Self::Markup(markup) => markup,
            Self::Fragments(fragments) => fragments.concat(),
        }
    }
}

/// A collection-specific template plugged into a [`ViewRenderer`].
///
/// Implementors decode their records from the section's JSON array, keep
/// whatever view state they need between renders, and turn that state into
/// markup. Only [`template`](Self::template) can fail; a failure becomes the
/// region's error state.
///
/// # Example
///
/// ```ignore
/// struct Names(Vec<String>);
///
/// impl SectionTemplate for Names {
///     type Record = String;
///
///     fn name(&self) -> &'static str {
///         "names"
///     }
///
///     fn load(&mut self, records: Vec<String>) {
///         self.0 = records;
///     }
///
///     fn template(&self) -> Result<Content> {
///         Ok(Content::Fragments(self.0.iter().map(|n| format!("<p>{n}</p>")).collect()))
///     }
/// }
/// ```
pub trait SectionTemplate {
    /// Record type decoded from each element of the input array.
    type Record: DeserializeOwned;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// State messages used when the renderer is built with
    /// [`ViewRenderer::new`].
    fn default_options(&self) -> RenderOptions {
        RenderOptions::default()
    }

    /// Replaces the template's records with a freshly decoded set.
    fn load(&mut self, records: Vec<Self::Record>);

    /// Builds the region content from the current state.
    fn template(&self) -> Result<Content>;

    /// Message for an empty state produced by the template's own
    /// filtering, as opposed to empty input. `None` means there is content
    /// to show.
    fn filtered_empty_message(&self) -> Option<String> {
        None
    }

    /// Called after content was installed, and after a filtered-empty
    /// state.
    fn after_render(&mut self, _announcer: &mut Announcer) {}
}

/// Drives one [`SectionTemplate`] into one page region.
#[derive(Debug)]
pub struct ViewRenderer<T> {
    region_id: String,
    template: T,
    options: RenderOptions,
    guard: RenderGuard,
    status: RenderStatus,
    loaded: bool,
}

impl<T: SectionTemplate> ViewRenderer<T> {
    pub fn new(region_id: impl Into<String>, template: T) -> Self {
        let options = template.default_options();
        Self::with_options(region_id, template, options)
    }

    pub fn with_options(region_id: impl Into<String>, template: T, options: RenderOptions) -> Self {
        Self {
            region_id: region_id.into(),
            template,
            options,
            guard: RenderGuard::new(),
            status: RenderStatus::Idle,
            loaded: false,
        }
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn guard(&self) -> &RenderGuard {
        &self.guard
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    /// Direct access to the template. Changes made here show up on the
    /// next render or [`refresh`](Self::refresh).
    pub fn template_mut(&mut self) -> &mut T {
        &mut self.template
    }

    /// Renders `data` into the region.
    ///
    /// `data` is the section's raw JSON value. Null, a missing value or an
    /// empty array shows the empty state without calling the template. A
    /// value that is not an array is logged and treated as empty. Empty input
    /// and undecodable records both drop the previously loaded records.
    pub fn render(&mut self, page: &mut Page, data: Option<&Value>) -> RenderOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!(region = %self.region_id, "render already in progress, skipping");
            return RenderOutcome::Skipped(SkipReason::AlreadyRendering);
        };
        if !page.has_region(&self.region_id) {
            debug!(region = %self.region_id, "target region not found, skipping");
            return RenderOutcome::Skipped(SkipReason::MissingRegion);
        }

        self.show_loading(page);

        let items = match data {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) if items.is_empty() => None,
            Some(value @ Value::Array(_)) => Some(value),
            Some(other) => {
                warn!(
                    region = %self.region_id,
                    section = self.template.name(),
                    found = json_kind(other),
                    "section data is not an array, treating as empty"
                );
                None
            }
        };
        let Some(items) = items else {
            self.unload();
            let message = self.options.empty_message.clone();
            return self.show_empty(page, &message);
        };

        let records = match decode_records::<T::Record>(self.template.name(), items) {
            Ok(records) => records,
            Err(e) => {
                self.unload();
                return self.show_error(page, &RenderError::from(e).to_string());
            }
        };
        let count = records.len();
        self.template.load(records);
        self.loaded = true;
        info!(
            region = %self.region_id,
            section = self.template.name(),
            records = count,
            "rendering section"
        );
        self.install(page)
    }

    /// Applies `change` to the template and re-renders from the records it
    /// already holds. Used for query and view-mode changes.
    pub fn update(&mut self, page: &mut Page, change: impl FnOnce(&mut T)) -> RenderOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!(region = %self.region_id, "render already in progress, skipping update");
            return RenderOutcome::Skipped(SkipReason::AlreadyRendering);
        };
        if !self.loaded {
            return RenderOutcome::Skipped(SkipReason::NotRendered);
        }
        if !page.has_region(&self.region_id) {
            return RenderOutcome::Skipped(SkipReason::MissingRegion);
        }
        change(&mut self.template);
        self.show_loading(page);
        self.install(page)
    }

    /// Re-renders the current template state.
    pub fn refresh(&mut self, page: &mut Page) -> RenderOutcome {
        self.update(page, |_| {})
    }

    fn unload(&mut self) {
        if self.loaded {
            self.template.load(Vec::new());
            self.loaded = false;
        }
    }

    fn install(&mut self, page: &mut Page) -> RenderOutcome {
        if let Some(message) = self.template.filtered_empty_message() {
            let outcome = self.show_empty(page, &message);
            self.template.after_render(page.announcer_mut());
            return outcome;
        }
        match self.template.template() {
            Ok(content) => {
                self.set(page, RenderStatus::Rendered, content.into_markup());
                self.template.after_render(page.announcer_mut());
                RenderOutcome::Rendered
            }
            Err(e) => self.show_error(page, &e.to_string()),
        }
    }

    fn set(&mut self, page: &mut Page, status: RenderStatus, content: String) {
        self.status = status;
        page.set_region(&self.region_id, status, content);
    }

    fn show_loading(&mut self, page: &mut Page) {
        let markup = state_markup(
            &[
                ("class", "loading"),
                ("role", "status"),
                ("aria-live", "polite"),
            ],
            &self.options.loading_message,
            None,
        );
        self.set(page, RenderStatus::Loading, markup);
    }

    fn show_empty(&mut self, page: &mut Page, message: &str) -> RenderOutcome {
        let markup = state_markup(&[("class", "empty")], message, None);
        self.set(page, RenderStatus::Empty, markup);
        RenderOutcome::Empty
    }

    fn show_error(&mut self, page: &mut Page, detail: &str) -> RenderOutcome {
        error!(
            region = %self.region_id,
            section = self.template.name(),
            error = detail,
            "failed to render section"
        );
        let markup = state_markup(
            &[("class", "error"), ("role", "alert")],
            &self.options.error_message,
            Some(detail),
        );
        self.set(page, RenderStatus::Error, markup);
        RenderOutcome::Failed(detail.to_string())
    }
}

/// `<div attrs><p>message</p>[<small>detail</small>]</div>`.
fn state_markup(attributes: &[(&str, &str)], message: &str, detail: Option<&str>) -> String {
    let build = || -> Result<String> {
        let mut w = MarkupWriter::new();
        w.open("div", attributes)?;
        w.text_element("p", &[], message)?;
        if let Some(detail) = detail {
            w.text_element("small", &[], detail)?;
        }
        w.close("div")?;
        w.finish()
    };
    build().unwrap_or_else(|e| {
        warn!(%e, "failed to build state markup");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_released_when_permit_drops() {
        let guard = RenderGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_held());
        assert!(guard.try_acquire().is_none());
        drop(permit);
        assert!(!guard.is_held());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn fragments_concatenate() {
        let content = Content::Fragments(vec!["<p>a</p>".into(), "<p>b</p>".into()]);
        assert_eq!(content.into_markup(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn state_markup_escapes_detail() {
        let markup = state_markup(&[("class", "error")], "Erro.", Some("bad <input>"));
        assert_eq!(
            markup,
            r#"<div class="error"><p>Erro.</p><small>bad &lt;input&gt;</small></div>"#
        );
    }
}
