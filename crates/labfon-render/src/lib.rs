//! Render lifecycle and section templates for the lab website.
//!
//! A [`Site`] owns one [`ViewRenderer`] per section and writes every
//! section into the regions of a [`Page`]. Each renderer wraps a
//! [`SectionTemplate`] with the `loading -> {error, empty, rendered}`
//! lifecycle, so a bad section degrades to an error state instead of
//! failing the page.

pub mod announce;
pub mod clipboard;
pub mod error;
pub mod helpers;
pub mod markup;
pub mod page;
pub mod prefs;
pub mod renderer;
pub mod sections;
pub mod site;

pub use announce::{Announcer, Notification, NotificationKind, Notifier};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use error::{PreferenceError, RenderError, Result};
pub use page::{LIVE_REGION_ID, NOTIFICATION_ID, Page, Region};
pub use prefs::{
    MemoryPreferences, PreferenceStore, SharedPreferences, TomlPreferenceStore, preferences_path,
};
pub use renderer::{
    Content, RenderGuard, RenderOptions, RenderOutcome, RenderStatus, SectionTemplate, SkipReason,
    ViewRenderer,
};
pub use sections::{
    PartnershipsSection, PeopleSection, PeopleViewMode, PublicationViewMode, PublicationsSection,
    ResearchLinesSection,
};
pub use site::{Site, SiteReport};
