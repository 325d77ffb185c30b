//! Record types and input documents for the lab website.

pub mod document;
pub mod error;
pub mod partnership;
pub mod placeholders;
pub mod publication;
pub mod research_line;
mod serde_util;
pub mod team;

pub use document::{PublicationsDocument, SectionKey, SiteDocument, decode_records, json_kind};
pub use error::{ModelError, Result};
pub use partnership::Partnership;
pub use publication::{
    Access, Author, Container, GENERIC_TYPE_LABEL, Imprint, Publication, PublicationType,
    type_label,
};
pub use research_line::ResearchLine;
pub use team::{CATEGORY_ORDER, TeamMember, category_rank};
