//! Section templates, one per collection.

pub mod partnerships;
pub mod people;
pub mod publications;
pub mod research_lines;

pub use partnerships::PartnershipsSection;
pub use people::{PeopleSection, PeopleViewMode};
pub use publications::{PublicationViewMode, PublicationsSection};
pub use research_lines::ResearchLinesSection;
