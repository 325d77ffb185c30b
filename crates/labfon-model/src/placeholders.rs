//! Placeholder tokens substituted for missing record fields.
//!
//! The codec and the query engine are total over the record shape: every
//! absent field resolves to one of these values instead of failing.

/// Display token for a publication without a date.
pub const NO_DATE: &str = "[sem data]";

/// Facet value used for the year of a publication without a date.
pub const NO_DATE_FACET: &str = "sem data";

/// Author list placeholder in full citations.
pub const NO_AUTHOR: &str = "[Autor não informado]";

/// First-author placeholder in short citations.
pub const NO_AUTHOR_SHORT: &str = "[Autor]";

pub const NO_TITLE: &str = "[Título não informado]";

pub const NO_JOURNAL: &str = "Revista não identificada";

pub const NO_BOOK: &str = "[Livro não identificado]";

/// "Sine loco" marker for a missing place of publication.
pub const NO_PLACE: &str = "[s.l.]";

/// "Sine nomine" marker for a missing publisher.
pub const NO_PUBLISHER: &str = "[s.n.]";

pub const NO_INSTITUTION: &str = "[Instituição não informada]";

pub const NO_NAME: &str = "Nome não informado";
