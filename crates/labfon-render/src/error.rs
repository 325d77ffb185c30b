use std::path::PathBuf;

use thiserror::Error;

use labfon_model::ModelError;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The section template failed while building content.
    #[error("template error: {0}")]
    Template(String),

    /// Writing markup failed.
    #[error("markup error: {0}")]
    Markup(String),

    /// Records could not be decoded from the input document.
    #[error(transparent)]
    Decode(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}
