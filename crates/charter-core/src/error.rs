//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("failed parsing version from ref '{reference}': {source}")]
    VersionParse {
        reference: String,
        source: semver::Error,
    },

    #[error("failed decoding config document: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("failed rendering config field '{field}': {source}")]
    Interpolation {
        field: &'static str,
        source: tera::Error,
    },

    #[error("port number out of range in '{token}'")]
    PortOverflow { token: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
