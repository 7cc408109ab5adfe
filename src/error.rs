//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, rendering, or configuring a table of contents.
#[derive(Debug, Error)]
pub enum TocError {
    /// A heading event carried a level the builder cannot place.
    #[error("invalid heading level {level} for \"{title}\"")]
    InvalidLevel { level: usize, title: String },

    /// The item/level template set is unusable.
    #[error("invalid template: {0}")]
    Template(String),

    /// A numeric or structural option is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// An explicitly requested config file could not be parsed.
    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TocError>;
