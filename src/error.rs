use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while packing or loading a dataset.
///
/// Only [`DatasetError::Decode`] is recovered from (the builder skips the
/// image); every other variant is fatal to the run.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Bad arguments or an unusable directory layout.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The image file could not be read or decoded.
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is truncated or its sections disagree.
    #[error("malformed dataset file: {0}")]
    Format(String),

    #[error("invalid parameter: {0}")]
    Validation(String),
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
