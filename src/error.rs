//! Error types shared by the classifier, the icon loader and the writer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Name or command line missing, or a name that would escape the
    /// launcher directory.
    #[error("{0}")]
    Validation(String),

    #[error("{message} ({path}): {source}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not load image {path}: {source}")]
    IconDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Only produced while sniffing content; the classifier recovers from it.
    #[error("could not read {path} for content sniffing: {source}")]
    ClassificationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }
}
