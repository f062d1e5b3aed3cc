//! Failures that abort a conversion.

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The archive is missing, unreadable, or not a ZIP file.
    #[error("cannot open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("unable to find {entry} in archive {}", archive.display())]
    EntryNotFound { entry: String, archive: PathBuf },

    #[error("cannot extract {entry}: {source}")]
    Extract {
        entry: String,
        #[source]
        source: BoxError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deployment descriptor: {0}")]
    MalformedDescriptor(String),

    /// The descriptor parsed but holds no name/value-pair group to export.
    #[error("deployment descriptor has no NameValuePairs group")]
    MissingNameValuePairs,
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
