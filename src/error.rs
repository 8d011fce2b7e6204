use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions for one generation run. Fetch failures and bad question
/// indices are not errors; they degrade the document instead.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("unknown book: {0:?}")]
    UnknownBook(String),

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid question number {item:?} in {input:?}")]
    InvalidSelection { input: String, item: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SheetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SheetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
