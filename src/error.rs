use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encode error: {0}")]
    Encode(#[source] postcard::Error),

    #[error("Decode error in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: postcard::Error,
    },

    #[error("{} is not a save file", path.display())]
    BadMagic { path: PathBuf },

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl SaveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SaveError::Io { path: path.into(), source }
    }
}

pub type SaveResult<T> = Result<T, SaveError>;
