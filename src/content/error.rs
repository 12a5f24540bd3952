//! Content repository error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::FrontMatterError;

/// Failures while loading content. Absence of content is not an error:
/// lookups return `None` and listings return an empty `Vec`.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed front-matter in `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

impl ContentError {
    /// Path of the file or directory that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            ContentError::Read { path, .. } | ContentError::Parse { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
