use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by catalog and record operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The title was empty once whitespace was normalized.
    #[error("movie title cannot be empty")]
    EmptyTitle,

    /// The field separator cannot be stored inside a title or genre.
    #[error("'|' is not allowed in a movie title or genre")]
    Separator,

    /// Reading or writing a catalog file (or its directory) failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
