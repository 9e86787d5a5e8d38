use crate::normalizer::EolStats;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while fixing one file.
///
/// Only [`FixError::Open`] aborts a run; everything else is reported against the file
/// and processing moves on to the next path.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("{}: {}", path.display(), os_reason(source))]
    Open { path: PathBuf, source: io::Error },

    #[error("{}: {}", path.display(), os_reason(source))]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: cannot create temporary file: {}", path.display(), os_reason(source))]
    TempFile { path: PathBuf, source: io::Error },

    #[error("{}: {}", path.display(), os_reason(source))]
    Normalize { path: PathBuf, source: io::Error },

    /// Normalization finished but the result could not be written back
    #[error("{}: {}", path.display(), os_reason(source))]
    Commit {
        path: PathBuf,
        stats: EolStats,
        source: io::Error,
    },
}

/// System error text without the `(os error N)` suffix std appends, as `perror` prints it
fn os_reason(err: &io::Error) -> String {
    let text = err.to_string();
    match err.raw_os_error() {
        Some(code) => text
            .strip_suffix(&format!(" (os error {code})"))
            .unwrap_or(&text)
            .to_string(),
        None => text,
    }
}

impl FixError {
    /// Whether this error ends the whole run rather than just this file
    pub fn is_fatal(&self) -> bool {
        matches!(self, FixError::Open { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            FixError::Open { path, .. }
            | FixError::Read { path, .. }
            | FixError::TempFile { path, .. }
            | FixError::Normalize { path, .. }
            | FixError::Commit { path, .. } => path,
        }
    }

    /// Statistics gathered before the failure, if normalization completed
    pub fn stats(&self) -> Option<EolStats> {
        match self {
            FixError::Commit { stats, .. } => Some(*stats),
            _ => None,
        }
    }
}
