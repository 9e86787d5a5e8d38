use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// How staged output replaces the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStrategy {
    /// Anonymous temp file, copied over the original's contents.
    /// Keeps the original inode, owner and permissions; a crash mid-copy can leave the
    /// original truncated.
    #[default]
    Copy,
    /// Named temp file in the target's directory, renamed over the original.
    /// The replace is atomic; the original's permission bits are carried over. A symlinked
    /// target is resolved first, so the link stays and the file it points to is replaced.
    Rename,
}

/// Normalized output waiting to replace the original file
pub struct StagedFile {
    inner: Staging,
}

enum Staging {
    Anonymous(File),
    Named {
        file: NamedTempFile,
        /// `target` with symlinks resolved
        resolved: PathBuf,
    },
}

impl StagedFile {
    /// Create the temporary that will hold output for `target`.
    ///
    /// With [`CommitStrategy::Copy`] the temporary is unlinked as soon as it exists, so a
    /// killed process leaves nothing behind by name. With [`CommitStrategy::Rename`] it
    /// lives next to the file `target` resolves to (rename only works within one
    /// filesystem) and is deleted on drop unless committed.
    pub fn create(strategy: CommitStrategy, target: &Path) -> io::Result<Self> {
        let inner = match strategy {
            CommitStrategy::Copy => Staging::Anonymous(tempfile::tempfile()?),
            CommitStrategy::Rename => {
                let resolved = fs::canonicalize(target)?;
                let dir = resolved.parent().unwrap_or_else(|| Path::new("/"));
                let file = tempfile::Builder::new()
                    .prefix(".fixle")
                    .tempfile_in(dir)?;
                Staging::Named { file, resolved }
            }
        };
        debug!(path = %target.display(), ?strategy, "Staged temporary output");
        Ok(Self { inner })
    }

    /// Handle the normalizer writes into
    pub fn file_mut(&mut self) -> &mut File {
        match &mut self.inner {
            Staging::Anonymous(file) => file,
            Staging::Named { file, .. } => file.as_file_mut(),
        }
    }

    /// Replace the contents of `target` with everything written so far.
    /// The temporary is released whether or not this succeeds. With
    /// [`CommitStrategy::Rename`] the path resolved in [`StagedFile::create`] is replaced.
    pub fn commit(self, target: &Path) -> io::Result<()> {
        match self.inner {
            Staging::Anonymous(mut file) => {
                file.flush()?;
                file.seek(SeekFrom::Start(0))?;

                let mut original = OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .open(target)?;
                let copied = io::copy(&mut file, &mut original)?;
                original.flush()?;
                original.sync_all()?;
                debug!(path = %target.display(), bytes = copied, "Copied output over original");
            }
            Staging::Named { mut file, resolved } => {
                file.as_file_mut().flush()?;
                file.as_file().sync_all()?;

                let permissions = fs::metadata(&resolved)?.permissions();
                fs::set_permissions(file.path(), permissions)?;

                file.persist(&resolved).map_err(|e| e.error)?;
                debug!(
                    path = %target.display(),
                    resolved = %resolved.display(),
                    "Renamed output over original"
                );
            }
        }
        Ok(())
    }
}
