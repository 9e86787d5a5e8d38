use crate::classifier;
use crate::error::FixError;
use crate::line_ending::LineEnding;
use crate::normalizer::{self, EolStats};
use crate::report::{FileReport, FileStatus, RunSummary};
use crate::rewriter::{CommitStrategy, StagedFile};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Run-wide settings, fixed before the first file is touched
#[derive(Debug, Clone, Default)]
pub struct FixConfig {
    /// Terminator written for every line ending
    pub line_ending: LineEnding,
    /// Treat every file as text, skipping the binary check
    pub force: bool,
    /// Report per-file line-ending counts
    pub verbose: bool,
    /// Gather statistics only; never write. Implies verbose, see [`FixConfig::reports_stats`]
    pub dry_run: bool,
    /// How rewritten output replaces the original
    pub commit: CommitStrategy,
}

impl FixConfig {
    /// Counts are always reported in a dry run
    pub fn reports_stats(&self) -> bool {
        self.verbose || self.dry_run
    }
}

/// Applies a [`FixConfig`] to files one at a time
pub struct FileFixer {
    config: FixConfig,
}

impl FileFixer {
    pub fn new(config: FixConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FixConfig {
        &self.config
    }

    /// Classify, normalize and (unless dry run) rewrite one file.
    ///
    /// Directories and binary files come back as skipped reports. Every handle opened
    /// here is closed before returning, on success and on error.
    pub fn fix_file(&self, path: &Path) -> Result<FileReport, FixError> {
        if fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
            debug!(path = %path.display(), "Skipping directory");
            return Ok(FileReport::new(path, FileStatus::SkippedDirectory, None));
        }

        let mut input = File::open(path).map_err(|source| FixError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.config.force {
            // Leaves the cursor at offset 0 for the normalizer
            let binary = classifier::seems_binary(&mut input).map_err(|source| FixError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if binary {
                debug!(path = %path.display(), "Skipping binary file");
                return Ok(FileReport::new(path, FileStatus::SkippedBinary, None));
            }
        }

        if self.config.dry_run {
            let stats = self.normalize(path, input, None)?;
            return Ok(FileReport::new(path, FileStatus::Scanned, Some(stats)));
        }

        let mut staged = StagedFile::create(self.config.commit, path).map_err(|source| {
            FixError::TempFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let stats = {
            let mut writer = BufWriter::new(staged.file_mut());
            let stats = self.normalize(path, input, Some(&mut writer))?;
            writer.flush().map_err(|source| FixError::Normalize {
                path: path.to_path_buf(),
                source,
            })?;
            stats
        };

        staged.commit(path).map_err(|source| FixError::Commit {
            path: path.to_path_buf(),
            stats,
            source,
        })?;

        info!(
            path = %path.display(),
            line_ending = %self.config.line_ending,
            unix = stats.unix,
            mac = stats.mac,
            dos = stats.dos,
            "Rewrote file"
        );
        Ok(FileReport::new(path, FileStatus::Rewritten, Some(stats)))
    }

    /// Consumes `input`, so the read handle is closed before any commit
    fn normalize(
        &self,
        path: &Path,
        input: File,
        output: Option<&mut dyn Write>,
    ) -> Result<EolStats, FixError> {
        normalizer::normalize(BufReader::new(input), output, self.config.line_ending).map_err(
            |source| FixError::Normalize {
                path: path.to_path_buf(),
                source,
            },
        )
    }

    /// Process `paths` sequentially in the order given.
    ///
    /// `on_report` sees every file's report as soon as the file is done. Per-file errors
    /// become [`FileStatus::Failed`] reports and processing continues; a fatal error stops
    /// the run and is returned, leaving the remaining paths untouched.
    pub fn fix_all<P, F>(&self, paths: &[P], mut on_report: F) -> Result<RunSummary, FixError>
    where
        P: AsRef<Path>,
        F: FnMut(&FileReport),
    {
        info!("Starting run over {} paths", paths.len());
        let mut summary = RunSummary::new(
            self.config.line_ending,
            self.config.dry_run,
            self.config.commit,
        );

        for path in paths {
            let report = match self.fix_file(path.as_ref()) {
                Ok(report) => report,
                Err(e) if e.is_fatal() => {
                    warn!("Aborting run: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Failed to fix {}: {}", path.as_ref().display(), e);
                    FileReport::failed(&e)
                }
            };
            on_report(&report);
            summary.record(report);
        }

        info!(
            "Completed run: {} rewritten, {} scanned, {} skipped, {} failed",
            summary.files_rewritten, summary.files_scanned, summary.files_skipped, summary.files_failed
        );
        Ok(summary)
    }
}
