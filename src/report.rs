// Per-file outcome records and the run summary written by --stats-out

use crate::error::FixError;
use crate::line_ending::LineEnding;
use crate::normalizer::EolStats;
use crate::rewriter::CommitStrategy;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// What happened to one input path
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Normalized and written back
    Rewritten,
    /// Normalized for statistics only (dry run)
    Scanned,
    SkippedDirectory,
    SkippedBinary,
    /// A per-file error; see `error`
    Failed,
}

/// Per-file processing record
#[derive(Serialize, Debug, Clone)]
pub struct FileReport {
    /// Path as given on the command line
    pub path: String,
    pub status: FileStatus,
    /// Line endings found, when normalization ran to completion
    pub stats: Option<EolStats>,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(path: &Path, status: FileStatus, stats: Option<EolStats>) -> Self {
        Self {
            path: path.display().to_string(),
            status,
            stats,
            error: None,
        }
    }

    pub fn failed(err: &FixError) -> Self {
        Self {
            path: err.path().display().to_string(),
            status: FileStatus::Failed,
            stats: err.stats(),
            error: Some(err.to_string()),
        }
    }

    /// Verbose statistics line, `None` when the file was never normalized
    pub fn stats_line(&self) -> Option<String> {
        self.stats.map(|s| {
            format!(
                "{}: {} Unix LE, {} Mac LE, {} DOS LE",
                self.path, s.unix, s.mac, s.dos
            )
        })
    }
}

/// Aggregate results for one invocation
#[derive(Serialize, Debug, Clone, Default)]
pub struct RunSummary {
    pub line_ending: LineEnding,
    pub dry_run: bool,
    /// How rewritten files replaced their originals
    pub commit: CommitStrategy,
    pub files_rewritten: u64,
    pub files_scanned: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    /// Line endings found across every normalized file
    pub totals: EolStats,
    pub file_reports: Vec<FileReport>,
}

impl RunSummary {
    pub fn new(line_ending: LineEnding, dry_run: bool, commit: CommitStrategy) -> Self {
        Self {
            line_ending,
            dry_run,
            commit,
            ..Default::default()
        }
    }

    pub fn record(&mut self, report: FileReport) {
        match report.status {
            FileStatus::Rewritten => self.files_rewritten += 1,
            FileStatus::Scanned => self.files_scanned += 1,
            FileStatus::SkippedDirectory | FileStatus::SkippedBinary => self.files_skipped += 1,
            FileStatus::Failed => self.files_failed += 1,
        }
        if let Some(stats) = report.stats {
            self.totals += stats;
        }
        self.file_reports.push(report);
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
