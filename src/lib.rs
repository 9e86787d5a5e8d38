pub mod classifier;
pub mod error;
pub mod line_ending;
pub mod normalizer;
pub mod processor;
pub mod report;
pub mod rewriter;

// Re-export main types for convenient access
pub use error::FixError;
pub use line_ending::LineEnding;
pub use normalizer::{normalize, normalize_bytes, EolStats, Normalizer};

// Re-export the per-file pipeline and its reporting types
pub use processor::{FileFixer, FixConfig};
pub use report::{FileReport, FileStatus, RunSummary};
pub use rewriter::{CommitStrategy, StagedFile};
