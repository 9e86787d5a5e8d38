use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use fixle::{CommitStrategy, FileFixer, FileReport, FileStatus, FixConfig, LineEnding};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// sysexits.h `EX_USAGE`
const EXIT_USAGE: u8 = 64;
/// A file could not be opened, or the run report could not be written
const EXIT_FATAL: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "fixle")]
#[command(about = "Fix end-of-line characters, replacing with UNIX end-of-line characters ^J")]
#[command(version)]
struct Args {
    /// Files to fix
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Use Mac-style end-of-line characters (^M)
    #[arg(short = 'm', long, overrides_with = "dos")]
    mac: bool,

    /// Use DOS-style end-of-line characters (^M^J)
    #[arg(short = 'd', long, overrides_with = "mac")]
    dos: bool,

    /// Don't replace lines (implies verbose)
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Operate on files that appear binary without warning
    #[arg(short = 'f', long)]
    force: bool,

    /// Show original end-of-line character count
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Replace files by atomic rename instead of copying over them
    #[arg(long)]
    atomic: bool,

    /// Write a JSON report of the run to this path
    #[arg(long, value_name = "PATH")]
    stats_out: Option<PathBuf>,

    /// Emit log events as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn fix_config(&self) -> FixConfig {
        FixConfig {
            line_ending: LineEnding::from_flags(self.mac, self.dos),
            force: self.force,
            verbose: self.verbose,
            dry_run: self.dry_run,
            commit: if self.atomic {
                CommitStrategy::Rename
            } else {
                CommitStrategy::Copy
            },
        }
    }
}

fn init_logging(json: bool) {
    // Logs share stderr with diagnostics; stdout carries only statistics
    let filter = EnvFilter::try_from_env("FIXLE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report(report: &FileReport, verbose: bool) {
    match report.status {
        FileStatus::SkippedDirectory => eprintln!("{} is a directory", report.path),
        FileStatus::SkippedBinary => eprintln!("{} is a binary file", report.path),
        FileStatus::Failed => {
            if verbose {
                if let Some(line) = report.stats_line() {
                    println!("{line}");
                }
            }
            if let Some(ref error) = report.error {
                eprintln!("{error}");
            }
        }
        FileStatus::Rewritten | FileStatus::Scanned => {
            if verbose {
                if let Some(line) = report.stats_line() {
                    println!("{line}");
                }
            }
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = args.fix_config();
    info!(?config, "Resolved configuration");

    let verbose = config.reports_stats();
    let fixer = FileFixer::new(config);

    let summary = match fixer.fix_all(&args.files, |report| print_report(report, verbose)) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(EXIT_FATAL));
        }
    };

    if let Some(ref stats_out) = args.stats_out {
        summary.write_json(stats_out)?;
        debug!("Wrote run report to {}", stats_out.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    init_logging(args.log_json);
    debug!(?args, "Parsed CLI arguments");

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fixle: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
