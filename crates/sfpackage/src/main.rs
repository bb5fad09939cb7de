use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};

use sfpackage_git::{DiffSource, NameStatusFile, RevisionRange};
use sfpackage_logging::{init_tracing, LogEvent, LogFormat, Logger};

mod config;
mod package_dir;
mod run;
mod stage;

use config::ProjectConfig;
use run::{RunOptions, RunSummary};

#[derive(Parser, Debug)]
#[command(
    name = "sfpackage",
    about = "Build a package.xml and destructiveChanges.xml from a git diff",
    long_about = "Compares two revisions and writes <target>/<branch>/unpackaged/package.xml \
    with a copy of every added or modified file. If any deletes occurred it also writes \
    <target>/<branch>/destructive/destructiveChanges.xml.",
    version,
    author
)]
struct Cli {
    /// Existing revision to compare against
    compare: String,

    /// Revision holding the changes to deploy
    branch: String,

    /// Directory to build the package in (required unless --dry-run)
    target: Option<PathBuf>,

    /// Only print the package.xml and destructiveChanges.xml that would be generated
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Version written into the package documents
    #[arg(short = 'p', long = "pversion", value_name = "VERSION")]
    pversion: Option<u32>,

    /// Only include destructive (deleted) changes
    #[arg(short = 'x', long)]
    destructive: bool,

    /// Root source directory (default: force-app)
    #[arg(short = 's', long = "src", value_name = "DIR")]
    src: Option<String>,

    /// Read `git diff --name-status` output from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    diff_file: Option<PathBuf>,

    /// Working directory (default: current directory)
    #[arg(short = 'C', long)]
    working_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatChoice>,

    /// Diagnostic log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Also append JSON log events to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Output the run summary as JSON
    #[arg(long)]
    json_output: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    let log_format: LogFormat = cli
        .log_format
        .map(Into::into)
        .or(config.log_format)
        .unwrap_or_default();
    init_tracing(&cli.log_level, log_format);

    let target = config
        .target(cli.target.clone())
        .map(|target| resolve(&working_dir, target));
    if !cli.dry_run && target.is_none() {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "target required when not dry-run",
            )
            .exit();
    }

    let logger = match cli.log_file {
        Some(ref path) => Logger::with_file(log_format, &resolve(&working_dir, path.clone()))
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => Logger::new(log_format),
    };

    let source: Box<dyn DiffSource> = match cli.diff_file {
        Some(ref path) => Box::new(NameStatusFile::from_arg(path)),
        None => Box::new(RevisionRange::new(
            &working_dir,
            cli.compare.as_str(),
            cli.branch.as_str(),
        )),
    };

    let options = RunOptions {
        compare: cli.compare.clone(),
        branch: cli.branch.clone(),
        target,
        working_dir: working_dir.clone(),
        source_root: config.source_root(cli.src.as_deref()),
        destructive_only: cli.destructive,
        dry_run: cli.dry_run,
        format_version: cli.pversion,
        default_version: config.default_version(),
        nested: config.nested_properties(),
    };

    let stdout = std::io::stdout();
    let summary = match run::run(&options, source.as_ref(), &logger, &mut stdout.lock()) {
        Ok(summary) => summary,
        Err(e) => {
            logger.log(&LogEvent::ErrorEncountered {
                error: format!("{:#}", e),
            });
            return Err(e);
        }
    };

    if cli.json_output {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{}", json);
    } else {
        print_summary(&summary, cli.dry_run);
    }

    std::process::exit(summary.outcome.exit_code());
}

/// Relative paths are taken from the working directory
fn resolve(working_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        working_dir.join(path)
    }
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    if dry_run || !summary.outcome.is_success() {
        return;
    }
    if let Some(ref dir) = summary.package_dir {
        eprintln!("Successfully created package.xml and files in {}", dir.display());
    }
    if let Some(ref dir) = summary.destructive_dir {
        eprintln!("Successfully created destructiveChanges.xml in {}", dir.display());
    }
}
