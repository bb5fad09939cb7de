use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use sfpackage_core::{
    parse_name_status, Classification, DiffClassifier, Manifest, ManifestSerializer,
    MemberConflict, NestedProperties, RunOutcome, UnrecognizedOperation,
};
use sfpackage_git::DiffSource;
use sfpackage_logging::{LogEvent, Logger};

use crate::package_dir::{DirectoryBuilder, PackageKind};
use crate::stage::Stager;

/// Everything a packaging run needs, resolved from CLI and config
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub compare: String,
    pub branch: String,
    /// Required unless `dry_run`
    pub target: Option<PathBuf>,
    /// Directory the changed paths are relative to
    pub working_dir: PathBuf,
    pub source_root: String,
    pub destructive_only: bool,
    pub dry_run: bool,
    pub format_version: Option<u32>,
    pub default_version: String,
    pub nested: NestedProperties,
}

/// What a run produced
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub added: Manifest,
    pub deleted: Manifest,
    pub staged_paths: Vec<String>,
    pub copied_files: Vec<String>,
    pub warnings: Vec<UnrecognizedOperation>,
    pub conflicts: Vec<MemberConflict>,
    pub package_dir: Option<PathBuf>,
    pub destructive_dir: Option<PathBuf>,
}

impl RunSummary {
    fn new(outcome: RunOutcome, classification: Classification) -> Self {
        let conflicts = classification.conflicts();
        Self {
            outcome,
            added: classification.added,
            deleted: classification.deleted,
            staged_paths: classification.staged_paths,
            copied_files: Vec::new(),
            warnings: classification.warnings,
            conflicts,
            package_dir: None,
            destructive_dir: None,
        }
    }
}

/// Classify the diff and write (or print, for a dry run) the manifests.
///
/// A truncated path yields an `InvalidInput` outcome with nothing written.
/// Git and filesystem failures are returned as errors.
pub fn run(
    options: &RunOptions,
    source: &dyn DiffSource,
    logger: &Logger,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    logger.log(&LogEvent::RunStarted {
        compare: options.compare.clone(),
        branch: options.branch.clone(),
        source_root: options.source_root.clone(),
        destructive_only: options.destructive_only,
    });

    let text = source.name_status().context("Failed to read git diff")?;
    let records = parse_name_status(&text);

    let classifier = DiffClassifier::new(options.source_root.as_str())
        .destructive_only(options.destructive_only)
        .with_nested_properties(options.nested.clone());

    let classification = match classifier.classify(&records) {
        Ok(classification) => classification,
        Err(e) => {
            logger.log(&LogEvent::ErrorEncountered {
                error: e.to_string(),
            });
            return Ok(RunSummary::new(
                RunOutcome::invalid_input(&e),
                Classification::default(),
            ));
        }
    };

    log_classification(logger, &classification);

    let serializer = ManifestSerializer::new(options.default_version.as_str());
    let package = serializer.serialize(&classification.added, options.format_version);
    let destructive = serializer.serialize(&classification.deleted, options.format_version);

    let outcome = RunOutcome::from_classification(&classification);
    let deletes_occurred = classification.deletes_occurred;
    let mut summary = RunSummary::new(outcome, classification);

    if options.dry_run {
        if !options.destructive_only {
            write!(out, "\npackage.xml\n\n{}", package)?;
        }
        write!(out, "\ndestructiveChanges.xml\n\n{}", destructive)?;
        log_completed(logger, &summary);
        return Ok(summary);
    }

    let target = options
        .target
        .as_ref()
        .context("target required when not dry-run")?;
    let builder = DirectoryBuilder::new(target, options.branch.as_str());

    if !options.destructive_only {
        let build_dir = builder.build(&package, PackageKind::Package)?;
        logger.log(&LogEvent::PackageWritten {
            path: build_dir.join(PackageKind::Package.file_name()),
        });

        summary.copied_files =
            Stager::new(&options.working_dir).stage(&summary.staged_paths, &build_dir)?;
        logger.log(&LogEvent::FilesStaged {
            count: summary.copied_files.len(),
            build_dir: build_dir.clone(),
        });
        summary.package_dir = Some(build_dir);
    }

    if deletes_occurred {
        let build_dir = builder.build(&destructive, PackageKind::Destructive)?;
        logger.log(&LogEvent::DestructiveWritten {
            path: build_dir.join(PackageKind::Destructive.file_name()),
        });
        summary.destructive_dir = Some(build_dir);
    }

    log_completed(logger, &summary);

    Ok(summary)
}

fn log_classification(logger: &Logger, classification: &Classification) {
    for path in &classification.staged_paths {
        logger.log(&LogEvent::FileAddedOrModified { path: path.clone() });
    }
    for path in &classification.deleted_paths {
        logger.log(&LogEvent::FileDeleted { path: path.clone() });
    }
    for warning in &classification.warnings {
        logger.log(&LogEvent::OperationNeedsReview {
            status: warning.status,
            path: warning.path.clone(),
        });
    }
    for conflict in classification.conflicts() {
        logger.log(&LogEvent::MemberConflict {
            type_name: conflict.type_name,
            member: conflict.member_id,
        });
    }
}

fn log_completed(logger: &Logger, summary: &RunSummary) {
    logger.log(&LogEvent::RunCompleted {
        added_members: summary.added.member_count(),
        deleted_members: summary.deleted.member_count(),
        warnings: summary.warnings.len(),
    });
}
