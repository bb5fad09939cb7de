use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for a packaging run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    RunStarted {
        compare: String,
        branch: String,
        source_root: String,
        destructive_only: bool,
    },
    FileAddedOrModified {
        path: String,
    },
    FileDeleted {
        path: String,
    },
    /// A git operation other than add, modify or delete
    OperationNeedsReview {
        status: char,
        path: String,
    },
    MemberConflict {
        type_name: String,
        member: String,
    },
    PackageWritten {
        path: PathBuf,
    },
    DestructiveWritten {
        path: PathBuf,
    },
    FilesStaged {
        count: usize,
        build_dir: PathBuf,
    },
    RunCompleted {
        added_members: usize,
        deleted_members: usize,
        warnings: usize,
    },
    ErrorEncountered {
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for sfpackage events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::RunStarted {
                compare,
                branch,
                source_root,
                destructive_only,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {} {} {}",
                    "sfpackage".bold().bright_white(),
                    compare.dimmed(),
                    "→".bright_blue(),
                    branch.bright_white(),
                    format!("({})", source_root).dimmed()
                );
                if *destructive_only {
                    let _ = writeln!(
                        stderr,
                        "  {} {}",
                        "*".bright_yellow(),
                        "Only including destructive changes.".bright_yellow()
                    );
                }
            }
            LogEvent::FileAddedOrModified { path } => {
                let _ = writeln!(stderr, "  {} {}", "+".bright_green(), path);
            }
            LogEvent::FileDeleted { path } => {
                let _ = writeln!(stderr, "  {} {}", "-".bright_red(), path);
            }
            LogEvent::OperationNeedsReview { status, path } => {
                let _ = writeln!(
                    stderr,
                    "  {} Operation '{}' on file needs review: {}",
                    "⚠".bright_yellow(),
                    status,
                    path.bright_yellow()
                );
            }
            LogEvent::MemberConflict { type_name, member } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} {} is both added and deleted",
                    "⚠".bright_yellow(),
                    type_name.dimmed(),
                    member.bright_yellow()
                );
            }
            LogEvent::PackageWritten { path } => {
                let _ = writeln!(
                    stderr,
                    "{} Wrote {}",
                    "✓".bright_green(),
                    path.display()
                );
            }
            LogEvent::DestructiveWritten { path } => {
                let _ = writeln!(
                    stderr,
                    "{} Wrote {}",
                    "✓".bright_green(),
                    path.display().to_string().bright_red()
                );
            }
            LogEvent::FilesStaged { count, build_dir } => {
                let _ = writeln!(
                    stderr,
                    "{} Copied {} {} into {}",
                    "✓".bright_green(),
                    count,
                    if *count == 1 { "file" } else { "files" },
                    build_dir.display()
                );
            }
            LogEvent::RunCompleted {
                added_members,
                deleted_members,
                warnings,
            } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {}, {} {}",
                    "Done:".bold(),
                    format!("+{}", added_members).green(),
                    if *added_members == 1 { "member" } else { "members" },
                    format!("-{}", deleted_members).red(),
                    if *deleted_members == 1 { "member" } else { "members" }
                );
                if *warnings > 0 {
                    let _ = writeln!(
                        stderr,
                        "{} {} {} need review",
                        "⚠".bright_yellow(),
                        warnings,
                        if *warnings == 1 { "file" } else { "files" }
                    );
                }
            }
            LogEvent::ErrorEncountered { error } => {
                let _ = writeln!(stderr, "{} {}", "✗".bright_red(), error.bright_red());
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::RunStarted {
                compare, branch, ..
            } => format!("[{}] run:start {}..{}", timestamp, compare, branch),
            LogEvent::FileAddedOrModified { path } => format!("[{}] A/M {}", timestamp, path),
            LogEvent::FileDeleted { path } => format!("[{}] D {}", timestamp, path),
            LogEvent::OperationNeedsReview { status, path } => {
                format!("[{}] review:{} {}", timestamp, status, path)
            }
            LogEvent::MemberConflict { type_name, member } => {
                format!("[{}] conflict {}:{}", timestamp, type_name, member)
            }
            LogEvent::PackageWritten { path } => {
                format!("[{}] write {}", timestamp, path.display())
            }
            LogEvent::DestructiveWritten { path } => {
                format!("[{}] write {}", timestamp, path.display())
            }
            LogEvent::FilesStaged { count, build_dir } => {
                format!("[{}] copy {}f {}", timestamp, count, build_dir.display())
            }
            LogEvent::RunCompleted {
                added_members,
                deleted_members,
                warnings,
            } => format!(
                "[{}] run:done +{} -{} !{}",
                timestamp, added_members, deleted_members, warnings
            ),
            LogEvent::ErrorEncountered { error } => format!("[{}] error:{}", timestamp, error),
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_tag() {
        let event = LogEvent::OperationNeedsReview {
            status: 'T',
            path: "force-app/classes/Foo.cls".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "operation_needs_review");
        assert_eq!(json["status"], "T");
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_file_log_has_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs").join("run.jsonl");

        let logger = Logger::with_file(LogFormat::Compact, &log_path).unwrap();
        logger.log(&LogEvent::FileDeleted {
            path: "force-app/classes/Bar.cls".to_string(),
        });
        logger.log(&LogEvent::RunCompleted {
            added_members: 0,
            deleted_members: 1,
            warnings: 0,
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "file_deleted");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["deleted_members"], 1);
    }
}
