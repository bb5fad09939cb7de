use serde::{Deserialize, Serialize};

use crate::{Classification, ClassifyError};

/// The final outcome of a packaging run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every in-scope record was classified
    Success {
        added_members: usize,
        deleted_members: usize,
        staged_files: usize,
    },
    /// Some records had an operation that needs review
    CompletedWithWarnings {
        added_members: usize,
        deleted_members: usize,
        staged_files: usize,
        warnings: usize,
    },
    /// A changed path could not be decomposed; nothing was written
    InvalidInput { error: String },
}

impl RunOutcome {
    pub fn from_classification(classification: &Classification) -> Self {
        let added_members = classification.added.member_count();
        let deleted_members = classification.deleted.member_count();
        let staged_files = classification.staged_paths.len();

        if classification.warnings.is_empty() {
            Self::Success {
                added_members,
                deleted_members,
                staged_files,
            }
        } else {
            Self::CompletedWithWarnings {
                added_members,
                deleted_members,
                staged_files,
                warnings: classification.warnings.len(),
            }
        }
    }

    pub fn invalid_input(error: &ClassifyError) -> Self {
        Self::InvalidInput {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. })
    }

    pub fn has_warnings(&self) -> bool {
        matches!(self, Self::CompletedWithWarnings { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success { .. } => 0,
            Self::CompletedWithWarnings { .. } => 0,
            Self::InvalidInput { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangeRecord, ChangeStatus, DiffClassifier};

    #[test]
    fn test_warnings_are_distinguishable_but_succeed() {
        let records = vec![
            ChangeRecord::new(ChangeStatus::Added, "force-app/classes/Foo.cls"),
            ChangeRecord::new(ChangeStatus::Other('T'), "force-app/classes/Bar.cls"),
        ];
        let classification = DiffClassifier::new("force-app").classify(&records).unwrap();
        let outcome = RunOutcome::from_classification(&classification);

        assert!(outcome.has_warnings());
        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_invalid_input_exit_code() {
        let error = ClassifyError::TruncatedPath {
            path: "force-app/classes".to_string(),
        };
        let outcome = RunOutcome::invalid_input(&error);
        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), 1);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "invalid_input");
    }
}
