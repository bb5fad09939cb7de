use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ClassifyError, UnrecognizedOperation};
use crate::manifest::Manifest;
use crate::record::{ChangeRecord, ChangeStatus};
use crate::shape::{MemberKey, NestedProperties, PathShape};

/// File name of the manifest at the source root; never classified
const PACKAGE_FILE: &str = "package.xml";

/// A member that is both in the add/modify and in the delete manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberConflict {
    pub type_name: String,
    pub member_id: String,
}

/// Result of classifying a diff
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    /// Added or modified members
    pub added: Manifest,
    /// Deleted members
    pub deleted: Manifest,
    pub deletes_occurred: bool,
    /// Added or modified files to copy into the package, in input order
    pub staged_paths: Vec<String>,
    /// Deleted files, in input order
    pub deleted_paths: Vec<String>,
    /// Records skipped because their operation needs review
    pub warnings: Vec<UnrecognizedOperation>,
}

impl Classification {
    /// Members present in both manifests, in delete order. Both entries
    /// stay in their manifests.
    pub fn conflicts(&self) -> Vec<MemberConflict> {
        self.deleted
            .iter()
            .flat_map(|(type_name, members)| {
                members
                    .iter()
                    .filter(move |member| self.added.contains(type_name, member))
                    .map(move |member| MemberConflict {
                        type_name: type_name.to_string(),
                        member_id: member.clone(),
                    })
            })
            .collect()
    }
}

/// Turns name-status records into add/modify and delete manifests
#[derive(Debug, Clone)]
pub struct DiffClassifier {
    source_root: String,
    destructive_only: bool,
    nested: NestedProperties,
}

impl DiffClassifier {
    pub fn new(source_root: impl Into<String>) -> Self {
        let source_root = source_root.into();
        Self {
            source_root: source_root.trim_end_matches('/').to_string(),
            destructive_only: false,
            nested: NestedProperties::default(),
        }
    }

    /// Ignore added and modified files entirely
    pub fn destructive_only(mut self, destructive_only: bool) -> Self {
        self.destructive_only = destructive_only;
        self
    }

    pub fn with_nested_properties(mut self, nested: NestedProperties) -> Self {
        self.nested = nested;
        self
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    /// Classify records in order.
    ///
    /// Records outside the source root are skipped. A record whose path is
    /// too short to name a type and a member aborts the whole run.
    pub fn classify<'r, I>(&self, records: I) -> Result<Classification, ClassifyError>
    where
        I: IntoIterator<Item = &'r ChangeRecord>,
    {
        let mut result = Classification::default();

        for record in records {
            let Some(relative) = self.relative_path(&record.path) else {
                debug!(path = %record.path, "Skipping file outside source root");
                continue;
            };

            if relative == PACKAGE_FILE {
                continue;
            }

            let key = self.member_key(relative, &record.path)?;

            match record.status {
                ChangeStatus::Added | ChangeStatus::Modified => {
                    if self.destructive_only {
                        continue;
                    }
                    debug!(
                        path = %record.path,
                        type_name = %key.type_name,
                        member = %key.member_id,
                        "File was added or modified"
                    );
                    result.staged_paths.push(record.path.clone());
                    result.added.insert(&key.type_name, &key.member_id);
                }
                ChangeStatus::Deleted => {
                    debug!(
                        path = %record.path,
                        type_name = %key.type_name,
                        member = %key.member_id,
                        "File was deleted"
                    );
                    result.deletes_occurred = true;
                    result.deleted_paths.push(record.path.clone());
                    result.deleted.insert(&key.type_name, &key.member_id);
                }
                ChangeStatus::Other(status) => {
                    let warning = UnrecognizedOperation {
                        status,
                        path: record.path.clone(),
                    };
                    warn!("{}", warning);
                    result.warnings.push(warning);
                }
            }
        }

        for conflict in result.conflicts() {
            warn!(
                type_name = %conflict.type_name,
                member = %conflict.member_id,
                "Member is both added and deleted"
            );
        }

        Ok(result)
    }

    fn relative_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        path.strip_prefix(self.source_root.as_str())?
            .strip_prefix('/')
    }

    fn member_key(&self, relative: &str, path: &str) -> Result<MemberKey, ClassifyError> {
        PathShape::parse(relative, &self.nested)
            .map(|shape| shape.member_key())
            .ok_or_else(|| ClassifyError::TruncatedPath {
                path: path.to_string(),
            })
    }
}
