use serde::Serialize;
use thiserror::Error;

/// Errors that abort a classification run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("File name \"{path}\" cannot be processed: expected <root>/<type>/<member> after removing layout folders")]
    TruncatedPath { path: String },
}

/// A record whose git operation is neither add, modify nor delete.
///
/// The record is left out of both manifests and the run carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Operation '{status}' on file needs review: {path}")]
pub struct UnrecognizedOperation {
    pub status: char,
    pub path: String,
}
