//! # sfpackage-core
//!
//! Turns a git name-status diff into Salesforce deployment manifests.
//!
//! ## Overview
//!
//! Each changed file below the source root is decomposed into a metadata
//! type and member:
//! - `force-app/main/default/classes/Foo.cls` → `classes` / `Foo`
//! - `force-app/main/default/email/Folder1/Welcome.email` → `email` / `Folder1/Welcome`
//! - `force-app/main/default/objects/Account/fields/Name__c.field-meta.xml` → `fields` / `Account.Name__c`
//!
//! Added and modified files go into the package manifest and are staged for
//! copying. Deleted files go into the destructive manifest.
//!
//! ## Key Types
//!
//! - [`DiffClassifier`] - Builds both manifests from [`ChangeRecord`]s
//! - [`Manifest`] - Insertion-ordered type → member set
//! - [`ManifestSerializer`] - Renders a [`Manifest`] as a [`ManifestDocument`]
//! - [`RunOutcome`] - Final outcome and exit code
//!
//! ## Usage
//!
//! ```rust
//! use sfpackage_core::{parse_name_status, DiffClassifier, ManifestSerializer};
//!
//! let records = parse_name_status("M\tforce-app/main/default/classes/Foo.cls\n");
//! let classification = DiffClassifier::new("force-app").classify(&records)?;
//!
//! let xml = ManifestSerializer::default()
//!     .serialize(&classification.added, Some(45))
//!     .to_xml();
//! assert!(xml.contains("<members>Foo</members>"));
//! # Ok::<(), sfpackage_core::ClassifyError>(())
//! ```

mod classifier;
mod error;
mod manifest;
pub mod metadata_types;
mod outcome;
mod record;
mod serializer;
mod shape;

pub use classifier::{Classification, DiffClassifier, MemberConflict};
pub use error::{ClassifyError, UnrecognizedOperation};
pub use manifest::Manifest;
pub use outcome::RunOutcome;
pub use record::{parse_name_status, ChangeRecord, ChangeStatus};
pub use serializer::{
    DocumentEntry, ManifestDocument, ManifestSerializer, DEFAULT_API_VERSION, PACKAGE_NAMESPACE,
};
pub use shape::{
    MemberKey, NestedProperties, PathShape, DEFAULT_NESTED_PROPERTIES, NOISE_SEGMENTS,
};
