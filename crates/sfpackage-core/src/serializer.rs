use serde::Serialize;
use std::fmt;

use crate::manifest::Manifest;
use crate::metadata_types::api_type_name;

/// Namespace of the Metadata API package document
pub const PACKAGE_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "37.0";

/// One `<types>` block of a package document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub type_name: String,
    pub members: Vec<String>,
}

/// Serialized form of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDocument {
    entries: Vec<DocumentEntry>,
    version: String,
}

impl ManifestDocument {
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `package.xml` / `destructiveChanges.xml` content
    pub fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ManifestDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(f, r#"<Package xmlns="{}">"#, PACKAGE_NAMESPACE)?;
        for entry in &self.entries {
            writeln!(f, "  <types>")?;
            for member in &entry.members {
                writeln!(f, "    <members>{}</members>", escape(member))?;
            }
            writeln!(f, "    <name>{}</name>", escape(&entry.type_name))?;
            writeln!(f, "  </types>")?;
        }
        writeln!(f, "  <version>{}</version>", escape(&self.version))?;
        writeln!(f, "</Package>")
    }
}

/// Builds package documents from manifests
#[derive(Debug, Clone)]
pub struct ManifestSerializer {
    default_version: String,
}

impl Default for ManifestSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl ManifestSerializer {
    pub fn new(default_version: impl Into<String>) -> Self {
        Self {
            default_version: default_version.into(),
        }
    }

    /// Serialize a manifest, keeping type and member insertion order.
    ///
    /// `format_version` is written as given; without it the serializer's
    /// default version is used.
    pub fn serialize(&self, manifest: &Manifest, format_version: Option<u32>) -> ManifestDocument {
        let entries = manifest
            .iter()
            .map(|(folder, members)| DocumentEntry {
                type_name: api_type_name(folder).unwrap_or(folder).to_string(),
                members: members.to_vec(),
            })
            .collect();

        let version = format_version
            .map(|v| v.to_string())
            .unwrap_or_else(|| self.default_version.clone());

        ManifestDocument { entries, version }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
