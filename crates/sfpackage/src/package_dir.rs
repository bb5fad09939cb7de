use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use sfpackage_core::{Manifest, ManifestDocument, ManifestSerializer};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which manifest a build directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// `unpackaged/package.xml` plus the staged source files
    Package,
    /// `destructive/destructiveChanges.xml`
    Destructive,
}

impl PackageKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Package => "unpackaged",
            Self::Destructive => "destructive",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Package => "package.xml",
            Self::Destructive => "destructiveChanges.xml",
        }
    }
}

/// Lays out `<target>/<branch>/{unpackaged,destructive}`
pub struct DirectoryBuilder {
    target: PathBuf,
    branch: String,
}

impl DirectoryBuilder {
    pub fn new(target: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            branch: branch.into(),
        }
    }

    pub fn build_dir(&self, kind: PackageKind) -> PathBuf {
        self.target.join(&self.branch).join(kind.dir_name())
    }

    /// Create the build directory and write the document into it.
    ///
    /// A destructive deploy also needs an empty `package.xml` next to
    /// `destructiveChanges.xml`.
    pub fn build(
        &self,
        document: &ManifestDocument,
        kind: PackageKind,
    ) -> Result<PathBuf, BuildError> {
        let build_dir = self.build_dir(kind);
        std::fs::create_dir_all(&build_dir).map_err(|source| BuildError::CreateDir {
            path: build_dir.clone(),
            source,
        })?;

        write_document(&build_dir.join(kind.file_name()), document)?;

        if kind == PackageKind::Destructive {
            let empty =
                ManifestSerializer::new(document.version()).serialize(&Manifest::new(), None);
            write_document(&build_dir.join(PackageKind::Package.file_name()), &empty)?;
        }

        debug!(build_dir = %build_dir.display(), ?kind, "Built package directory");

        Ok(build_dir)
    }
}

fn write_document(path: &Path, document: &ManifestDocument) -> Result<(), BuildError> {
    std::fs::write(path, document.to_xml()).map_err(|source| BuildError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
