use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::package_dir::BuildError;

/// Suffix of the description file that accompanies most source files
const META_SUFFIX: &str = "-meta.xml";

/// Copies changed source files into a build directory
pub struct Stager {
    source_dir: PathBuf,
}

impl Stager {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Copy each path, keeping its relative location below `build_dir`.
    ///
    /// A file and its `-meta.xml` companion are copied together when the
    /// companion exists. Returns every relative path copied, once each.
    pub fn stage(&self, paths: &[String], build_dir: &Path) -> Result<Vec<String>, BuildError> {
        let mut seen = HashSet::new();
        let mut copied = Vec::new();

        for path in paths {
            if seen.insert(path.clone()) {
                self.copy(path, build_dir)?;
                copied.push(path.clone());
            }

            let companion = companion_of(path);
            if self.source_dir.join(&companion).is_file() && seen.insert(companion.clone()) {
                self.copy(&companion, build_dir)?;
                copied.push(companion);
            }
        }

        debug!(
            count = copied.len(),
            build_dir = %build_dir.display(),
            "Staged files"
        );

        Ok(copied)
    }

    fn copy(&self, relative: &str, build_dir: &Path) -> Result<(), BuildError> {
        let from = self.source_dir.join(relative);
        let to = build_dir.join(relative);

        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BuildError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::copy(&from, &to).map_err(|source| BuildError::CopyFile {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;

        Ok(())
    }
}

/// `Foo.cls` ↔ `Foo.cls-meta.xml`
fn companion_of(path: &str) -> String {
    match path.strip_suffix(META_SUFFIX) {
        Some(source) => source.to_string(),
        None => format!("{}{}", path, META_SUFFIX),
    }
}
