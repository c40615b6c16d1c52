//! Output file naming.

use std::path::{Component, Path, PathBuf};

use crate::bucket::BucketKey;

/// Directory and file stem that every bucket file is placed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub dir: PathBuf,
    pub stem: String,
}

impl Target {
    /// Splits `to` into directory and stem, relative to `root`.
    ///
    /// A `to` without an extension is a directory; files inside it use
    /// `default_name` as stem. An absolute `to` is taken relative to `root`.
    pub fn resolve(root: &Path, to: &Path, default_name: &str) -> Self {
        let (dir, stem) = if to.extension().is_none() {
            (to.to_path_buf(), default_name.to_owned())
        } else {
            let dir = to.parent().map(Path::to_path_buf).unwrap_or_default();
            let stem = to
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| default_name.to_owned());
            (dir, stem)
        };
        let dir: PathBuf = dir
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        Self {
            dir: normalize(&root.join(dir)),
            stem,
        }
    }

    /// Path of the file for `key` with the given emission ordinal.
    pub fn file_for(&self, key: &BucketKey, ordinal: usize, descriptive: bool) -> PathBuf {
        let id = file_id(key, ordinal, descriptive);
        self.dir.join(format!("{}{}.css", self.stem, id))
    }
}

/// Suffix appended to the stem.
///
/// Descriptive mode uses the sanitized condition; otherwise the unconditioned
/// bucket gets no suffix and every other bucket its ordinal.
pub fn file_id(key: &BucketKey, ordinal: usize, descriptive: bool) -> String {
    if descriptive {
        format!("-{}", sanitize_filename::sanitize(key.as_str()))
    } else if key.is_unconditioned() {
        String::new()
    } else {
        format!("-{}", ordinal)
    }
}

/// Lexically resolves `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
