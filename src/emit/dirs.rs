use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::emit::EmitError;

/// Creates every missing directory of `dir`, shortest prefix first.
///
/// A prefix that already exists, or that another task creates concurrently,
/// counts as success.
pub async fn ensure_dir_chain(dir: &Path) -> Result<(), EmitError> {
    let mut prefix = PathBuf::new();
    for component in dir.components() {
        prefix.push(component.as_os_str());
        if !matches!(component, Component::Normal(_) | Component::ParentDir) {
            continue;
        }
        if fs::metadata(&prefix).await.is_ok_and(|m| m.is_dir()) {
            continue;
        }
        match fs::create_dir(&prefix).await {
            Ok(()) => debug!(path = %prefix.display(), "created directory"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(EmitError::CreateDir {
                    path: prefix,
                    source,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_missing_levels() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b").join("c");
        ensure_dir_chain(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn existing_directories_are_left_alone() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("keep");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("file.txt"), "x").unwrap();

        ensure_dir_chain(&dir.join("child")).await.unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("file.txt")).unwrap(), "x");
        assert!(dir.join("child").is_dir());
    }

    #[tokio::test]
    async fn file_in_the_way_is_an_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = ensure_dir_chain(&blocker.join("sub")).await.unwrap_err();
        assert!(matches!(err, EmitError::CreateDir { .. }));
    }
}
