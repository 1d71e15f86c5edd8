//! Per-project file tree operations, confined by [`crate::paths`].

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::paths::{PathRejected, canonicalize_root, resolve_within};

/// Errors produced by [`ProjectFileStore`], with enough variants for the HTTP
/// layer to map each one to a distinct status.
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("invalid file path")]
    InvalidPath(#[from] PathRejected),

    #[error("file not found")]
    NotFound,

    #[error("file already exists")]
    AlreadyExists,

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// What to create at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry in a project tree. Serialized with a `type` tag so the client can
/// branch on `"file"` vs `"folder"`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileNode {
    File {
        name: String,
        path: String,
    },
    Folder {
        name: String,
        path: String,
        children: Vec<FileNode>,
    },
}

/// Filesystem-backed file store for a single project directory.
///
/// The filesystem is the source of truth: nothing is cached, every call
/// re-touches disk. Concurrent writers to the same path race with
/// last-writer-wins semantics; callers needing isolation must serialize
/// themselves.
pub struct ProjectFileStore {
    root: PathBuf,
}

impl ProjectFileStore {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            root: canonicalize_root(&project_root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, user_path: &str) -> Result<PathBuf, FileStoreError> {
        Ok(resolve_within(&self.root, user_path)?)
    }

    /// List the whole project tree in directory-enumeration order.
    ///
    /// No sort is imposed; callers must not assume alphabetical order.
    pub fn list_tree(&self) -> Result<Vec<FileNode>, FileStoreError> {
        walk(&self.root, "")
    }

    pub async fn read(&self, user_path: &str) -> Result<String, FileStoreError> {
        let target = self.resolve(user_path)?;
        match tokio::fs::read_to_string(&target).await {
            Ok(content) => Ok(content),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Err(FileStoreError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    /// Write `content` at `user_path`, creating parent directories as needed.
    /// Always overwrites.
    pub async fn write(&self, user_path: &str, content: &str) -> Result<(), FileStoreError> {
        let target = self.resolve(user_path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, content).await?;
        Ok(())
    }

    /// Create an empty file or a folder. Unlike [`Self::write`], creation
    /// fails when the target already exists.
    pub async fn create(&self, user_path: &str, kind: NodeKind) -> Result<(), FileStoreError> {
        let target = self.resolve(user_path)?;
        if tokio::fs::try_exists(&target).await? {
            return Err(FileStoreError::AlreadyExists);
        }
        match kind {
            NodeKind::Folder => {
                tokio::fs::create_dir_all(&target).await?;
            }
            NodeKind::File => {
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&target, "").await?;
            }
        }
        Ok(())
    }

    /// Delete a file, or a folder recursively. Absent targets are reported as
    /// [`FileStoreError::NotFound`] on every call, first or repeated.
    pub async fn delete(&self, user_path: &str) -> Result<(), FileStoreError> {
        let target = self.resolve(user_path)?;
        let metadata = match tokio::fs::metadata(&target).await {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(FileStoreError::NotFound);
            }
            Err(error) => return Err(error.into()),
        };
        if metadata.is_dir() {
            tokio::fs::remove_dir_all(&target).await?;
        } else {
            tokio::fs::remove_file(&target).await?;
        }
        Ok(())
    }
}

fn walk(dir: &Path, relative: &str) -> Result<Vec<FileNode>, FileStoreError> {
    let mut nodes = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let child_relative = if relative.is_empty() {
            name.clone()
        } else {
            format!("{relative}/{name}")
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let children = walk(&entry.path(), &child_relative)?;
            nodes.push(FileNode::Folder {
                name,
                path: child_relative,
                children,
            });
        } else {
            nodes.push(FileNode::File {
                name,
                path: child_relative,
            });
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn store(dir: &tempfile::TempDir) -> ProjectFileStore {
        ProjectFileStore::new(dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn write_then_read_round_trips_utf8() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        let content = "héllo wörld\n// comment\nlet x = \"日本語\";\n";
        store.write("src/deep/app.js", content).await.expect("write");
        let read = store.read("src/deep/app.js").await.expect("read");
        assert_eq!(read, content);
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        store.write("a/b/c/file.txt", "x").await.expect("write");
        assert!(dir.path().join("a/b/c/file.txt").is_file());
    }

    #[tokio::test]
    async fn escape_attempts_are_rejected_before_io() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        let result = store.write("../outside.txt", "nope").await;
        assert!(matches!(result, Err(FileStoreError::InvalidPath(_))));
        assert!(!dir.path().parent().unwrap().join("outside.txt").exists());

        let result = store.read("../../etc/passwd").await;
        assert!(matches!(result, Err(FileStoreError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn create_fails_when_target_exists_and_leaves_content_alone() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        store.write("notes.txt", "original").await.expect("write");
        let result = store.create("notes.txt", NodeKind::File).await;
        assert!(matches!(result, Err(FileStoreError::AlreadyExists)));
        assert_eq!(store.read("notes.txt").await.expect("read"), "original");
    }

    #[tokio::test]
    async fn create_folder_and_file() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        store.create("assets", NodeKind::Folder).await.expect("mkdir");
        assert!(dir.path().join("assets").is_dir());

        store
            .create("assets/logo.svg", NodeKind::File)
            .await
            .expect("touch");
        assert_eq!(store.read("assets/logo.svg").await.expect("read"), "");
    }

    #[tokio::test]
    async fn delete_missing_path_is_not_found_every_time() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        for _ in 0..2 {
            let result = store.delete("ghost.txt").await;
            assert!(matches!(result, Err(FileStoreError::NotFound)));
        }
    }

    #[tokio::test]
    async fn delete_folder_is_recursive() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        store.write("pkg/src/a.rs", "a").await.expect("write");
        store.write("pkg/src/b.rs", "b").await.expect("write");
        store.delete("pkg").await.expect("delete");
        assert!(!dir.path().join("pkg").exists());
    }

    #[tokio::test]
    async fn list_tree_nests_folders() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir);

        store.write("src/main.js", "x").await.expect("write");
        store.write("readme.md", "y").await.expect("write");

        let tree = store.list_tree().expect("list");
        assert_eq!(tree.len(), 2);

        let folder = tree
            .iter()
            .find(|node| matches!(node, FileNode::Folder { .. }))
            .expect("folder present");
        match folder {
            FileNode::Folder { name, path, children } => {
                assert_eq!(name, "src");
                assert_eq!(path, "src");
                assert_eq!(
                    children,
                    &vec![FileNode::File {
                        name: "main.js".into(),
                        path: "src/main.js".into(),
                    }]
                );
            }
            FileNode::File { .. } => unreachable!(),
        }
    }

    #[tokio::test]
    async fn concurrent_writes_to_distinct_paths_both_land() {
        let dir = tempdir().expect("tempdir");
        let store = std::sync::Arc::new(store(&dir));

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.write("one.txt", "first").await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.write("two.txt", "second").await })
        };
        a.await.expect("join").expect("write one");
        b.await.expect("join").expect("write two");

        assert_eq!(store.read("one.txt").await.expect("read"), "first");
        assert_eq!(store.read("two.txt").await.expect("read"), "second");
    }
}
