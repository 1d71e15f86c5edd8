//! Per-project secret storage: one JSON object file per project.
//!
//! Values are stored in plain text; encryption at rest is out of scope.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::paths::{PathRejected, resolve_within};

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("invalid project name")]
    InvalidProject(#[from] PathRejected),

    #[error("secret not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed secrets file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Key/value secrets, namespaced per project. Keys are unique within a
/// project; nothing is shared across projects.
pub struct SecretStore {
    dir: PathBuf,
}

impl SecretStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn ensure_layout(&self) -> Result<(), SecretError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn file_for(&self, project: &str) -> Result<PathBuf, SecretError> {
        if project.trim().is_empty() {
            return Err(SecretError::InvalidProject(PathRejected {
                path: project.to_string(),
            }));
        }
        Ok(resolve_within(&self.dir, &format!("{project}.json"))?)
    }

    pub async fn list(&self, project: &str) -> Result<BTreeMap<String, String>, SecretError> {
        let file = self.file_for(project)?;
        match tokio::fs::read_to_string(&file).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn set(&self, project: &str, key: &str, value: &str) -> Result<(), SecretError> {
        let file = self.file_for(project)?;
        let mut secrets = self.list(project).await?;
        secrets.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&secrets)?;
        tokio::fs::write(&file, serialized).await?;
        Ok(())
    }

    pub async fn remove(&self, project: &str, key: &str) -> Result<(), SecretError> {
        let file = self.file_for(project)?;
        let mut secrets = self.list(project).await?;
        if secrets.remove(key).is_none() {
            return Err(SecretError::NotFound);
        }
        let serialized = serde_json::to_string_pretty(&secrets)?;
        tokio::fs::write(&file, serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn store(dir: &tempfile::TempDir) -> SecretStore {
        let store = SecretStore::new(dir.path().to_path_buf());
        store.ensure_layout().await.expect("layout");
        store
    }

    #[tokio::test]
    async fn set_then_list_round_trips() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir).await;

        store.set("demo", "API_KEY", "s3cret").await.expect("set");
        store.set("demo", "TOKEN", "abc").await.expect("set");

        let secrets = store.list("demo").await.expect("list");
        assert_eq!(secrets.get("API_KEY").map(String::as_str), Some("s3cret"));
        assert_eq!(secrets.len(), 2);
    }

    #[tokio::test]
    async fn secrets_are_namespaced_per_project() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir).await;

        store.set("alpha", "KEY", "a").await.expect("set");
        store.set("beta", "KEY", "b").await.expect("set");

        assert_eq!(
            store.list("alpha").await.expect("list").get("KEY").map(String::as_str),
            Some("a")
        );
        assert_eq!(
            store.list("beta").await.expect("list").get("KEY").map(String::as_str),
            Some("b")
        );
    }

    #[tokio::test]
    async fn remove_missing_key_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir).await;

        assert!(matches!(
            store.remove("demo", "GHOST").await,
            Err(SecretError::NotFound)
        ));
    }

    #[tokio::test]
    async fn hostile_project_names_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let store = store(&dir).await;

        assert!(matches!(
            store.set("../escape", "KEY", "v").await,
            Err(SecretError::InvalidProject(_))
        ));
    }
}
