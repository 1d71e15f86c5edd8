//! Storage layer for the Codepad server.
//!
//! Everything in this crate treats user-supplied paths as hostile: project
//! names and file paths are confined to their roots by [`paths::resolve_within`]
//! before any filesystem call happens.

pub mod files;
pub mod paths;
pub mod project;
pub mod secrets;

pub use files::{FileNode, FileStoreError, NodeKind, ProjectFileStore};
pub use paths::{PathRejected, canonicalize_root, normalize_path, resolve_within};
pub use project::{ProjectError, ProjectStore};
pub use secrets::{SecretError, SecretStore};
