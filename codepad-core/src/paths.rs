//! Path confinement primitives.
//!
//! All user-facing file operations funnel through [`resolve_within`], which
//! joins an untrusted relative path onto a root and verifies the result never
//! leaves that root. The check compares path *segments*, never raw strings, so
//! a sibling directory whose name merely starts with the root's name does not
//! slip through.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// A user-supplied path tried to escape its confinement root.
///
/// This is a distinct type (not a generic I/O error) so callers can map it to
/// a 403-style response instead of a server fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path '{path}' escapes the confinement root")]
pub struct PathRejected {
    pub path: String,
}

/// Normalize a path by resolving `.` and `..` components lexically.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Canonicalize a root directory, falling back to the lexically normalized
/// form when the filesystem call fails (for example before the directory has
/// been created).
pub fn canonicalize_root(root: &Path) -> PathBuf {
    std::fs::canonicalize(root).unwrap_or_else(|error| {
        warn!(
            path = %root.display(),
            %error,
            "failed to canonicalize root; falling back to lexical normalization"
        );
        normalize_path(root)
    })
}

/// Resolve `user_path` against `root` and confine the result to `root`.
///
/// The join is lexical: `.` and `..` segments are resolved without touching
/// the filesystem, so the target does not need to exist. An absolute
/// `user_path` is accepted only when it already points inside the root.
/// The empty string resolves to the root itself.
pub fn resolve_within(root: &Path, user_path: &str) -> Result<PathBuf, PathRejected> {
    let trimmed = user_path.trim();
    let candidate = Path::new(trimmed);
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    };

    let normalized_root = normalize_path(root);
    let normalized = normalize_path(&joined);

    if normalized.starts_with(&normalized_root) {
        Ok(normalized)
    } else {
        Err(PathRejected {
            path: user_path.to_string(),
        })
    }
}
