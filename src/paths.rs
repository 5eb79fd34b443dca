//! Path normalization and common-ancestor reconciliation
//!
//! Every path operation is relative to an explicit base directory held by a
//! `PathResolver`, never the ambient process working directory. Normalized
//! paths are lexically cleaned and, when possible, expressed relative to the
//! base so that report rows stay environment-independent.

use crate::attribution::AttributionError;
use std::path::{Component, Path, PathBuf};

/// Marker returned when two paths share no common ancestor
pub const RELATIVE_ROOT: &str = ".";

/// Resolves user-supplied paths against an explicit base directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolver anchored at the process working directory
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Canonicalize a path: strip trailing separators, lexically resolve
    /// `.`/`..`, and rebase absolute paths under the base to relative form.
    ///
    /// Fails with `InvalidPath` when the target does not exist.
    pub fn normalize(&self, path: &Path) -> Result<PathBuf, AttributionError> {
        let cleaned = clean(path);

        let normalized = if cleaned.is_absolute() {
            match cleaned.strip_prefix(&self.base) {
                Ok(rebased) if rebased.as_os_str().is_empty() => PathBuf::from(RELATIVE_ROOT),
                Ok(rebased) => rebased.to_path_buf(),
                // Absolute paths outside the base stay absolute
                Err(_) => cleaned,
            }
        } else {
            cleaned
        };

        if !self.absolute(&normalized).exists() {
            return Err(AttributionError::InvalidPath {
                path: path.to_path_buf(),
                base: self.base.clone(),
            });
        }

        Ok(normalized)
    }

    /// Rejoin a normalized path onto the base for filesystem access
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            clean(&self.base.join(path))
        }
    }
}

/// Lexically clean a path: drop `.` segments, fold `..` onto preceding
/// segments, and strip trailing separators. No filesystem access.
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(cleaned.components().next_back(), Some(Component::Normal(_)));
                let last_is_root =
                    matches!(cleaned.components().next_back(), Some(Component::RootDir));
                if last_is_normal {
                    cleaned.pop();
                } else if !last_is_root {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other),
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(RELATIVE_ROOT);
    }

    cleaned
}

/// Nearest common ancestor of two normalized paths
///
/// Equal paths reconcile to themselves. Otherwise the longest shared leading
/// segment sequence wins; two paths with no shared leading segment reconcile
/// to the relative root marker `"."`.
pub fn reconcile(a: &Path, b: &Path) -> PathBuf {
    if a == b {
        return a.to_path_buf();
    }

    let mut shared = PathBuf::new();
    for (left, right) in a.components().zip(b.components()) {
        if left != right {
            break;
        }
        shared.push(left);
    }

    if shared.as_os_str().is_empty() {
        PathBuf::from(RELATIVE_ROOT)
    } else {
        shared
    }
}
