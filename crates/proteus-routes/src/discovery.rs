//! Presenter discovery.

use crate::{RouteError, RouteResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Source of presenter names and their modification signature.
///
/// The signature must change whenever the presenter set or any presenter
/// source changes; the cached factory folds it into its cache key so stale
/// tables are never served.
pub trait PresenterDiscovery: Send + Sync + 'static {
    /// Discovered presenter names, in a stable order.
    fn presenters(&self) -> RouteResult<Vec<String>>;

    /// Opaque signature over the current state of the presenter set.
    fn modification_signature(&self) -> RouteResult<String>;
}

/// Discovers presenters by scanning a source tree.
///
/// A file counts as a presenter when its stem ends with `presenter`
/// (case-insensitive); the presenter name is the stem with that suffix and
/// any separating `_` removed, so both `UsersPresenter.rs` and
/// `users_presenter.rs` yield `Users` and `users` respectively. Results are
/// sorted by name. The modification signature hashes every presenter path
/// with its mtime, recursively.
#[derive(Debug, Clone)]
pub struct FilesystemDiscovery {
    root: PathBuf,
}

const PRESENTER_SUFFIX: &str = "presenter";

impl FilesystemDiscovery {
    /// Creates a discovery rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The presenter root this discovery scans.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan(&self) -> RouteResult<Vec<(String, PathBuf)>> {
        let mut found = Vec::new();
        self.scan_dir(&self.root, &mut found)?;
        found.sort();
        Ok(found)
    }

    fn scan_dir(&self, dir: &Path, found: &mut Vec<(String, PathBuf)>) -> RouteResult<()> {
        let entries =
            std::fs::read_dir(dir).map_err(|e| RouteError::discovery(&self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| RouteError::discovery(&self.root, e))?;
            let path = entry.path();
            if path.is_dir() {
                self.scan_dir(&path, found)?;
            } else if let Some(name) = presenter_name(&path) {
                found.push((name, path));
            }
        }
        Ok(())
    }
}

fn presenter_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let lower = stem.to_ascii_lowercase();
    let trimmed = lower.strip_suffix(PRESENTER_SUFFIX)?;
    let name = &stem[..trimmed.trim_end_matches('_').len()];
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

impl PresenterDiscovery for FilesystemDiscovery {
    fn presenters(&self) -> RouteResult<Vec<String>> {
        Ok(self.scan()?.into_iter().map(|(name, _)| name).collect())
    }

    fn modification_signature(&self) -> RouteResult<String> {
        let mut hasher = Sha256::new();
        for (name, path) in self.scan()? {
            let metadata =
                std::fs::metadata(&path).map_err(|e| RouteError::discovery(&self.root, e))?;
            let mtime = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_nanos());
            hasher.update(name.as_bytes());
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(mtime.to_le_bytes());
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}
