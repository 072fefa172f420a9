// Path selector: the configured subset of the live save directory that
// takes part in sync operations. Pure data and predicates, no filesystem
// access. Entries keep insertion order so progress reporting is
// reproducible between runs.

use crate::error::{Result, VaultError};

/// One configured path, relative to the live save root.
/// POSIX-style separators, directories may carry a trailing '/'.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEntry {
    pub relative_path: String,
    pub included: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PathSelector {
    entries: Vec<PathEntry>,
}

/// Validate and normalize a selector path.
/// Rejects empty, absolute and traversing paths; strips the trailing '/'
/// that directory entries conventionally carry.
pub fn normalize_rel_path(path: &str) -> Result<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(VaultError::InvalidPath(path.to_string()));
    }
    if path.starts_with('/') || path.contains('\\') {
        return Err(VaultError::InvalidPath(path.to_string()));
    }
    if trimmed.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(VaultError::InvalidPath(path.to_string()));
    }
    Ok(trimmed.to_string())
}

impl PathSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selector from (path, included) pairs, keeping their order.
    /// Later duplicates overwrite the flag of the first occurrence.
    pub fn from_entries<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let mut selector = Self::new();
        for (path, included) in pairs {
            selector.set_included(&path, included)?;
        }
        Ok(selector)
    }

    /// Set or update the inclusion flag for a path.
    pub fn set_included(&mut self, path: &str, included: bool) -> Result<()> {
        let normalized = normalize_rel_path(path)?;
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.relative_path == normalized)
        {
            entry.included = included;
        } else {
            self.entries.push(PathEntry {
                relative_path: normalized,
                included,
            });
        }
        Ok(())
    }

    pub fn is_included(&self, path: &str) -> bool {
        let Ok(normalized) = normalize_rel_path(path) else {
            return false;
        };
        self.entries
            .iter()
            .any(|e| e.relative_path == normalized && e.included)
    }

    /// Included paths in insertion order.
    pub fn active_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.included)
            .map(|e| e.relative_path.as_str())
    }

    /// Every configured entry, included or not (for config persistence).
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        !self.entries.iter().any(|e| e.included)
    }
}
