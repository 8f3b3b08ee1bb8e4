//! The output of a successful resolution.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// An absolute path that was contained in its base directory at the
/// moment it was resolved.
///
/// Only [`Resolver`](crate::Resolver) builds these. The guarantee does not
/// outlive the resolution: the filesystem may change afterwards, so a
/// `ResolvedPath` should be used for one operation and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    inner: PathBuf,
}

impl ResolvedPath {
    pub(crate) fn new(inner: PathBuf) -> Self {
        Self { inner }
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.inner
    }

    /// Last component, if the resolution did not end at the base itself.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.inner.file_name()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl std::fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

impl From<ResolvedPath> for PathBuf {
    fn from(p: ResolvedPath) -> Self {
        p.inner
    }
}
