//! Error types for cgroup-fs

use std::path::PathBuf;

/// Result type for cgroup-fs facade operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving a name below a base directory.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no base directory given")]
    MissingBase,

    #[error("path {name:?} escapes base directory {base}")]
    Escape { base: PathBuf, name: PathBuf },

    #[error("too many levels of symbolic links resolving {name:?} in {base}")]
    TooManySymlinks { base: PathBuf, name: PathBuf },

    #[error("I/O error at {path} while resolving: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure is a containment violation rather than an I/O problem.
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape { .. })
    }
}

/// Errors returned by [`write_file`](crate::write_file) and [`read_file`](crate::read_file).
///
/// The write path wraps its failures with context (file name, payload,
/// destination) while the read path passes resolver and I/O errors through
/// unchanged. Callers matching on error text rely on that difference.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no directory specified for {file}")]
    MissingDirectory { file: PathBuf },

    #[error("failed to resolve {file}: {source}")]
    Path {
        file: PathBuf,
        #[source]
        source: ResolveError,
    },

    /// Carries the payload verbatim, so it ends up in logs with the message.
    #[error("failed to write {data:?} to {path}: {source}")]
    Write {
        data: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Resolve(ResolveError),

    #[error(transparent)]
    Io(std::io::Error),

    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to parse control file options: {message}")]
    ConfigParse { message: String },
}

impl Error {
    pub fn missing_directory(file: impl Into<PathBuf>) -> Self {
        Self::MissingDirectory { file: file.into() }
    }

    pub fn write(data: &[u8], path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            data: String::from_utf8_lossy(data).into_owned(),
            path: path.into(),
            source,
        }
    }

    /// The resolver failure behind this error, wrapped or not.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Self::Path { source, .. } | Self::Resolve(source) => Some(source),
            _ => None,
        }
    }

    /// The underlying OS error, if the failure came from the write or read itself.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Write { source, .. } | Self::Io(source) => Some(source),
            _ => None,
        }
    }
}
