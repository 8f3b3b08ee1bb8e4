//! Resolve-then-I/O entry points for control files.

use std::path::Path;

use crate::config::ControlFileOptions;
use crate::io::{self, InterruptObserver, TracingObserver};
use crate::path::ResolvedPath;
use crate::resolve::Resolver;
use crate::{Error, Result};

/// Write `data` to `file` inside `dir`, creating it with mode `0700` if needed.
///
/// Uses [`ControlFiles::default`]: interrupted writes are retried and
/// reported through `tracing`.
///
/// # Errors
///
/// - [`Error::MissingDirectory`] when `dir` is empty.
/// - [`Error::Path`] when `file` cannot be resolved inside `dir`.
/// - [`Error::Write`] when the write fails. Its message contains `data`.
pub fn write_file(
    dir: impl AsRef<Path>,
    file: impl AsRef<Path>,
    data: impl AsRef<[u8]>,
) -> Result<()> {
    defaults().write(dir, file, data)
}

/// Read the whole of `file` inside `dir`.
///
/// # Errors
///
/// - [`Error::MissingDirectory`] when `dir` is empty.
/// - [`Error::Resolve`] with the resolver's error, unwrapped.
/// - [`Error::Io`] with the read error, unwrapped.
pub fn read_file(dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<Vec<u8>> {
    defaults().read(dir, file)
}

/// Like [`read_file`], but requires the contents to be UTF-8.
pub fn read_file_string(dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<String> {
    defaults().read_string(dir, file)
}

fn defaults() -> ControlFiles {
    ControlFiles::default()
}

/// Control-file access with explicit options and retry observer.
#[derive(Debug, Clone)]
pub struct ControlFiles<O = TracingObserver> {
    options: ControlFileOptions,
    observer: O,
}

impl Default for ControlFiles {
    fn default() -> Self {
        Self::new(ControlFileOptions::default(), TracingObserver)
    }
}

impl<O: InterruptObserver> ControlFiles<O> {
    /// Build a facade from explicit options.
    ///
    /// A `mode` other than [`CONTROL_FILE_MODE`](crate::CONTROL_FILE_MODE)
    /// creates files that other cgroup tooling does not expect; see
    /// [`ControlFileOptions::mode`].
    pub fn new(options: ControlFileOptions, observer: O) -> Self {
        Self { options, observer }
    }

    pub fn options(&self) -> &ControlFileOptions {
        &self.options
    }

    /// See [`write_file`].
    pub fn write(
        &self,
        dir: impl AsRef<Path>,
        file: impl AsRef<Path>,
        data: impl AsRef<[u8]>,
    ) -> Result<()> {
        let (dir, file, data) = (dir.as_ref(), file.as_ref(), data.as_ref());
        if dir.as_os_str().is_empty() {
            return Err(Error::missing_directory(file));
        }

        let path = self.resolver(dir).resolve(file).map_err(|source| Error::Path {
            file: file.to_path_buf(),
            source,
        })?;

        io::write_all(path.as_path(), data, self.options.mode, &self.observer)
            .map_err(|e| Error::write(data, path.as_path(), e))?;

        tracing::trace!(path = %path, bytes = data.len(), "Wrote control file");
        Ok(())
    }

    /// See [`read_file`].
    pub fn read(&self, dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = self.resolve_for_read(dir.as_ref(), file.as_ref())?;
        let data = io::read_all(path.as_path()).map_err(Error::Io)?;

        tracing::trace!(path = %path, bytes = data.len(), "Read control file");
        Ok(data)
    }

    /// See [`read_file_string`].
    pub fn read_string(&self, dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<String> {
        let path = self.resolve_for_read(dir.as_ref(), file.as_ref())?;
        let data = io::read_all(path.as_path()).map_err(Error::Io)?;
        String::from_utf8(data).map_err(|source| Error::InvalidUtf8 {
            path: path.into_path_buf(),
            source,
        })
    }

    fn resolve_for_read(&self, dir: &Path, file: &Path) -> Result<ResolvedPath> {
        if dir.as_os_str().is_empty() {
            return Err(Error::missing_directory(file));
        }
        self.resolver(dir).resolve(file).map_err(Error::Resolve)
    }

    fn resolver(&self, dir: &Path) -> Resolver {
        Resolver::new(dir).with_max_symlinks(self.options.max_symlinks)
    }
}
