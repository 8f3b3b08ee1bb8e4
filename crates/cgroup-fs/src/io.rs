//! Whole-file writes and reads against pseudo-filesystem control files.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Receives a report every time a write is re-issued after `EINTR`.
///
/// Implemented for any `Fn(&Path, &[u8])`, so tests can count retries
/// with a closure.
pub trait InterruptObserver {
    fn interrupted(&self, path: &Path, data: &[u8]);
}

impl<F> InterruptObserver for F
where
    F: Fn(&Path, &[u8]),
{
    fn interrupted(&self, path: &Path, data: &[u8]) {
        self(path, data)
    }
}

/// Reports retries as `tracing` events at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl InterruptObserver for TracingObserver {
    fn interrupted(&self, path: &Path, data: &[u8]) {
        tracing::info!(
            path = %path.display(),
            data = %String::from_utf8_lossy(data),
            "Interrupted while writing control file, retrying"
        );
    }
}

/// Create or truncate `path` and write all of `data` to it.
///
/// `mode` is applied when the file is created (Unix only). An attempt that
/// fails with [`io::ErrorKind::Interrupted`] is re-issued from the open
/// onwards, with no limit and no delay; `observer` hears about each one.
/// Every other error is returned as-is.
pub fn write_all(
    path: &Path,
    data: &[u8],
    mode: u32,
    observer: &dyn InterruptObserver,
) -> io::Result<()> {
    write_all_with(path, data, observer, || open_truncating(path, mode))
}

/// Run `attempt` until it finishes with anything other than `Interrupted`.
///
/// `path` and `data` are only used for the observer report.
pub fn retry_interrupted<F>(
    path: &Path,
    data: &[u8],
    observer: &dyn InterruptObserver,
    mut attempt: F,
) -> io::Result<()>
where
    F: FnMut() -> io::Result<()>,
{
    loop {
        match attempt() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => observer.interrupted(path, data),
            result => return result,
        }
    }
}

/// Read the full contents of `path`.
///
/// No retry wrapping here, unlike [`write_all`].
pub fn read_all(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

// Each attempt starts from a fresh `open`, so a retry rewrites the file
// from its first byte.
fn write_all_with<W, F>(
    path: &Path,
    data: &[u8],
    observer: &dyn InterruptObserver,
    mut open: F,
) -> io::Result<()>
where
    W: Write,
    F: FnMut() -> io::Result<W>,
{
    retry_interrupted(path, data, observer, || write_whole(&mut open()?, data))
}

fn open_truncating(path: &Path, mode: u32) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

// EINTR must surface from here so the caller restarts the whole write.
// `Write::write_all` would resume mid-buffer instead.
fn write_whole(writer: &mut impl Write, data: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < data.len() {
        match writer.write(&data[written..])? {
            0 => return Err(io::Error::from(io::ErrorKind::WriteZero)),
            n => written += n,
        }
    }
    Ok(())
}
