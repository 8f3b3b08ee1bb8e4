//! Hardened access to kernel pseudo-filesystem control files
//!
//! Joins an untrusted file name onto a trusted directory without letting
//! `..` or symlinks lead outside it, then writes or reads the file in one
//! shot. Writes interrupted by a signal are re-issued until they complete.
//!
//! ```no_run
//! cgroup_fs::write_file("/sys/fs/cgroup/demo", "memory.max", "1048576")?;
//! let limit = cgroup_fs::read_file("/sys/fs/cgroup/demo", "memory.max")?;
//! # Ok::<(), cgroup_fs::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod files;
pub mod io;
pub mod path;
pub mod resolve;

pub use config::ControlFileOptions;
pub use constants::{CONTROL_FILE_MODE, MAX_SYMLINK_FOLLOWS};
pub use error::{Error, ResolveError, Result};
pub use files::{ControlFiles, read_file, read_file_string, write_file};
pub use io::{InterruptObserver, TracingObserver};
pub use path::ResolvedPath;
pub use resolve::{Resolver, resolve};
