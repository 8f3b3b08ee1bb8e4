//! Tunables for the facade.

use serde::{Deserialize, Serialize};

use crate::constants::{CONTROL_FILE_MODE, MAX_SYMLINK_FOLLOWS};
use crate::{Error, Result};

/// Options used by [`ControlFiles`](crate::ControlFiles).
///
/// Missing keys fall back to the defaults, so an empty document yields
/// `ControlFileOptions::default()`.
///
/// ```toml
/// mode = 0o700
/// max_symlinks = 255
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlFileOptions {
    /// Permission bits for newly created control files.
    ///
    /// Defaults to [`CONTROL_FILE_MODE`]. Other tooling that manages the
    /// same hierarchy expects files created with that mode, so any other
    /// value breaks compatibility with it. Only override this for
    /// hierarchies this crate owns outright. The free functions
    /// ([`write_file`](crate::write_file) and friends) always use the default.
    pub mode: u32,
    /// Symlink budget for each resolution.
    pub max_symlinks: usize,
}

impl Default for ControlFileOptions {
    fn default() -> Self {
        Self {
            mode: CONTROL_FILE_MODE,
            max_symlinks: MAX_SYMLINK_FOLLOWS,
        }
    }
}

impl ControlFileOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
        })
    }
}
