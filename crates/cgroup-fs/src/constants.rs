//! Fixed parameters shared by the resolver and the writer.

/// Permission bits used when a control file has to be created.
///
/// Owner rwx, nothing for group/others. Must stay byte-for-byte `0700`,
/// execute bit included.
pub const CONTROL_FILE_MODE: u32 = 0o700;

/// Upper bound on symlinks followed during one resolution.
pub const MAX_SYMLINK_FOLLOWS: usize = 255;
