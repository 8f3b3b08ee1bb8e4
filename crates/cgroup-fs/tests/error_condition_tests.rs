//! Tests for error handling under adverse filesystem conditions
//!
//! These tests verify that cgroup-fs reports real error conditions without
//! retrying them.

use cgroup_fs::{Error, read_file, write_file};
use tempfile::tempdir;

#[test]
fn write_into_nonexistent_directory_returns_write_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-cgroup");

    let err = write_file(&missing, "memory.max", "1").unwrap_err();

    let Error::Write { source, .. } = &err else {
        panic!("expected write error, got {err:?}");
    };
    assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    assert!(!missing.exists(), "directories must never be created");
}

#[test]
fn read_from_nonexistent_directory_returns_raw_io_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-cgroup");

    let err = read_file(&missing, "memory.max").unwrap_err();

    assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn read_of_a_directory_returns_error() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("child")).unwrap();

    let err = read_file(dir.path(), "child").unwrap_err();

    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn write_to_readonly_directory_returns_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let readonly_dir = dir.path().join("readonly");
        fs::create_dir(&readonly_dir).unwrap();
        fs::set_permissions(&readonly_dir, Permissions::from_mode(0o555)).unwrap();

        let result = write_file(&readonly_dir, "memory.max", "1");

        // Restore permissions before assertions (for cleanup)
        let _ = fs::set_permissions(&readonly_dir, Permissions::from_mode(0o755));

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Write { .. }), "got {err:?}");
        assert_eq!(
            err.io_error().map(std::io::Error::kind),
            Some(std::io::ErrorKind::PermissionDenied)
        );
    }

    #[test]
    fn read_permission_denied_returns_raw_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("memory.stat");
        fs::write(&file_path, "anon 0").unwrap();
        fs::set_permissions(&file_path, Permissions::from_mode(0o000)).unwrap();

        let result = read_file(dir.path(), "memory.stat");

        let _ = fs::set_permissions(&file_path, Permissions::from_mode(0o644));

        let err = result.unwrap_err();
        assert!(
            matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied),
            "got {err:?}"
        );
    }

    #[test]
    fn unreadable_intermediate_directory_is_a_resolution_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();

        let write = write_file(dir.path(), "locked/inner/memory.max", "1");
        let read = read_file(dir.path(), "locked/inner/memory.max");

        let _ = fs::set_permissions(&locked, Permissions::from_mode(0o755));

        assert!(matches!(write.unwrap_err(), Error::Path { .. }));
        assert!(matches!(read.unwrap_err(), Error::Resolve(_)));
    }
}
