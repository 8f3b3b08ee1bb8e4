//! Symlink-aware joining of an untrusted name onto a trusted base directory.
//!
//! The walk never hands a `..` or a symlink to the OS. Each component is
//! `lstat`ed as it is reached, symlinks are expanded in place, and the
//! depth below the base is checked on every step. The returned path is
//! therefore made only of real directories (or not-yet-existing names)
//! below the base, as observed during the walk.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::constants::MAX_SYMLINK_FOLLOWS;
use crate::error::ResolveError;
use crate::path::ResolvedPath;

/// Resolve `name` below `base` with the default symlink budget.
///
/// See [`Resolver::resolve`].
pub fn resolve(
    base: impl AsRef<Path>,
    name: impl AsRef<Path>,
) -> Result<ResolvedPath, ResolveError> {
    Resolver::new(base.as_ref()).resolve(name)
}

/// Resolves names below one base directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    base: PathBuf,
    max_symlinks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Up,
    Down(OsString),
}

impl Resolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            max_symlinks: MAX_SYMLINK_FOLLOWS,
        }
    }

    /// Change how many symlinks a single resolution may follow.
    pub fn with_max_symlinks(mut self, max_symlinks: usize) -> Self {
        self.max_symlinks = max_symlinks;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Join `name` onto the base, following symlinks without leaving it.
    ///
    /// A leading `/` in `name` is ignored: the name is always taken
    /// relative to the base. Components that do not exist yet are kept
    /// as-is, so the result may name a file that is about to be created.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MissingBase`] if the base is empty (checked first,
    ///   before any filesystem access).
    /// - [`ResolveError::Escape`] if a `..` or a symlink target would leave
    ///   the base.
    /// - [`ResolveError::TooManySymlinks`] once the symlink budget is spent.
    /// - [`ResolveError::Io`] for any other failure while inspecting a
    ///   component.
    pub fn resolve(&self, name: impl AsRef<Path>) -> Result<ResolvedPath, ResolveError> {
        if self.base.as_os_str().is_empty() {
            return Err(ResolveError::MissingBase);
        }
        let name = name.as_ref();
        let base = std::path::absolute(&self.base).map_err(|e| ResolveError::io(&self.base, e))?;
        let escape = || ResolveError::Escape {
            base: base.clone(),
            name: name.to_path_buf(),
        };

        let mut pending: VecDeque<Step> = steps(name).collect();
        let mut current = base.clone();
        let mut depth = 0usize;
        let mut followed = 0usize;

        while let Some(step) = pending.pop_front() {
            let segment = match step {
                Step::Up => {
                    if depth == 0 {
                        return Err(escape());
                    }
                    current.pop();
                    depth -= 1;
                    continue;
                }
                Step::Down(segment) => segment,
            };

            current.push(&segment);
            depth += 1;

            let metadata = match fs::symlink_metadata(&current) {
                Ok(metadata) => metadata,
                Err(e) if is_absent(&e) => continue,
                Err(e) => return Err(ResolveError::io(current, e)),
            };
            if !metadata.file_type().is_symlink() {
                continue;
            }

            followed += 1;
            if followed > self.max_symlinks {
                return Err(ResolveError::TooManySymlinks {
                    base: base.clone(),
                    name: name.to_path_buf(),
                });
            }
            let target = fs::read_link(&current).map_err(|e| ResolveError::io(&current, e))?;
            tracing::debug!(
                link = %current.display(),
                target = %target.display(),
                "Following symlink"
            );

            // The link itself is replaced by its target.
            current.pop();
            depth -= 1;

            if target.is_absolute() {
                let inner = contained_remainder(&base, &target).ok_or_else(escape)?;
                current = base.clone();
                depth = 0;
                splice(&mut pending, &inner);
            } else {
                splice(&mut pending, &target);
            }
        }

        Ok(ResolvedPath::new(current))
    }
}

/// Break a path into walk steps. Root, prefix and `.` components carry no
/// movement below the base and are dropped.
fn steps(path: &Path) -> impl Iterator<Item = Step> + '_ {
    path.components().filter_map(|component| match component {
        Component::Normal(segment) => Some(Step::Down(segment.to_os_string())),
        Component::ParentDir => Some(Step::Up),
        Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
    })
}

fn splice(pending: &mut VecDeque<Step>, target: &Path) {
    let expanded: Vec<Step> = steps(target).collect();
    for step in expanded.into_iter().rev() {
        pending.push_front(step);
    }
}

/// The part of an absolute symlink target below `base`, if any.
///
/// Targets written against the canonical form of the base (e.g. when the
/// base itself sits behind a symlink) are accepted as well.
fn contained_remainder(base: &Path, target: &Path) -> Option<PathBuf> {
    remainder_below(base, target).or_else(|| {
        let canonical = fs::canonicalize(base).ok()?;
        remainder_below(&canonical, target)
    })
}

/// Walk `target` lexically and return what follows the last point at which
/// it stands exactly on `base`.
///
/// `..` before that point is folded lexically, so `<base>/../<name>/x` is
/// accepted. Anything after it is left to the caller's checked walk.
fn remainder_below(base: &Path, target: &Path) -> Option<PathBuf> {
    let mut base_stack = Vec::new();
    for component in base.components() {
        push_lexical(&mut base_stack, component);
    }

    let components: Vec<Component<'_>> = target.components().collect();
    let mut stack = Vec::new();
    let mut split = None;
    for (i, component) in components.iter().enumerate() {
        push_lexical(&mut stack, *component);
        if stack == base_stack {
            split = Some(i + 1);
        }
    }
    split.map(|i| components[i..].iter().collect())
}

fn push_lexical<'a>(stack: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {}
        Component::ParentDir => {
            if matches!(stack.last(), Some(Component::Normal(_))) {
                stack.pop();
            }
        }
        other => stack.push(other),
    }
}

// ENOTDIR shows up when a prefix of the name is a regular file; the
// remainder is then kept lexically, like a missing component.
fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
