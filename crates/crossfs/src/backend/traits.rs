use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::CrossfsResult;

use super::TargetBackend;
use super::dir_entry::DirEntry;

/// Callback invoked once per entry discovered during traversal.
///
/// Invocations happen strictly sequentially on the calling thread, and the
/// whole traversal completes before `traverse_directory` returns. The
/// contract offers no mid-traversal cancellation; a caller wanting early
/// termination has the callback flip state it closes over and ignores the
/// remaining invocations.
pub type TraversalCallback<'a> = &'a mut dyn FnMut(&DirEntry);

/* 📖 # Why is FsBackend a trait instead of three free functions?

The bound implementation differs per build target, and tests need to exercise
callers against deterministic in-memory state. A trait keeps callers on the
abstraction: NativeBackend on supported targets, FallbackBackend elsewhere,
MockBackend in tests — all through the same three operations.
*/

/// The filesystem contract: the entire public surface of this crate.
///
/// Three implementations exist:
/// - `NativeBackend`: real filesystem, bound on targets with native support
/// - `FallbackBackend`: diagnostic-and-empty-result, bound everywhere else
/// - `MockBackend`: in-memory tree for tests
///
/// Failure is never fatal: every error is a normal return the caller can
/// check, and no operation mutates the filesystem.
pub trait FsBackend: std::fmt::Debug + Send + Sync + 'static {
    /// Enumerate the entries of `path`, reporting each through `callback`.
    ///
    /// With `recursive` set, subdirectories are descended into depth-first;
    /// otherwise only top-level entries are reported. Entry order is
    /// backend-defined but stable for an unchanged directory within one
    /// call. On failure the callback is not invoked at all.
    fn traverse_directory(
        &self,
        path: &Path,
        recursive: bool,
        callback: TraversalCallback<'_>,
    ) -> CrossfsResult<()>;

    /// The process's current working directory, in absolute form.
    ///
    /// The returned path is exclusively owned by the caller; the backend
    /// retains no alias to it.
    fn current_dir(&self) -> CrossfsResult<PathBuf>;

    /// The invoking user's home directory.
    ///
    /// Same ownership contract as [`FsBackend::current_dir`].
    fn home_dir(&self) -> CrossfsResult<PathBuf>;
}

/// Handle to a backend, enabling shared ownership.
///
/// Internally wraps `Arc<dyn FsBackend>` for cheap cloning and thread-safe
/// sharing. Can be cloned and passed around freely without lifetime concerns.
///
/// # Examples
///
/// ```
/// use crossfs::BackendHandle;
///
/// let fs = BackendHandle::platform_default();
/// let fs_clone = fs.clone(); // Cheap clone, shares the same backend
/// ```
#[derive(Debug, Clone)]
pub struct BackendHandle(Arc<dyn FsBackend>);

impl BackendHandle {
    /// Create a new BackendHandle from a backend implementation.
    pub fn new(backend: impl FsBackend + 'static) -> Self {
        Self(Arc::new(backend))
    }

    /// The backend selected for this build target.
    ///
    /// This is the composition point where the compile-time selection is
    /// injected into the rest of the system; the binding is fixed for the
    /// process lifetime.
    pub fn platform_default() -> Self {
        Self::new(TargetBackend::default())
    }
}

impl std::ops::Deref for BackendHandle {
    type Target = dyn FsBackend;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
