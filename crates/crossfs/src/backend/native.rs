use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::ErrorKind;
use crate::{CrossfsError, CrossfsResult};

use super::dir_entry::{DirEntry, DirEntryKind};
use super::traits::{FsBackend, TraversalCallback};

/* 📖 # Why std::fs and walkdir instead of per-OS syscalls?

std::fs and walkdir already are the portable native layer for every target
this backend is bound on. Hand-written readdir/FindFirstFileW plumbing would
buy nothing but bugs; the interesting per-platform differences (path
separators, home directory lookup) are small and isolated below.
*/

/// Filesystem backend for targets with native support, built on `std::fs`
/// and `walkdir`.
///
/// Traversal order is deterministic: entries are sorted by file name within
/// each directory, and recursive traversal is depth-first. Symlinks are not
/// followed and are reported as [`DirEntryKind::Other`]. Enumeration
/// completes before the first callback fires, so an enumeration failure
/// yields zero callback invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl NativeBackend {
    pub fn new() -> Self {
        Self
    }
}

fn entry_kind(file_type: fs::FileType) -> DirEntryKind {
    if file_type.is_dir() {
        DirEntryKind::Directory
    } else if file_type.is_file() {
        DirEntryKind::File
    } else {
        DirEntryKind::Other
    }
}

#[cfg(unix)]
fn home_dir_from_env() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir_from_env() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl FsBackend for NativeBackend {
    #[instrument(skip(self, callback), fields(path = %path.display(), recursive))]
    fn traverse_directory(
        &self,
        path: &Path,
        recursive: bool,
        callback: TraversalCallback<'_>,
    ) -> CrossfsResult<()> {
        let metadata = fs::metadata(path).map_err(|e| {
            debug!(error = %e, "cannot stat traversal root");
            Box::new(CrossfsError::new(ErrorKind::FileError {
                path: path.to_path_buf(),
                source: e,
            }))
        })?;
        if !metadata.is_dir() {
            debug!("traversal root is not a directory");
            return Err(Box::new(CrossfsError::new(ErrorKind::FileError {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            })));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };

        // Enumerate everything before delivering anything: a failed walk must
        // not reach the callback, even partially.
        let mut discovered = Vec::new();
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                debug!(error = %e, "error walking directory");
                let failed_path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| path.to_path_buf());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                Box::new(CrossfsError::new(ErrorKind::FileError {
                    path: failed_path,
                    source,
                }))
            })?;
            discovered.push(DirEntry::new(
                entry.path(),
                entry_kind(entry.file_type()),
                entry.depth(),
            ));
        }

        debug!(entries = discovered.len(), "delivering traversal entries");
        for entry in &discovered {
            callback(entry);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn current_dir(&self) -> CrossfsResult<PathBuf> {
        let dir = std::env::current_dir().map_err(|e| {
            debug!(error = %e, "failed to resolve current directory");
            Box::new(CrossfsError::new(ErrorKind::FileError {
                path: PathBuf::from("<current_dir>"),
                source: e,
            }))
        })?;
        debug!(dir = %dir.display(), "resolved current directory");
        Ok(dir)
    }

    #[instrument(skip(self))]
    fn home_dir(&self) -> CrossfsResult<PathBuf> {
        let home = home_dir_from_env().ok_or_else(|| {
            debug!("home directory not present in the environment");
            Box::new(CrossfsError::message(
                "Home directory is not set in the environment",
            ))
        })?;
        debug!(home = %home.display(), "resolved home directory");
        Ok(home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collect_names(backend: &NativeBackend, root: &Path, recursive: bool) -> Vec<String> {
        let mut names = Vec::new();
        backend
            .traverse_directory(root, recursive, &mut |entry| {
                names.push(entry.file_name().unwrap().to_string_lossy().to_string());
            })
            .unwrap();
        names
    }

    fn setup_tree() -> TempDir {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("beta.txt"), "b").unwrap();
        fs::write(temp_dir.path().join("alpha.txt"), "a").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("inner.txt"), "i").unwrap();
        temp_dir
    }

    #[test]
    fn test_flat_traversal_lists_top_level_sorted() {
        let temp_dir = setup_tree();
        let names = collect_names(&NativeBackend::new(), temp_dir.path(), false);
        assert_eq!(names, vec!["alpha.txt", "beta.txt", "nested"]);
    }

    #[test]
    fn test_recursive_traversal_is_depth_first() {
        let temp_dir = setup_tree();
        let names = collect_names(&NativeBackend::new(), temp_dir.path(), true);
        assert_eq!(names, vec!["alpha.txt", "beta.txt", "nested", "inner.txt"]);
    }

    #[test]
    fn test_entry_kinds_and_depths() {
        let temp_dir = setup_tree();
        let mut entries = Vec::new();
        NativeBackend::new()
            .traverse_directory(temp_dir.path(), true, &mut |entry| {
                entries.push(entry.clone());
            })
            .unwrap();

        let nested = entries.iter().find(|e| e.path().ends_with("nested")).unwrap();
        assert_eq!(nested.kind(), DirEntryKind::Directory);
        assert_eq!(nested.depth(), 1);

        let inner = entries
            .iter()
            .find(|e| e.path().ends_with("inner.txt"))
            .unwrap();
        assert_eq!(inner.kind(), DirEntryKind::File);
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn test_traversal_not_found_invokes_no_callback() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let mut invocations = 0;
        let result = NativeBackend::new().traverse_directory(&missing, true, &mut |_entry| {
            invocations += 1;
        });

        assert!(result.is_err());
        assert_eq!(invocations, 0);
    }

    #[test]
    fn test_traversal_on_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "content").unwrap();

        let mut invocations = 0;
        let result = NativeBackend::new().traverse_directory(&file, false, &mut |_entry| {
            invocations += 1;
        });

        assert!(result.is_err());
        assert_eq!(invocations, 0);
    }

    #[test]
    fn test_empty_directory_yields_zero_entries() {
        let temp_dir = TempDir::new().unwrap();
        let names = collect_names(&NativeBackend::new(), temp_dir.path(), true);
        assert!(names.is_empty());
    }

    #[test]
    fn test_current_dir_is_absolute() {
        let dir = NativeBackend::new().current_dir().unwrap();
        assert!(dir.is_absolute());
        assert_eq!(dir, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_home_dir_matches_environment() {
        let backend = NativeBackend::new();
        match home_dir_from_env() {
            Some(expected) => assert_eq!(backend.home_dir().unwrap(), expected),
            None => assert!(backend.home_dir().is_err()),
        }
    }

    #[test]
    fn test_order_is_stable_within_unchanged_directory() {
        let temp_dir = setup_tree();
        let backend = NativeBackend::new();
        let first = collect_names(&backend, temp_dir.path(), true);
        let second = collect_names(&backend, temp_dir.path(), true);
        assert_eq!(first, second);
    }
}
