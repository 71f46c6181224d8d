use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::ErrorKind;
use crate::{CrossfsError, CrossfsResult};

use super::dir_entry::{DirEntry, DirEntryKind};
use super::traits::{FsBackend, TraversalCallback};

/* 📖 # Why an in-memory backend?

Deterministic traversal tests without filesystem side effects: no temp
directories, no OS-dependent entry order, easy to stage exact trees. The
BTreeMap keys are full paths, and path ordering is component-wise, so plain
iteration already yields the depth-first, name-sorted order the native
backend produces.
*/

/// In-memory backend for testing.
///
/// Stores a directory tree as a map from path to entry kind, plus
/// configurable current/home directories. All state sits behind
/// `Arc<Mutex<…>>`, so clones share storage and tests can run concurrently.
///
/// # Examples
///
/// ```
/// use crossfs::{FsBackend, MockBackend};
/// use std::path::Path;
///
/// let mock = MockBackend::new();
/// mock.add_directory("/tree");
/// mock.add_file("/tree/leaf.txt");
///
/// let mut seen = Vec::new();
/// mock.traverse_directory(Path::new("/tree"), false, &mut |entry| {
///     seen.push(entry.path().to_path_buf());
/// })
/// .unwrap();
/// assert_eq!(seen.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    entries: Arc<Mutex<BTreeMap<PathBuf, DirEntryKind>>>,
    current_dir: Arc<Mutex<Option<PathBuf>>>,
    home_dir: Arc<Mutex<Option<PathBuf>>>,
}

impl MockBackend {
    /// Create a new empty MockBackend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry to the mock tree.
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), DirEntryKind::File);
    }

    /// Add a directory entry to the mock tree.
    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .unwrap()
            .insert(path.into(), DirEntryKind::Directory);
    }

    /// Set the path returned by `current_dir`.
    pub fn set_current_dir(&self, path: impl Into<PathBuf>) {
        *self.current_dir.lock().unwrap() = Some(path.into());
    }

    /// Set the path returned by `home_dir`.
    pub fn set_home_dir(&self, path: impl Into<PathBuf>) {
        *self.home_dir.lock().unwrap() = Some(path.into());
    }
}

impl FsBackend for MockBackend {
    fn traverse_directory(
        &self,
        path: &Path,
        recursive: bool,
        callback: TraversalCallback<'_>,
    ) -> CrossfsResult<()> {
        let discovered = {
            let entries = self.entries.lock().unwrap();
            match entries.get(path) {
                Some(DirEntryKind::Directory) => {}
                Some(_) => {
                    return Err(Box::new(CrossfsError::new(ErrorKind::FileError {
                        path: path.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotADirectory,
                            "not a directory",
                        ),
                    })));
                }
                None => {
                    return Err(Box::new(CrossfsError::new(ErrorKind::FileError {
                        path: path.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "directory not found",
                        ),
                    })));
                }
            }

            let mut discovered = Vec::new();
            for (entry_path, kind) in entries.iter() {
                let Ok(relative) = entry_path.strip_prefix(path) else {
                    continue;
                };
                let depth = relative.components().count();
                if depth == 0 {
                    continue; // the traversal root itself
                }
                if !recursive && depth > 1 {
                    continue;
                }
                discovered.push(DirEntry::new(entry_path, *kind, depth));
            }
            discovered
        };

        // Lock released before delivery so callbacks may use the backend.
        for entry in &discovered {
            callback(entry);
        }
        Ok(())
    }

    fn current_dir(&self) -> CrossfsResult<PathBuf> {
        self.current_dir
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Box::new(CrossfsError::message("No current directory set in MockBackend")))
    }

    fn home_dir(&self) -> CrossfsResult<PathBuf> {
        self.home_dir
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Box::new(CrossfsError::message("No home directory set in MockBackend")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_tree() -> MockBackend {
        let mock = MockBackend::new();
        mock.add_directory("/tree");
        mock.add_file("/tree/beta.txt");
        mock.add_file("/tree/alpha.txt");
        mock.add_directory("/tree/nested");
        mock.add_file("/tree/nested/inner.txt");
        mock.add_file("/unrelated.txt");
        mock
    }

    fn collect_paths(mock: &MockBackend, root: &str, recursive: bool) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        mock.traverse_directory(Path::new(root), recursive, &mut |entry| {
            paths.push(entry.path().to_path_buf());
        })
        .unwrap();
        paths
    }

    #[test]
    fn test_flat_traversal_lists_direct_children() {
        let mock = staged_tree();
        let paths = collect_paths(&mock, "/tree", false);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/tree/alpha.txt"),
                PathBuf::from("/tree/beta.txt"),
                PathBuf::from("/tree/nested"),
            ]
        );
    }

    #[test]
    fn test_recursive_traversal_descends_depth_first() {
        let mock = staged_tree();
        let paths = collect_paths(&mock, "/tree", true);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/tree/alpha.txt"),
                PathBuf::from("/tree/beta.txt"),
                PathBuf::from("/tree/nested"),
                PathBuf::from("/tree/nested/inner.txt"),
            ]
        );
    }

    #[test]
    fn test_similarly_prefixed_siblings_are_not_included() {
        let mock = staged_tree();
        mock.add_directory("/tree2");
        mock.add_file("/tree2/stray.txt");

        let paths = collect_paths(&mock, "/tree", true);
        assert!(paths.iter().all(|p| p.starts_with("/tree")));
        assert!(!paths.contains(&PathBuf::from("/tree2/stray.txt")));
    }

    #[test]
    fn test_entry_kinds_and_depths() {
        let mock = staged_tree();
        let mut entries = Vec::new();
        mock.traverse_directory(Path::new("/tree"), true, &mut |entry| {
            entries.push(entry.clone());
        })
        .unwrap();

        let nested = entries
            .iter()
            .find(|e| e.path() == Path::new("/tree/nested"))
            .unwrap();
        assert!(nested.is_dir());
        assert_eq!(nested.depth(), 1);

        let inner = entries
            .iter()
            .find(|e| e.path() == Path::new("/tree/nested/inner.txt"))
            .unwrap();
        assert!(inner.is_file());
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn test_traversal_not_found_invokes_no_callback() {
        let mock = MockBackend::new();
        let mut invocations = 0;
        let result = mock.traverse_directory(Path::new("/missing"), true, &mut |_entry| {
            invocations += 1;
        });

        assert!(result.is_err());
        assert_eq!(invocations, 0);
    }

    #[test]
    fn test_traversal_on_file_is_an_error() {
        let mock = staged_tree();
        let result = mock.traverse_directory(Path::new("/tree/alpha.txt"), false, &mut |_e| {});
        assert!(result.is_err());
    }

    #[test]
    fn test_current_dir_configured_and_unset() {
        let mock = MockBackend::new();
        assert!(mock.current_dir().is_err());

        mock.set_current_dir("/work/project");
        assert_eq!(mock.current_dir().unwrap(), PathBuf::from("/work/project"));
    }

    #[test]
    fn test_home_dir_configured_and_unset() {
        let mock = MockBackend::new();
        assert!(mock.home_dir().is_err());

        mock.set_home_dir("/home/tester");
        assert_eq!(mock.home_dir().unwrap(), PathBuf::from("/home/tester"));
    }

    #[test]
    fn test_clone_shares_the_tree() {
        let mock = MockBackend::new();
        let clone = mock.clone();
        clone.add_directory("/shared");
        clone.add_file("/shared/file.txt");

        let paths = collect_paths(&mock, "/shared", false);
        assert_eq!(paths, vec![PathBuf::from("/shared/file.txt")]);
    }

    #[test]
    fn test_callback_may_call_back_into_the_backend() {
        let mock = staged_tree();
        mock.set_current_dir("/tree");

        let mut current_dirs = Vec::new();
        mock.traverse_directory(Path::new("/tree"), false, &mut |_entry| {
            current_dirs.push(mock.current_dir().unwrap());
        })
        .unwrap();

        assert_eq!(current_dirs.len(), 3);
    }
}
