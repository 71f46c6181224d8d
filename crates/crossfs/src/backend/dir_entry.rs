use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// What kind of filesystem object a traversal entry is.
///
/// `Other` covers entries that are neither regular files nor directories
/// (symlinks, sockets, devices). Callers only recurse into `Directory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirEntryKind {
    File,
    Directory,
    Other,
}

/// A single filesystem entry discovered during traversal.
///
/// Entries are created per visited path and handed to the traversal callback;
/// the backend does not retain them after the callback returns. `depth` is 1
/// for direct children of the traversal root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
    path: PathBuf,
    kind: DirEntryKind,
    depth: usize,
}

impl DirEntry {
    pub fn new<P: AsRef<Path>>(path: P, kind: DirEntryKind, depth: usize) -> DirEntry {
        DirEntry {
            path: path.as_ref().to_path_buf(),
            kind,
            depth,
        }
    }

    /// Full path of the entry, rooted at the traversed directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final component of the entry's path.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    pub fn kind(&self) -> DirEntryKind {
        self.kind
    }

    /// Nesting level below the traversal root; direct children are depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_file(&self) -> bool {
        self.kind == DirEntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == DirEntryKind::Directory
    }
}
