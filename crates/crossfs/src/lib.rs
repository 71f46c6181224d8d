/* 📖 # What is crossfs?

crossfs is a cross-platform filesystem abstraction layer. It defines a small
contract — directory traversal, current-directory resolution, home-directory
resolution — and binds exactly one implementation of that contract per build
target. Targets without a native backend get a fallback that reports the
unsupported operation instead of crashing, so the same caller code runs
unmodified everywhere.
*/

pub mod backend;
pub mod error;
pub mod platform;
pub mod tracing;

// Re-export commonly used types for convenience
pub use backend::{
    BackendHandle, DirEntry, DirEntryKind, FsBackend, MockBackend, RecordingSink, ReportSink,
    TracingSink, TraversalCallback,
};
pub use error::{CrossfsError, CrossfsResult, ResultExt};
pub use platform::{Operation, PlatformTarget};
