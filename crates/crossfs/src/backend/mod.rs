/* 📖 # How is a backend selected?

Exactly one implementation of the filesystem contract is bound per build
target, at compile time. The cfg conditions below are set-theoretic
complements: targets with a native backend never compile the fallback in as
the bound backend, and targets without one always do. There is no runtime
branching and no way to end up with zero or two bound backends.
*/

mod dir_entry;
mod report;
mod traits;

pub mod mock;

#[cfg(any(unix, windows))]
mod native;
#[cfg(any(unix, windows))]
pub use native::NativeBackend;
#[cfg(any(unix, windows))]
pub(crate) use native::NativeBackend as TargetBackend;

// The fallback module is compiled in test mode on all platforms, and as the
// bound backend on targets without a native implementation. On supported
// targets in test mode it must be accessed via the explicit `fallback::`
// path to avoid ambiguity with the native implementation.
#[cfg(any(test, not(any(unix, windows))))]
pub mod fallback;
#[cfg(not(any(unix, windows)))]
pub use fallback::FallbackBackend;
#[cfg(not(any(unix, windows)))]
pub(crate) use fallback::FallbackBackend as TargetBackend;

pub use dir_entry::{DirEntry, DirEntryKind};
pub use mock::MockBackend;
pub use report::{RecordingSink, ReportSink, TracingSink};
pub use traits::{BackendHandle, FsBackend, TraversalCallback};
