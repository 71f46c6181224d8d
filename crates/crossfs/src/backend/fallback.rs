use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::platform::{Operation, PlatformTarget};
use crate::{CrossfsError, CrossfsResult};

use super::report::{ReportSink, TracingSink};
use super::traits::{FsBackend, TraversalCallback};

/* 📖 # What does the fallback give an unsupported platform?

Graceful degradation instead of a build break or a crash. Every operation
resolves to the same outcome: one diagnostic line naming the operation and
the platform, zero callback invocations, and an error the caller can check
like any other. Callers written against the contract run unmodified on
platforms that will never have a native backend.
*/

/// Filesystem backend for targets without native support.
///
/// Stateless: each call independently emits exactly one diagnostic through
/// the report sink and returns [`CrossfsError::unsupported`]. The traversal
/// callback is never invoked, no path validation is attempted, and no input
/// can make a call panic or touch the filesystem.
#[derive(Debug, Clone)]
pub struct FallbackBackend {
    platform: PlatformTarget,
    sink: Arc<dyn ReportSink>,
}

impl FallbackBackend {
    /// Fallback for the build target platform, reporting through tracing.
    pub fn new() -> Self {
        Self::with_platform(PlatformTarget::BUILD)
    }

    /// Fallback reporting under an embedder-chosen platform name.
    pub fn with_platform(platform: PlatformTarget) -> Self {
        Self::with_sink(platform, Arc::new(TracingSink))
    }

    /// Fallback with a custom report sink.
    pub fn with_sink(platform: PlatformTarget, sink: Arc<dyn ReportSink>) -> Self {
        Self { platform, sink }
    }

    /// The platform named in this fallback's diagnostics.
    pub fn platform(&self) -> PlatformTarget {
        self.platform
    }

    fn unsupported(&self, operation: Operation) -> Box<CrossfsError> {
        let error = CrossfsError::unsupported(operation, self.platform);
        self.sink.report(&error.to_string());
        Box::new(error)
    }
}

impl Default for FallbackBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for FallbackBackend {
    fn traverse_directory(
        &self,
        _path: &Path,
        _recursive: bool,
        _callback: TraversalCallback<'_>,
    ) -> CrossfsResult<()> {
        Err(self.unsupported(Operation::TraverseDirectory))
    }

    fn current_dir(&self) -> CrossfsResult<PathBuf> {
        Err(self.unsupported(Operation::CurrentDirectory))
    }

    fn home_dir(&self) -> CrossfsResult<PathBuf> {
        Err(self.unsupported(Operation::HomeDirectory))
    }
}
