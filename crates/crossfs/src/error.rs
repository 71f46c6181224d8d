use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::platform::{Operation, PlatformTarget, unsupported_message};

/* 📖 # Why a custom error type and not anyhow/eyre/thiserror?

- Better control over error handling
- No dependencies to compile and integrate
- The failure policy of this crate is load-bearing (failures are normal
  returns, never process termination), so the error type is part of the
  contract rather than plumbing
 */

/// Error variants that can occur in crossfs operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// No backend implements the operation on this platform.
    /// Its display form is the diagnostic line emitted through the report sink.
    Unsupported {
        operation: Operation,
        platform: PlatformTarget,
    },

    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/// Comprehensive error type wrapping ErrorKind with optional context.
/// Implements the standard Error trait and supports context attachment.
#[derive(Debug)]
pub struct CrossfsError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl CrossfsError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a message-only error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates the unsupported-operation error for the given platform.
    pub fn unsupported(operation: Operation, platform: PlatformTarget) -> Self {
        Self::new(ErrorKind::Unsupported {
            operation,
            platform,
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for CrossfsError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for CrossfsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Unsupported { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for CrossfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        // Add a separator if we have context
        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        // Display the underlying error kind
        match &self.kind {
            ErrorKind::Unsupported {
                operation,
                platform,
            } => {
                write!(f, "{}", unsupported_message(*operation, *platform))
            }
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// Standard result type for crossfs operations.
/// The error is boxed to keep the result small in the common case.
pub type CrossfsResult<T> = std::result::Result<T, Box<CrossfsError>>;

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> CrossfsResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> CrossfsResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for CrossfsResult<T> {
    fn context(self, context: impl Into<String>) -> CrossfsResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> CrossfsResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
