use std::fmt;

/* 📖 # Why is PlatformTarget a value and not a cfg?

The bound backend is chosen by cfg at build time, but diagnostics need a
platform *name* to print, and embedders on unregistered platforms want to
report their real platform (e.g. "Osbyte") rather than whatever
std::env::consts::OS says. A Copy newtype over a static string covers both.
*/

/// The operating system a build is compiled for.
///
/// `PlatformTarget::BUILD` is fixed at compile time. Embedders on platforms
/// without a registered backend can construct their own name for use in
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformTarget(&'static str);

impl PlatformTarget {
    /// The platform this binary was compiled for.
    pub const BUILD: PlatformTarget = PlatformTarget(std::env::consts::OS);

    /// A platform identified by an arbitrary static name.
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// The platform name as used in diagnostics.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl Default for PlatformTarget {
    fn default() -> Self {
        Self::BUILD
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three operations of the filesystem contract.
/// The `Display` form is the operation name used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    TraverseDirectory,
    CurrentDirectory,
    HomeDirectory,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::TraverseDirectory => "Traverse directory",
            Operation::CurrentDirectory => "Current directory",
            Operation::HomeDirectory => "Home directory",
        };
        write!(f, "{}", name)
    }
}

/// Builds the diagnostic line for an operation that has no implementation on
/// the given platform. Pure function of its inputs; emitted exactly once per
/// failed fallback call.
pub fn unsupported_message(operation: Operation, platform: PlatformTarget) -> String {
    format!(
        "[FS implementation error] {} not implemented for [{}]",
        operation, platform
    )
}
