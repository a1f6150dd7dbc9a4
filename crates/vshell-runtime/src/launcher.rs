#![forbid(unsafe_code)]

//! The platform launcher seam.
//!
//! The OS capability the shell needs is tiny: "could this URI be opened?"
//! and "open it". Both calls can be slow and both can fail at the platform
//! level, so the shell treats them as an opaque [`Launcher`] behind a trait
//! and never implements them itself. Production wires the host platform's
//! linking facility in here; tests script it.

use thiserror::Error;

/// A platform-level failure from the launcher itself, distinct from the
/// launcher answering "no" (not installed / refused).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("platform launcher error: {0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

/// Acknowledgement from an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAck {
    /// The platform accepted the request and is launching the target.
    Accepted,
    /// The platform declined without raising an error.
    Refused,
}

/// The OS launcher capability.
///
/// Implementations may block; the invoker runs each call on its own worker
/// and bounds it with a deadline, so a stuck platform call never wedges an
/// attempt in `Pending`.
pub trait Launcher: Send + Sync + 'static {
    /// Whether some installed application claims `uri`.
    fn can_open(&self, uri: &str) -> Result<bool, PlatformError>;

    /// Ask the platform to open `uri`.
    fn open(&self, uri: &str) -> Result<LaunchAck, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_display_includes_detail() {
        let err = PlatformError::new("linking service unavailable");
        assert_eq!(
            err.to_string(),
            "platform launcher error: linking service unavailable"
        );
    }
}
