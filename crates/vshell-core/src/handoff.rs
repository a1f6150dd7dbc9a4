#![forbid(unsafe_code)]

//! The per-invocation handoff record.
//!
//! Every user-initiated launch of the external app produces exactly one
//! [`HandoffAttempt`]. The invoker in `vshell-runtime` is the only writer;
//! everything else observes the attempt after it has settled. Attempts are
//! never persisted or reused across invocations — a new tap creates a new
//! record.
//!
//! # Invariants
//!
//! 1. An attempt delivered to the caller is always in a terminal status
//!    ([`HandoffStatus::is_terminal`]); `Pending` and `Reachable` are
//!    in-flight states only.
//! 2. `chosen_scheme` is set exactly when some candidate answered reachable.
//! 3. `error` is set exactly for the failure statuses (`Unreachable` may
//!    carry a query error when no candidate could be checked at all).

use thiserror::Error;

use crate::uri::{ConfigError, ExternalAppTarget};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of a single handoff invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffStatus {
    /// Created, no platform call answered yet.
    Pending,
    /// Some candidate answered reachable; the open call is next.
    Reachable,
    /// No candidate answered reachable. Terminal.
    Unreachable,
    /// The open call (or the configuration) failed. Terminal.
    LaunchFailed,
    /// The platform accepted the open call. Terminal.
    Launched,
}

impl HandoffStatus {
    /// Whether no further automatic transition can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Unreachable | Self::LaunchFailed | Self::Launched
        )
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a handoff invocation failed.
///
/// The three variants deliberately stay distinguishable all the way to the
/// fallback notice: "nothing to launch" (configuration), "couldn't check"
/// (query), and "checked fine but wouldn't open" (launch) call for
/// different user-facing wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoffError {
    /// The configured candidate list was unusable.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// The reachability query itself failed (platform error or timeout),
    /// which is different from the platform answering "not installed".
    #[error("reachability query failed for {uri}: {detail}")]
    PlatformQuery {
        /// The candidate being probed.
        uri: String,
        /// Platform-reported detail.
        detail: String,
    },
    /// The open call failed after reachability was confirmed — typically the
    /// target was removed between check and launch, or the platform refused.
    #[error("launch failed for {uri}: {detail}")]
    Launch {
        /// The chosen URI.
        uri: String,
        /// Platform-reported detail.
        detail: String,
    },
}

// ---------------------------------------------------------------------------
// Attempt
// ---------------------------------------------------------------------------

/// Record of one handoff invocation against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffAttempt {
    target: ExternalAppTarget,
    chosen_scheme: Option<String>,
    status: HandoffStatus,
    error: Option<HandoffError>,
}

impl HandoffAttempt {
    /// Start a fresh attempt in `Pending`.
    #[must_use]
    pub fn new(target: ExternalAppTarget) -> Self {
        Self {
            target,
            chosen_scheme: None,
            status: HandoffStatus::Pending,
            error: None,
        }
    }

    /// The target this attempt was made against.
    #[must_use]
    pub fn target(&self) -> &ExternalAppTarget {
        &self.target
    }

    /// The candidate that answered reachable, once one has.
    #[must_use]
    pub fn chosen_scheme(&self) -> Option<&str> {
        self.chosen_scheme.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> HandoffStatus {
        self.status
    }

    /// The failure behind a non-`Launched` terminal status, if any.
    #[must_use]
    pub fn error(&self) -> Option<&HandoffError> {
        self.error.as_ref()
    }

    /// Mark the candidate that answered reachable.
    pub fn mark_reachable(&mut self, uri: impl Into<String>) {
        self.chosen_scheme = Some(uri.into());
        self.status = HandoffStatus::Reachable;
    }

    /// Settle as launched.
    pub fn settle_launched(&mut self) {
        self.status = HandoffStatus::Launched;
    }

    /// Settle as unreachable. A query error may be attached when candidates
    /// could not even be checked, so the notice can say "try again" rather
    /// than "not installed".
    pub fn settle_unreachable(&mut self, error: Option<HandoffError>) {
        self.status = HandoffStatus::Unreachable;
        self.error = error;
    }

    /// Settle as failed-to-launch with the causing error.
    pub fn settle_launch_failed(&mut self, error: HandoffError) {
        self.status = HandoffStatus::LaunchFailed;
        self.error = Some(error);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
