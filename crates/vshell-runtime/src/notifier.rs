#![forbid(unsafe_code)]

//! Fallback notices for failed handoffs.
//!
//! When an attempt settles anywhere other than `Launched`, the user gets
//! exactly one dismissible notice with a single acknowledgment action. The
//! wording keeps the failure classes apart: "not installed" is not the same
//! message as "failed to open", and a reachability check that never got an
//! answer reads as transient ("try again") rather than as a missing app.
//!
//! [`Notifier`] is the presentation seam — it never errors and has no other
//! side effects. The default [`TracingNotifier`] just logs, which is all a
//! headless build needs; a UI layer substitutes its own.

use vshell_core::handoff::{HandoffAttempt, HandoffError, HandoffStatus};

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Classification of a notice, mostly for presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The target app does not appear to be installed.
    NotInstalled,
    /// The target was reachable but would not open.
    LaunchFailed,
    /// The reachability check itself failed; worth retrying.
    QueryFailed,
    /// The shell's launch configuration is broken.
    Misconfigured,
    /// Plain informational acknowledgment (sign-out, etc.).
    Info,
}

/// A dismissible, non-blocking acknowledgment shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Label of the single acknowledgment action every notice offers.
    #[must_use]
    pub fn ack_label(&self) -> &'static str {
        "OK"
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Map a settled attempt to its notice. `Launched` — and the in-flight
/// states, which should never reach here — produce none.
#[must_use]
pub fn notice_for(attempt: &HandoffAttempt) -> Option<Notice> {
    let name = attempt.target().display_name();
    match attempt.status() {
        HandoffStatus::Launched | HandoffStatus::Pending | HandoffStatus::Reachable => None,
        HandoffStatus::Unreachable => match attempt.error() {
            Some(HandoffError::PlatformQuery { .. }) => Some(Notice::new(
                NoticeKind::QueryFailed,
                format!("Couldn't check for {name}"),
                format!("Checking whether {name} is installed failed. Please try again."),
            )),
            _ => Some(Notice::new(
                NoticeKind::NotInstalled,
                format!("{name} not found"),
                format!("The {name} app doesn't appear to be installed on this device."),
            )),
        },
        HandoffStatus::LaunchFailed => match attempt.error() {
            Some(HandoffError::Configuration(_)) => Some(Notice::new(
                NoticeKind::Misconfigured,
                format!("Can't open {name}"),
                format!("This build has no usable launch link for {name}."),
            )),
            _ => Some(Notice::new(
                NoticeKind::LaunchFailed,
                format!("Couldn't open {name}"),
                format!("{name} was found but failed to open. Please try again."),
            )),
        },
    }
}

// ---------------------------------------------------------------------------
// Notifier seam
// ---------------------------------------------------------------------------

/// Presents notices to the user. Must not fail and must not block.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Default notifier: structured log events only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => tracing::info!(
                target: "vshell.notice",
                title = %notice.title,
                body = %notice.body,
                "notice"
            ),
            _ => tracing::warn!(
                target: "vshell.notice",
                kind = ?notice.kind,
                title = %notice.title,
                body = %notice.body,
                "fallback notice"
            ),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
