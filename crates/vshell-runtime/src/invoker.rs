#![forbid(unsafe_code)]

//! The handoff invoker: the two-phase "can open / open" protocol.
//!
//! One user tap produces one [`HandoffAttempt`]. The protocol:
//!
//! 1. Validate the configured candidates; an unusable configuration settles
//!    the attempt as `LaunchFailed` immediately.
//! 2. Probe candidates in order. The first one the platform reports
//!    openable wins; later candidates are never queried. A query that
//!    errors (or times out) counts as "not reachable" for that candidate
//!    and probing continues.
//! 3. Open the chosen URI — at most once, with no automatic retry. Success
//!    settles `Launched`; an error, refusal, or timeout settles
//!    `LaunchFailed`.
//! 4. If nothing was reachable, settle `Unreachable`.
//!
//! [`HandoffInvoker::invoke`] runs the protocol on a background worker so
//! input handling is never blocked, and returns a [`HandoffHandle`] the
//! owning screen polls. Cancelling the handle (navigating away) turns any
//! late result into a no-op — nothing is ever delivered against a screen
//! that is gone.
//!
//! # Invariants
//!
//! 1. Every delivered attempt is terminal; `Pending` is never observable
//!    through a handle.
//! 2. At most one `open` call per invocation.
//! 3. Each platform call is bounded by its configured deadline; a call that
//!    outlives it is treated as a query failure / launch failure and its
//!    eventual result is discarded.
//!
//! # Failure Modes
//!
//! - Cancellation between phases abandons the protocol; the worker exits
//!   without sending and any launch that already happened stands (the
//!   external app may come to the foreground — the platform owns that).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use web_time::Duration;

use vshell_core::handoff::{HandoffAttempt, HandoffError};
use vshell_core::uri::{ExternalAppTarget, resolve_candidates};

use crate::launcher::{LaunchAck, Launcher};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Deadlines for the two protocol phases.
#[derive(Debug, Clone)]
pub struct HandoffConfig {
    /// Deadline for one reachability query (default: 2s).
    pub query_timeout: Duration,
    /// Deadline for the open call (default: 3s).
    pub open_timeout: Duration,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(2),
            open_timeout: Duration::from_secs(3),
        }
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Shared cancel flag between a [`HandoffHandle`] and its worker.
///
/// Cooperative: the worker checks it between phases and before delivering,
/// the handle checks it before surfacing a result.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// Deadline-bounded platform calls
// ---------------------------------------------------------------------------

/// Run `call` on its own worker and wait at most `timeout` for the result.
///
/// `None` means the deadline passed (or the worker could not start); the
/// call's eventual result, if any, goes nowhere.
fn bounded<T: Send + 'static>(
    phase: &'static str,
    timeout: Duration,
    call: impl FnOnce() -> T + Send + 'static,
) -> Option<T> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("vshell-handoff-{phase}"))
        .spawn(move || {
            let _ = tx.send(call());
        });
    if let Err(err) = spawned {
        tracing::error!(
            target: "vshell.handoff",
            phase,
            error = %err,
            "could not start platform call worker"
        );
        return None;
    }
    match rx.recv_timeout(timeout) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                target: "vshell.handoff",
                phase,
                timeout_ms = timeout.as_millis() as u64,
                "platform call exceeded its deadline"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// Run the full protocol synchronously and return the settled attempt.
///
/// The returned attempt is terminal unless `cancel` fired mid-protocol, in
/// which case it is abandoned as-is (callers going through
/// [`HandoffInvoker::invoke`] never see an abandoned attempt).
pub fn run_handoff(
    launcher: &Arc<dyn Launcher>,
    target: &ExternalAppTarget,
    config: &HandoffConfig,
    cancel: &CancelFlag,
) -> HandoffAttempt {
    let mut attempt = HandoffAttempt::new(target.clone());

    let resolved = match resolve_candidates(target.candidates()) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::error!(
                target: "vshell.handoff",
                app = target.display_name(),
                error = %err,
                "unusable launch configuration"
            );
            attempt.settle_launch_failed(HandoffError::Configuration(err));
            return attempt;
        }
    };

    // Phase one: first reachable candidate wins.
    let mut last_query_error = None;
    for uri in &resolved {
        if cancel.is_cancelled() {
            tracing::debug!(target: "vshell.handoff", "cancelled before probing finished");
            return attempt;
        }
        let probe_launcher = Arc::clone(launcher);
        let probe_uri = uri.clone();
        match bounded("query", config.query_timeout, move || {
            probe_launcher.can_open(&probe_uri)
        }) {
            Some(Ok(true)) => {
                tracing::debug!(target: "vshell.handoff", uri = %uri, "candidate reachable");
                attempt.mark_reachable(uri.clone());
                break;
            }
            Some(Ok(false)) => {
                tracing::debug!(target: "vshell.handoff", uri = %uri, "candidate not reachable");
            }
            Some(Err(err)) => {
                tracing::warn!(
                    target: "vshell.handoff",
                    uri = %uri,
                    error = %err,
                    "reachability query errored; treating candidate as not reachable"
                );
                last_query_error = Some(HandoffError::PlatformQuery {
                    uri: uri.clone(),
                    detail: err.to_string(),
                });
            }
            None => {
                last_query_error = Some(HandoffError::PlatformQuery {
                    uri: uri.clone(),
                    detail: "reachability query timed out".to_string(),
                });
            }
        }
    }

    let Some(chosen) = attempt.chosen_scheme().map(str::to_string) else {
        attempt.settle_unreachable(last_query_error);
        return attempt;
    };

    if cancel.is_cancelled() {
        tracing::debug!(target: "vshell.handoff", "cancelled before the open call");
        return attempt;
    }

    // Phase two: exactly one open call.
    let open_launcher = Arc::clone(launcher);
    let open_uri = chosen.clone();
    match bounded("open", config.open_timeout, move || {
        open_launcher.open(&open_uri)
    }) {
        Some(Ok(LaunchAck::Accepted)) => {
            tracing::info!(
                target: "vshell.handoff",
                app = target.display_name(),
                uri = %chosen,
                "external app launched"
            );
            attempt.settle_launched();
        }
        Some(Ok(LaunchAck::Refused)) => {
            attempt.settle_launch_failed(HandoffError::Launch {
                uri: chosen,
                detail: "platform refused the open request".to_string(),
            });
        }
        Some(Err(err)) => {
            attempt.settle_launch_failed(HandoffError::Launch {
                uri: chosen,
                detail: err.to_string(),
            });
        }
        None => {
            attempt.settle_launch_failed(HandoffError::Launch {
                uri: chosen,
                detail: "open call timed out".to_string(),
            });
        }
    }
    attempt
}

// ---------------------------------------------------------------------------
// Invoker and handle
// ---------------------------------------------------------------------------

/// Runs handoff attempts on background workers.
#[derive(Clone)]
pub struct HandoffInvoker {
    launcher: Arc<dyn Launcher>,
    config: HandoffConfig,
}

impl HandoffInvoker {
    #[must_use]
    pub fn new(launcher: Arc<dyn Launcher>, config: HandoffConfig) -> Self {
        Self { launcher, config }
    }

    /// Start one attempt. The caller polls the returned handle from its
    /// frame handler and cancels it when the owning screen goes away.
    #[must_use]
    pub fn invoke(&self, target: ExternalAppTarget) -> HandoffHandle {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();
        let launcher = Arc::clone(&self.launcher);
        let config = self.config.clone();
        let fallback = target.clone();

        let spawned = thread::Builder::new()
            .name("vshell-handoff".to_string())
            .spawn({
                let tx = tx.clone();
                move || {
                    let attempt = run_handoff(&launcher, &target, &config, &worker_cancel);
                    if worker_cancel.is_cancelled() || !attempt.status().is_terminal() {
                        tracing::debug!(
                            target: "vshell.handoff",
                            "discarding result of a cancelled attempt"
                        );
                        return;
                    }
                    let _ = tx.send(attempt);
                }
            });

        if let Err(err) = spawned {
            // Settle synchronously rather than leave the handle pending.
            tracing::error!(
                target: "vshell.handoff",
                error = %err,
                "could not start handoff worker"
            );
            let mut attempt = HandoffAttempt::new(fallback);
            attempt.settle_launch_failed(HandoffError::Launch {
                uri: String::new(),
                detail: format!("could not start handoff worker: {err}"),
            });
            let _ = tx.send(attempt);
        }

        HandoffHandle { rx, cancel }
    }
}

impl std::fmt::Debug for HandoffInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandoffInvoker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The owning screen's view of one in-flight attempt.
#[derive(Debug)]
pub struct HandoffHandle {
    rx: Receiver<HandoffAttempt>,
    cancel: CancelFlag,
}

impl HandoffHandle {
    /// Non-blocking poll. `None` while the attempt is in flight — and
    /// forever after [`cancel`](Self::cancel).
    pub fn try_settle(&self) -> Option<HandoffAttempt> {
        if self.cancel.is_cancelled() {
            while self.rx.try_recv().is_ok() {}
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Blocking wait, bounded by `timeout`. Test convenience; production
    /// polls via [`try_settle`](Self::try_settle).
    pub fn settle_within(&self, timeout: Duration) -> Option<HandoffAttempt> {
        if self.cancel.is_cancelled() {
            while self.rx.try_recv().is_ok() {}
            return None;
        }
        self.rx.recv_timeout(timeout).ok()
    }

    /// Discard this attempt: whatever it resolves to is never surfaced.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
