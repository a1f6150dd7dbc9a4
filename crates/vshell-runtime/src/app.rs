#![forbid(unsafe_code)]

//! The shell model: one state machine over drawer, navigation, handoff,
//! and notices.
//!
//! [`ShellApp`] is the update half of an update/view split — it owns all
//! mutable shell state and advances it in response to [`Msg`] values fed
//! from the UI event loop. Every handler takes the current [`Instant`] so
//! behavior is deterministic under test without a frame scheduler.
//!
//! # Invariants
//!
//! 1. At most one handoff attempt is in flight; taps on the handoff action
//!    while one is pending are dropped.
//! 2. Leaving the handoff screen cancels the pending attempt; its eventual
//!    result is never surfaced.
//! 3. Each settled attempt produces at most one notice (none for
//!    `Launched`), delivered to the notifier exactly once.
//! 4. Drawer gestures only act on the screen that owns the drawer.

use std::sync::Arc;

use web_time::Instant;

use vshell_core::drawer::Drawer;
use vshell_core::handoff::HandoffAttempt;
use vshell_core::navigation::{NavigationShell, ScreenId, ScreenParams};

use crate::config::ShellConfig;
use crate::invoker::{HandoffHandle, HandoffInvoker};
use crate::launcher::Launcher;
use crate::notifier::{Notice, NoticeKind, Notifier, notice_for};
use crate::screens;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Inputs the shell reacts to.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Menu-button tap on the drawer-owning screen.
    MenuPressed,
    /// Tap on the scrim overlay behind an open drawer.
    ScrimTapped,
    /// Frame-scheduler callback; advances animations and polls the
    /// in-flight handoff.
    Frame,
    /// Push a screen.
    NavigateTo {
        screen: ScreenId,
        params: ScreenParams,
    },
    /// Pop the top screen.
    Back,
    /// Sign out: acknowledge and reset to the start screen.
    SignOut,
    /// Tap on the external-app launch action.
    HandoffPressed,
    /// Acknowledge the current notice.
    NoticeDismissed,
}

// ---------------------------------------------------------------------------
// ShellApp
// ---------------------------------------------------------------------------

/// The shell state machine. See the module docs for its invariants.
pub struct ShellApp<N: Notifier> {
    config: ShellConfig,
    drawer: Drawer,
    nav: NavigationShell,
    invoker: HandoffInvoker,
    notifier: N,
    pending: Option<HandoffHandle>,
    notice: Option<Notice>,
    last_attempt: Option<HandoffAttempt>,
}

impl<N: Notifier> ShellApp<N> {
    /// Build the shell at the start screen with a closed drawer.
    #[must_use]
    pub fn new(config: ShellConfig, launcher: Arc<dyn Launcher>, notifier: N) -> Self {
        let drawer = Drawer::new(config.drawer.clone());
        let invoker = HandoffInvoker::new(launcher, config.handoff.clone());
        Self {
            config,
            drawer,
            nav: NavigationShell::new(ScreenId::from(screens::START)),
            invoker,
            notifier,
            pending: None,
            notice: None,
            last_attempt: None,
        }
    }

    /// Advance the model by one message.
    pub fn update(&mut self, msg: Msg, now: Instant) {
        match msg {
            Msg::MenuPressed => {
                if self.current_owns_drawer() {
                    self.drawer.toggle(now);
                } else {
                    tracing::debug!(
                        target: "vshell.app",
                        screen = %self.nav.current().screen,
                        "menu press ignored off the drawer screen"
                    );
                }
            }
            Msg::ScrimTapped => {
                if self.current_owns_drawer() {
                    self.drawer.scrim_tapped(now);
                }
            }
            Msg::Frame => {
                self.drawer.tick(now);
                self.pump_handoff();
            }
            Msg::NavigateTo { screen, params } => {
                self.nav.navigate(&mut self.drawer, now, screen, params);
                self.discard_orphaned_attempt();
            }
            Msg::Back => {
                self.nav.go_back(&mut self.drawer, now);
                self.discard_orphaned_attempt();
            }
            Msg::SignOut => {
                self.nav
                    .reset(&mut self.drawer, now, ScreenId::from(screens::START));
                self.discard_orphaned_attempt();
                self.surface(Notice::new(
                    NoticeKind::Info,
                    "Signed out",
                    "You have been signed out.",
                ));
            }
            Msg::HandoffPressed => self.handoff_pressed(),
            Msg::NoticeDismissed => self.notice = None,
        }
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    #[must_use]
    pub fn nav(&self) -> &NavigationShell {
        &self.nav
    }

    /// The notice awaiting acknowledgment, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a handoff attempt is in flight.
    #[must_use]
    pub fn handoff_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recently settled attempt.
    #[must_use]
    pub fn last_attempt(&self) -> Option<&HandoffAttempt> {
        self.last_attempt.as_ref()
    }

    // -- internals ---------------------------------------------------------

    fn current_owns_drawer(&self) -> bool {
        screens::has_drawer(&self.nav.current().screen)
    }

    fn handoff_pressed(&mut self) {
        if !screens::has_handoff(&self.nav.current().screen) {
            tracing::debug!(
                target: "vshell.app",
                screen = %self.nav.current().screen,
                "handoff press ignored off the handoff screen"
            );
            return;
        }
        if self.pending.is_some() {
            tracing::debug!(target: "vshell.app", "handoff press ignored while one is pending");
            return;
        }
        match self.config.handoff_target() {
            Ok(target) => {
                self.pending = Some(self.invoker.invoke(target));
            }
            Err(err) => {
                tracing::error!(target: "vshell.app", error = %err, "no handoff target configured");
                let name = &self.config.app_display_name;
                self.surface(Notice::new(
                    NoticeKind::Misconfigured,
                    format!("Can't open {name}"),
                    format!("This build has no usable launch link for {name}."),
                ));
            }
        }
    }

    fn pump_handoff(&mut self) {
        let Some(handle) = &self.pending else {
            return;
        };
        let Some(attempt) = handle.try_settle() else {
            return;
        };
        tracing::debug!(
            target: "vshell.app",
            status = ?attempt.status(),
            "handoff attempt settled"
        );
        if let Some(notice) = notice_for(&attempt) {
            self.surface(notice);
        }
        self.last_attempt = Some(attempt);
        self.pending = None;
    }

    /// Cancel a pending attempt once its owning screen is no longer on top.
    fn discard_orphaned_attempt(&mut self) {
        if self.pending.is_none() || screens::has_handoff(&self.nav.current().screen) {
            return;
        }
        if let Some(handle) = self.pending.take() {
            tracing::debug!(target: "vshell.app", "cancelling handoff attempt on screen leave");
            handle.cancel();
        }
    }

    fn surface(&mut self, notice: Notice) {
        self.notifier.notify(notice.clone());
        self.notice = Some(notice);
    }
}

impl<N: Notifier + std::fmt::Debug> std::fmt::Debug for ShellApp<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellApp")
            .field("screen", &self.nav.current().screen)
            .field("drawer", &self.drawer.visibility())
            .field("handoff_pending", &self.pending.is_some())
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
