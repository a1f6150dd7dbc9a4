#![forbid(unsafe_code)]

//! Core state machines for the Vortex companion shell.
//!
//! This crate holds the pure, thread-free pieces of the shell: everything
//! here is driven by explicit calls carrying an [`Instant`](web_time::Instant)
//! and owns no I/O, which is what makes the drawer, navigation, and handoff
//! models unit-testable without mounting any UI.
//!
//! # Key Components
//!
//! - [`uri`] — scheme-candidate validation for external app launch URIs
//! - [`handoff`] — the per-invocation [`HandoffAttempt`] record and its
//!   status/error taxonomy
//! - [`drawer`] — the slide-out drawer state machine with a tick-driven
//!   slide animation
//! - [`navigation`] — the screen stack, which force-closes the drawer
//!   before any mutation
//!
//! # How it fits in the system
//! `vshell-core` is consumed by `vshell-runtime`, which adds the platform
//! launcher seam, the background handoff invoker, the fallback notifier,
//! and the event-driven shell model on top.

pub mod drawer;
pub mod handoff;
pub mod navigation;
pub mod uri;

pub use drawer::{Drawer, DrawerConfig, DrawerVisibility};
pub use handoff::{HandoffAttempt, HandoffError, HandoffStatus};
pub use navigation::{NavEntry, NavigationShell, ParamValue, ScreenId, ScreenParams};
pub use uri::{ConfigError, ExternalAppTarget, resolve_candidates};
