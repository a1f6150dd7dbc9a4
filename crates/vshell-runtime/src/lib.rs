#![forbid(unsafe_code)]

//! Vortex companion shell runtime.
//!
//! This crate puts effects around the pure state machines in
//! [`vshell_core`]: the platform launcher seam, the background handoff
//! invoker with deadlines and cancellation, fallback notices, and the
//! event-driven shell model.
//!
//! # Key Components
//!
//! - [`Launcher`] — the OS "can open / open" capability as a trait
//! - [`HandoffInvoker`] / [`HandoffHandle`] — one background attempt per
//!   user tap; poll to settle, cancel to discard
//! - [`Notifier`] / [`notice_for`] — the single fallback acknowledgment per
//!   failed attempt, with "not installed" and "failed to open" kept apart
//! - [`ShellApp`] — the update loop tying drawer, navigation stack,
//!   handoff gate, and notices together
//! - [`ShellConfig`] — defaults, builders, and (with the `config-file`
//!   feature) TOML/JSON overrides
//!
//! # How it fits in the system
//! A host UI feeds [`Msg`] values into [`ShellApp::update`] from its event
//! loop and renders from the accessors; the platform side implements
//! [`Launcher`] and, optionally, [`Notifier`].

pub mod app;
pub mod config;
pub mod invoker;
pub mod launcher;
pub mod notifier;
pub mod screens;

pub use app::{Msg, ShellApp};
pub use config::ShellConfig;
#[cfg(feature = "config-file")]
pub use config::ConfigFileError;
pub use invoker::{CancelFlag, HandoffConfig, HandoffHandle, HandoffInvoker, run_handoff};
pub use launcher::{LaunchAck, Launcher, PlatformError};
pub use notifier::{Notice, NoticeKind, Notifier, TracingNotifier, notice_for};
