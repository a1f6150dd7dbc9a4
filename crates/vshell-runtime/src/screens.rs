#![forbid(unsafe_code)]

//! The shell's screen set.
//!
//! Screens carry no behavior here beyond their identifiers and two policy
//! questions the shell model asks: which screen owns the drawer, and which
//! one owns the handoff action.

use vshell_core::navigation::ScreenId;

/// Splash / sign-in screen; the reset target for sign-out.
pub const START: &str = "start";
/// Main menu; the only screen hosting the drawer.
pub const MAIN: &str = "main";
/// 3D model browser.
pub const MODELS: &str = "models";
/// Vehicle compatibility listing.
pub const COMPATIBILITY: &str = "compatibility";
/// Embedded web page; its address travels as a `url` param.
pub const WEB: &str = "web";
/// The external-app handoff screen.
pub const HANDOFF: &str = "handoff";

/// Whether `screen` owns a drawer instance.
#[must_use]
pub fn has_drawer(screen: &ScreenId) -> bool {
    screen.as_str() == MAIN
}

/// Whether `screen` owns the external-app handoff action.
#[must_use]
pub fn has_handoff(screen: &ScreenId) -> bool {
    screen.as_str() == HANDOFF
}
