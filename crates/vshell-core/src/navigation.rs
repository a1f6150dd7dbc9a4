#![forbid(unsafe_code)]

//! Screen stack with drawer coordination.
//!
//! [`NavigationShell`] is a thin policy layer over a named-screen stack:
//! push (`navigate`), replace-all (`reset`, the sign-out path), and pop
//! (`go_back`). The one policy it enforces is ordering — every stack
//! mutation force-closes the drawer *before* the stack changes, so no
//! screen transition can leave a half-open panel or a scrim with nothing
//! behind it.
//!
//! # Invariants
//!
//! 1. The stack is never empty; `go_back` at the root is a silent no-op.
//! 2. On return from any mutating call the drawer is Closed.
//! 3. Stack entries are owned here exclusively; the drawer and handoff
//!    components never see them.

use std::collections::HashMap;

use web_time::Instant;

use crate::drawer::Drawer;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identifier of a named screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenId(String);

impl ScreenId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScreenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parameter value carried by a stack entry. Opaque to the shell; screens
/// interpret their own params (the web screen's `url`, a model id, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Named params attached to a stack entry.
pub type ScreenParams = HashMap<String, ParamValue>;

/// One entry in the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub screen: ScreenId,
    pub params: ScreenParams,
}

impl NavEntry {
    #[must_use]
    pub fn new(screen: ScreenId, params: ScreenParams) -> Self {
        Self { screen, params }
    }

    #[must_use]
    pub fn bare(screen: ScreenId) -> Self {
        Self::new(screen, ScreenParams::new())
    }
}

// ---------------------------------------------------------------------------
// NavigationShell
// ---------------------------------------------------------------------------

/// The screen stack. See the module docs for the drawer-ordering policy.
#[derive(Debug)]
pub struct NavigationShell {
    stack: Vec<NavEntry>,
}

impl NavigationShell {
    /// Create a shell with a single root entry.
    #[must_use]
    pub fn new(root: ScreenId) -> Self {
        Self {
            stack: vec![NavEntry::bare(root)],
        }
    }

    /// The entry currently on top.
    #[must_use]
    pub fn current(&self) -> &NavEntry {
        // The stack is never empty (see invariant 1).
        self.stack.last().unwrap_or_else(|| unreachable!())
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.stack
    }

    /// Push a new screen. Closes the drawer first.
    pub fn navigate(
        &mut self,
        drawer: &mut Drawer,
        now: Instant,
        screen: ScreenId,
        params: ScreenParams,
    ) {
        drawer.force_close(now);
        tracing::debug!(
            target: "vshell.nav",
            screen = %screen,
            depth = self.stack.len() + 1,
            "push"
        );
        self.stack.push(NavEntry::new(screen, params));
    }

    /// Replace the entire stack with a single root entry. Closes the drawer
    /// first. Used for sign-out.
    pub fn reset(&mut self, drawer: &mut Drawer, now: Instant, root: ScreenId) {
        drawer.force_close(now);
        tracing::debug!(target: "vshell.nav", root = %root, "reset");
        self.stack.clear();
        self.stack.push(NavEntry::bare(root));
    }

    /// Pop the top entry. Closes the drawer first. A silent no-op when only
    /// the root remains; returns whether an entry was popped.
    pub fn go_back(&mut self, drawer: &mut Drawer, now: Instant) -> bool {
        drawer.force_close(now);
        if self.stack.len() <= 1 {
            tracing::debug!(target: "vshell.nav", "back ignored at root");
            return false;
        }
        let popped = self.stack.pop();
        if let Some(entry) = popped {
            tracing::debug!(
                target: "vshell.nav",
                screen = %entry.screen,
                depth = self.stack.len(),
                "pop"
            );
        }
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::{DrawerConfig, DrawerVisibility};
    use web_time::Duration;

    fn setup() -> (NavigationShell, Drawer, Instant) {
        (
            NavigationShell::new(ScreenId::from("start")),
            Drawer::new(DrawerConfig::default()),
            Instant::now(),
        )
    }

    fn open_drawer(drawer: &mut Drawer, t0: Instant) {
        drawer.toggle(t0);
        drawer.tick(t0 + Duration::from_millis(300));
        assert_eq!(drawer.visibility(), DrawerVisibility::Open);
    }

    #[test]
    fn starts_with_a_single_root() {
        let (nav, _, _) = setup();
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().screen, ScreenId::from("start"));
    }

    #[test]
    fn navigate_pushes_an_entry_with_params() {
        let (mut nav, mut drawer, t0) = setup();
        let mut params = ScreenParams::new();
        params.insert("url".to_string(), ParamValue::Str("http://host/".into()));
        nav.navigate(&mut drawer, t0, ScreenId::from("web"), params);
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.current().screen, ScreenId::from("web"));
        assert_eq!(
            nav.current().params.get("url"),
            Some(&ParamValue::Str("http://host/".into()))
        );
    }

    #[test]
    fn navigate_closes_an_open_drawer_first() {
        let (mut nav, mut drawer, t0) = setup();
        open_drawer(&mut drawer, t0);
        nav.navigate(&mut drawer, t0, ScreenId::from("models"), ScreenParams::new());
        assert_eq!(drawer.visibility(), DrawerVisibility::Closed);
        assert_eq!(nav.current().screen, ScreenId::from("models"));
    }

    #[test]
    fn reset_replaces_the_whole_stack() {
        let (mut nav, mut drawer, t0) = setup();
        nav.navigate(&mut drawer, t0, ScreenId::from("main"), ScreenParams::new());
        nav.navigate(&mut drawer, t0, ScreenId::from("models"), ScreenParams::new());
        nav.reset(&mut drawer, t0, ScreenId::from("start"));
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().screen, ScreenId::from("start"));
    }

    #[test]
    fn reset_while_drawer_open_lands_closed() {
        let (mut nav, mut drawer, t0) = setup();
        nav.navigate(&mut drawer, t0, ScreenId::from("main"), ScreenParams::new());
        open_drawer(&mut drawer, t0);
        nav.reset(&mut drawer, t0, ScreenId::from("start"));
        assert_eq!(drawer.visibility(), DrawerVisibility::Closed);
        assert_eq!(drawer.offset(), -280.0);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn go_back_pops_and_stops_at_root() {
        let (mut nav, mut drawer, t0) = setup();
        nav.navigate(&mut drawer, t0, ScreenId::from("main"), ScreenParams::new());
        assert!(nav.go_back(&mut drawer, t0));
        assert_eq!(nav.current().screen, ScreenId::from("start"));
        assert!(!nav.go_back(&mut drawer, t0));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn go_back_closes_the_drawer_even_at_root() {
        let (mut nav, mut drawer, t0) = setup();
        open_drawer(&mut drawer, t0);
        assert!(!nav.go_back(&mut drawer, t0));
        assert_eq!(drawer.visibility(), DrawerVisibility::Closed);
    }

    #[test]
    fn go_back_mid_animation_cancels_the_slide() {
        let (mut nav, mut drawer, t0) = setup();
        nav.navigate(&mut drawer, t0, ScreenId::from("main"), ScreenParams::new());
        drawer.toggle(t0);
        drawer.tick(t0 + Duration::from_millis(50));
        assert!(nav.go_back(&mut drawer, t0 + Duration::from_millis(60)));
        assert_eq!(drawer.visibility(), DrawerVisibility::Closed);
        assert!(!drawer.is_animating());
    }
}
