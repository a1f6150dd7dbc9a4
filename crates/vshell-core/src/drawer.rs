#![forbid(unsafe_code)]

//! Slide-out drawer state machine.
//!
//! The drawer is the menu panel that slides in from the left edge. Its
//! horizontal offset lives in `[-width, 0]`: `-width` fully hidden, `0`
//! fully shown. One [`Drawer`] instance belongs to one screen and is
//! re-created Closed on mount.
//!
//! Animation is tick-driven: gesture handlers start a slide, and only
//! [`Drawer::tick`] — called from the frame scheduler — advances the
//! visibility past `Opening`/`Closing`.
//!
//! # State Machine
//!
//! ```text
//! Closed --toggle--> Opening --tick(end)--> Open
//! Open --toggle/scrim--> Closing --tick(end)--> Closed
//! any --force_close--> Closed            (synchronous, idempotent)
//! ```
//!
//! # Invariants
//!
//! 1. At most one slide animation is in flight; a `toggle` while animating
//!    is dropped, not queued.
//! 2. `offset` is monotonic during a slide and lands exactly on `0` (Open)
//!    or `-width` (Closed) at rest.
//! 3. `offset` never leaves `[-width, 0]`.
//! 4. `force_close` is valid from every state and a no-op when already
//!    Closed; it never starts an animation.
//!
//! # Failure Modes
//!
//! - A zero slide duration is treated as an immediately-complete animation
//!   on the next tick (no division by zero).
//! - A non-monotonic `now` (frame scheduler hiccup) cannot move the offset
//!   backwards; progress is clamped against the last observed offset.

use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Geometry and timing for the drawer.
#[derive(Debug, Clone)]
pub struct DrawerConfig {
    /// Panel width in layout units; the resting hidden offset is `-width`.
    pub width: f32,
    /// Duration of one open or close slide (default: 300ms).
    pub slide: Duration,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            width: 280.0,
            slide: Duration::from_millis(300),
        }
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Observable drawer visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerVisibility {
    /// Fully hidden, at rest.
    Closed,
    /// Sliding in.
    Opening,
    /// Fully shown, at rest.
    Open,
    /// Sliding out.
    Closing,
}

/// One in-flight slide between two resting offsets.
#[derive(Debug, Clone, Copy)]
struct Slide {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Slide {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn offset_at(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        self.from + (self.to - self.from) * t
    }

    fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

// ---------------------------------------------------------------------------
// Drawer
// ---------------------------------------------------------------------------

/// The drawer state machine. See the module docs for the transition graph.
#[derive(Debug)]
pub struct Drawer {
    config: DrawerConfig,
    visibility: DrawerVisibility,
    offset: f32,
    slide: Option<Slide>,
}

impl Drawer {
    /// Create a drawer at rest in `Closed`.
    #[must_use]
    pub fn new(config: DrawerConfig) -> Self {
        let offset = -config.width;
        Self {
            config,
            visibility: DrawerVisibility::Closed,
            offset,
            slide: None,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> DrawerVisibility {
        self.visibility
    }

    /// Current horizontal offset in `[-width, 0]`.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether a slide is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
    }

    /// Handle the menu-button tap. Starts the opening or closing slide;
    /// returns `false` when the tap was dropped because a slide is already
    /// in flight.
    pub fn toggle(&mut self, now: Instant) -> bool {
        match self.visibility {
            DrawerVisibility::Opening | DrawerVisibility::Closing => {
                tracing::debug!(
                    target: "vshell.drawer",
                    state = ?self.visibility,
                    "toggle dropped while a slide is in flight"
                );
                false
            }
            DrawerVisibility::Closed => {
                self.start_slide(DrawerVisibility::Opening, 0.0, now);
                true
            }
            DrawerVisibility::Open => {
                self.start_slide(DrawerVisibility::Closing, -self.config.width, now);
                true
            }
        }
    }

    /// Handle a tap on the scrim overlay. Equivalent to [`toggle`](Self::toggle)
    /// when the drawer is Open; ignored otherwise (the scrim only exists
    /// while the drawer is shown).
    pub fn scrim_tapped(&mut self, now: Instant) -> bool {
        if self.visibility == DrawerVisibility::Open {
            self.toggle(now)
        } else {
            false
        }
    }

    /// Drive the drawer to `Closed` synchronously, from any state.
    ///
    /// Used by the navigation shell before a stack mutation: when this
    /// returns, the drawer is Closed and its offset is exactly `-width`.
    /// Idempotent — calling it again is a no-op.
    pub fn force_close(&mut self, _now: Instant) {
        if self.visibility == DrawerVisibility::Closed {
            return;
        }
        tracing::debug!(
            target: "vshell.drawer",
            from = ?self.visibility,
            "force close"
        );
        self.slide = None;
        self.visibility = DrawerVisibility::Closed;
        self.offset = -self.config.width;
    }

    /// Advance the in-flight slide, if any. Returns `true` when the slide
    /// completed during this call (the only way visibility moves past
    /// `Opening`/`Closing`).
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(slide) = self.slide else {
            return false;
        };

        let raw = slide.offset_at(now);
        // Clamp against the last observed offset so a scheduler hiccup can
        // never move the panel backwards.
        self.offset = if slide.to > slide.from {
            self.offset.max(raw)
        } else {
            self.offset.min(raw)
        };

        if !slide.finished(now) {
            return false;
        }

        self.offset = slide.to;
        self.slide = None;
        self.visibility = match self.visibility {
            DrawerVisibility::Opening => DrawerVisibility::Open,
            _ => DrawerVisibility::Closed,
        };
        tracing::debug!(
            target: "vshell.drawer",
            state = ?self.visibility,
            offset = self.offset,
            "slide completed"
        );
        true
    }

    fn start_slide(&mut self, state: DrawerVisibility, to: f32, now: Instant) {
        tracing::debug!(
            target: "vshell.drawer",
            from = ?self.visibility,
            to = ?state,
            "slide started"
        );
        self.slide = Some(Slide {
            from: self.offset,
            to,
            started: now,
            duration: self.config.slide,
        });
        self.visibility = state;
    }
}

impl Default for Drawer {
    fn default() -> Self {
        Self::new(DrawerConfig::default())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
