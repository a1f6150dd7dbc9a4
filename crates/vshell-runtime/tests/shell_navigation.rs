//! Drawer/navigation coordination through the shell model, including the
//! observable ordering of force-close before any stack mutation.

mod common;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use common::{RecordingNotifier, ScriptedLauncher};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use vshell_core::drawer::DrawerVisibility;
use vshell_core::navigation::{ScreenId, ScreenParams};
use vshell_runtime::app::{Msg, ShellApp};
use vshell_runtime::config::ShellConfig;
use vshell_runtime::screens;

fn shell() -> ShellApp<RecordingNotifier> {
    ShellApp::new(
        ShellConfig::default(),
        Arc::new(ScriptedLauncher::nothing_installed()),
        RecordingNotifier::default(),
    )
}

fn goto(app: &mut ShellApp<RecordingNotifier>, now: Instant, screen: &str) {
    app.update(
        Msg::NavigateTo {
            screen: ScreenId::from(screen),
            params: ScreenParams::new(),
        },
        now,
    );
}

fn open_drawer(app: &mut ShellApp<RecordingNotifier>, t0: Instant) {
    app.update(Msg::MenuPressed, t0);
    app.update(Msg::Frame, t0 + Duration::from_millis(300));
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Open);
}

// ---------------------------------------------------------------------------
// Event capture (target + message pairs, in emission order)
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_string());
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        self.events.lock().unwrap().push((
            event.metadata().target().to_string(),
            visitor.0.unwrap_or_default(),
        ));
    }
}

impl EventCapture {
    fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }

    fn index_of(&self, target: &str, needle: &str) -> Option<usize> {
        self.events()
            .iter()
            .position(|(t, m)| t == target && m.contains(needle))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn navigating_from_an_open_drawer_lands_closed() {
    let mut app = shell();
    let t0 = Instant::now();
    goto(&mut app, t0, screens::MAIN);
    open_drawer(&mut app, t0);

    goto(&mut app, t0 + Duration::from_millis(400), screens::MODELS);
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Closed);
    assert_eq!(app.nav().current().screen, ScreenId::from(screens::MODELS));
}

#[test]
fn sign_out_closes_the_drawer_before_the_stack_is_replaced() {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut app = shell();
        let t0 = Instant::now();
        goto(&mut app, t0, screens::MAIN);
        open_drawer(&mut app, t0);

        app.update(Msg::SignOut, t0 + Duration::from_millis(400));
        assert_eq!(app.drawer().visibility(), DrawerVisibility::Closed);
        assert_eq!(app.drawer().offset(), -280.0);
        assert_eq!(app.nav().depth(), 1);
        assert_eq!(app.nav().current().screen, ScreenId::from(screens::START));
    });

    let close_idx = capture
        .index_of("vshell.drawer", "force close")
        .expect("drawer should log its forced close");
    let reset_idx = capture
        .index_of("vshell.nav", "reset")
        .expect("nav should log the reset");
    assert!(
        close_idx < reset_idx,
        "drawer must close before the stack is replaced (close at {close_idx}, reset at {reset_idx})"
    );
}

#[test]
fn back_at_the_root_changes_nothing() {
    let mut app = shell();
    let t0 = Instant::now();
    app.update(Msg::Back, t0);
    assert_eq!(app.nav().depth(), 1);
    assert_eq!(app.nav().current().screen, ScreenId::from(screens::START));
}

#[test]
fn drawer_round_trip_through_frame_messages() {
    let mut app = shell();
    let t0 = Instant::now();
    goto(&mut app, t0, screens::MAIN);

    app.update(Msg::MenuPressed, t0);
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Opening);
    app.update(Msg::Frame, t0 + Duration::from_millis(150));
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Opening);
    app.update(Msg::Frame, t0 + Duration::from_millis(300));
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Open);
    assert_eq!(app.drawer().offset(), 0.0);

    app.update(Msg::ScrimTapped, t0 + Duration::from_millis(350));
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Closing);
    app.update(Msg::Frame, t0 + Duration::from_millis(650));
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Closed);
    assert_eq!(app.drawer().offset(), -280.0);
}

#[test]
fn menu_taps_during_the_slide_are_dropped() {
    let mut app = shell();
    let t0 = Instant::now();
    goto(&mut app, t0, screens::MAIN);

    app.update(Msg::MenuPressed, t0);
    app.update(Msg::MenuPressed, t0 + Duration::from_millis(50));
    app.update(Msg::MenuPressed, t0 + Duration::from_millis(100));
    app.update(Msg::Frame, t0 + Duration::from_millis(300));
    // The repeated taps neither reversed nor restarted the slide.
    assert_eq!(app.drawer().visibility(), DrawerVisibility::Open);
}

#[test]
fn params_travel_with_their_entry() {
    use vshell_core::navigation::ParamValue;

    let mut app = shell();
    let t0 = Instant::now();
    let mut params = ScreenParams::new();
    params.insert(
        "url".to_string(),
        ParamValue::Str("http://172.20.10.2:8050/".to_string()),
    );
    app.update(
        Msg::NavigateTo {
            screen: ScreenId::from(screens::WEB),
            params,
        },
        t0,
    );
    assert_eq!(
        app.nav().current().params.get("url"),
        Some(&ParamValue::Str("http://172.20.10.2:8050/".to_string()))
    );
}
