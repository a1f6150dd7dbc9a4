//! Shared test doubles: a scripted platform launcher and a recording
//! notifier.
#![allow(dead_code)] // not every test binary touches every helper

use std::sync::{Arc, Mutex};
use std::time::Duration;

use vshell_runtime::launcher::{LaunchAck, Launcher, PlatformError};
use vshell_runtime::notifier::{Notice, Notifier};

/// Scripted launcher: canned per-URI reachability answers, one open result,
/// an optional artificial delay, and a journal of every call made.
pub struct ScriptedLauncher {
    reachable: Vec<(String, Result<bool, PlatformError>)>,
    open_result: Result<LaunchAck, PlatformError>,
    delay: Duration,
    journal: Mutex<Vec<String>>,
}

impl ScriptedLauncher {
    pub fn new(
        reachable: &[(&str, Result<bool, PlatformError>)],
        open_result: Result<LaunchAck, PlatformError>,
    ) -> Self {
        Self {
            reachable: reachable
                .iter()
                .map(|(u, r)| ((*u).to_string(), r.clone()))
                .collect(),
            open_result,
            delay: Duration::ZERO,
            journal: Mutex::new(Vec::new()),
        }
    }

    pub fn installed(uri: &str) -> Self {
        Self::new(&[(uri, Ok(true))], Ok(LaunchAck::Accepted))
    }

    pub fn nothing_installed() -> Self {
        Self::new(&[], Ok(LaunchAck::Accepted))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("query")).count()
    }

    pub fn open_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("open")).count()
    }
}

impl Launcher for ScriptedLauncher {
    fn can_open(&self, uri: &str) -> Result<bool, PlatformError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.journal.lock().unwrap().push(format!("query {uri}"));
        self.reachable
            .iter()
            .find(|(u, _)| u == uri)
            .map(|(_, r)| r.clone())
            .unwrap_or(Ok(false))
    }

    fn open(&self, uri: &str) -> Result<LaunchAck, PlatformError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.journal.lock().unwrap().push(format!("open {uri}"));
        self.open_result.clone()
    }
}

/// Notifier that records every delivered notice.
#[derive(Clone, Default)]
pub struct RecordingNotifier(Arc<Mutex<Vec<Notice>>>);

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}
