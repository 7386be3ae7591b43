// Test doubles shared by the unit tests.

use crate::grab::{AtomicGrab, GrabCoordinator};
use crate::launch::{LaunchError, LaunchService};
use crate::platform::SysBackend;
use crate::sys::VERSION;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Default)]
struct Calls {
    loads: usize,
    debug: Vec<bool>,
    alerts: Vec<(String, String)>,
    grab_during_alert: Vec<bool>,
    opened: Vec<String>,
}

/// In-memory backend with scripted answers that records every call it receives.
pub struct MockBackend {
    version: String,
    resolution: u64,
    raw_time: u64,
    clipboard: Option<String>,
    open_result: bool,
    alert_error: Option<String>,
    alert_panics: bool,
    load_error: Option<String>,
    load_panics: bool,
    grab: Option<Arc<AtomicGrab>>,
    calls: Arc<Mutex<Calls>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            version: VERSION.to_string(),
            resolution: 1_000_000,
            raw_time: 0,
            clipboard: None,
            open_result: true,
            alert_error: None,
            alert_panics: false,
            load_error: None,
            load_panics: false,
            grab: None,
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_resolution(mut self, resolution: u64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_raw_time(mut self, raw_time: u64) -> Self {
        self.raw_time = raw_time;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Option<&str>) -> Self {
        self.clipboard = clipboard.map(str::to_string);
        self
    }

    pub fn with_open_result(mut self, open_result: bool) -> Self {
        self.open_result = open_result;
        self
    }

    pub fn with_alert_error(mut self, error: &str) -> Self {
        self.alert_error = Some(error.to_string());
        self
    }

    pub fn with_alert_panic(mut self) -> Self {
        self.alert_panics = true;
        self
    }

    pub fn with_load_error(mut self, error: &str) -> Self {
        self.load_error = Some(error.to_string());
        self
    }

    pub fn with_load_panic(mut self) -> Self {
        self.load_panics = true;
        self
    }

    /// Record the grab state seen while each alert is displayed.
    pub fn watching_grab(mut self, grab: Arc<AtomicGrab>) -> Self {
        self.grab = Some(grab);
        self
    }

    /// Handle onto the call log that stays valid after the backend is moved into a facade.
    pub fn call_log(&self) -> CallLog {
        CallLog {
            calls: Arc::clone(&self.calls),
        }
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.call_log().opened_urls()
    }
}

impl SysBackend for MockBackend {
    fn native_library_version(&self) -> String {
        self.version.clone()
    }

    fn load_native_support(&mut self) -> Result<(), String> {
        self.calls.lock().unwrap().loads += 1;
        if self.load_panics {
            panic!("native support crashed");
        }
        match &self.load_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn timer_resolution(&self) -> u64 {
        self.resolution
    }

    fn time(&self) -> u64 {
        self.raw_time
    }

    fn set_debug(&mut self, debug: bool) {
        self.calls.lock().unwrap().debug.push(debug);
    }

    fn alert(&self, title: &str, message: &str) -> Result<(), String> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls
                .alerts
                .push((title.to_string(), message.to_string()));
            if let Some(grab) = &self.grab {
                calls.grab_during_alert.push(grab.is_grabbed());
            }
        }
        if self.alert_panics {
            panic!("display crashed");
        }
        match &self.alert_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn open_url(&self, url: &str) -> bool {
        self.calls.lock().unwrap().opened.push(url.to_string());
        self.open_result
    }

    fn clipboard(&self) -> Option<String> {
        self.clipboard.clone()
    }
}

#[derive(Clone)]
pub struct CallLog {
    calls: Arc<Mutex<Calls>>,
}

impl CallLog {
    pub fn loads(&self) -> usize {
        self.calls.lock().unwrap().loads
    }

    pub fn debug_flags(&self) -> Vec<bool> {
        self.calls.lock().unwrap().debug.clone()
    }

    pub fn alerts(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().alerts.clone()
    }

    pub fn grab_during_alert(&self) -> Vec<bool> {
        self.calls.lock().unwrap().grab_during_alert.clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().opened.clone()
    }
}

/// Launch service that answers every request the same way.
pub struct ScriptedLaunch {
    outcome: Result<(), LaunchError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLaunch {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LaunchError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LaunchService for ScriptedLaunch {
    fn name(&self) -> &str {
        "scripted"
    }

    fn show_document(&self, url: &Url) -> Result<(), LaunchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.outcome.clone()
    }
}

/// Counts how many times a factory closure was invoked.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
