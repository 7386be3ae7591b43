//! Service facade: one backend bound once per process, every call forwarded to it.
//!
//! Initialization walks `SelectingBackend -> LoadingNativeSupport -> VerifyingVersion`
//! and ends in `Ready` or `Failed`. Failure is terminal: the same [`SysError`] is handed
//! to every caller for the rest of the process.

use crate::config::SysConfig;
use crate::error::SysError;
use crate::grab::{GrabCoordinator, GrabRelease, NoGrab};
use crate::launch::{self, BrowserEnvLaunch, LaunchService};
use crate::logging;
use crate::platform::{self, OsFamily, SysBackend};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Version compiled into the facade. Backends must report exactly this.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Raw timer readings are exposed modulo 2^63.
pub const TIME_MASK: u64 = 0x7FFF_FFFF_FFFF_FFFF;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized = 0,
    SelectingBackend = 1,
    LoadingNativeSupport = 2,
    VerifyingVersion = 3,
    Ready = 4,
    Failed = 5,
}

impl InitState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::SelectingBackend,
            2 => Self::LoadingNativeSupport,
            3 => Self::VerifyingVersion,
            4 => Self::Ready,
            5 => Self::Failed,
            _ => Self::Uninitialized,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

type BackendFactory =
    Box<dyn FnOnce(OsFamily) -> Result<Box<dyn SysBackend>, SysError> + Send>;

/// Everything the one-time initialization needs.
pub struct SysBuilder {
    config: SysConfig,
    grab: Option<Arc<dyn GrabCoordinator>>,
    launch: Option<Arc<dyn LaunchService>>,
    factory: Option<BackendFactory>,
}

impl SysBuilder {
    /// Builder with no launch service and no grab coordinator.
    pub fn new(config: SysConfig) -> Self {
        Self {
            config,
            grab: None,
            launch: None,
            factory: None,
        }
    }

    /// Builder that also attaches the `BROWSER` launch service when the config allows it
    /// and the environment provides one.
    pub fn from_config(config: SysConfig) -> Self {
        let launch = if config.browser_launch {
            BrowserEnvLaunch::discover()
        } else {
            None
        };
        let mut builder = Self::new(config);
        if let Some(launch) = launch {
            builder = builder.launch_service(Arc::new(launch));
        }
        builder
    }

    /// `from_config` over [`SysConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_config(SysConfig::from_env())
    }

    pub fn config(&self) -> &SysConfig {
        &self.config
    }

    pub fn grab_coordinator(mut self, grab: Arc<dyn GrabCoordinator>) -> Self {
        self.grab = Some(grab);
        self
    }

    pub fn launch_service(mut self, launch: Arc<dyn LaunchService>) -> Self {
        self.launch = Some(launch);
        self
    }

    /// Replace the bundled backend construction. Called at most once, with the selected
    /// OS family, and only after selection succeeded.
    pub fn backend_factory<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(OsFamily) -> Result<Box<dyn SysBackend>, SysError> + Send + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Run the initialization state machine and return the bound facade.
    pub fn init(self) -> Result<Sys, SysError> {
        self.run(&|_| {})
    }

    fn run(self, on_state: &dyn Fn(InitState)) -> Result<Sys, SysError> {
        let debug = self.config.debug;
        if debug {
            logging::init_debug();
        }

        // Terminal states are not reported here: the caller owns the outcome.
        let result = self.bind(on_state);
        match &result {
            Ok(sys) => diag!(debug, "[Sys] ready: {} backend, version {}", sys.family, VERSION),
            Err(e) => diag!(debug, "[Sys] initialization failed: {}", e),
        }
        result
    }

    fn bind(self, on_state: &dyn Fn(InitState)) -> Result<Sys, SysError> {
        let debug = self.config.debug;

        on_state(InitState::SelectingBackend);
        let os_name = self.config.os_name();
        let family = platform::select(&os_name)?;
        diag!(debug, "[Sys] OS {:?} selects the {} backend", os_name, family);

        let mut backend: Box<dyn SysBackend> = match self.factory {
            Some(factory) => factory(family)?,
            None => Box::new(platform::instantiate(family)?),
        };

        on_state(InitState::LoadingNativeSupport);
        backend
            .load_native_support()
            .map_err(|reason| SysError::BackendUnavailable {
                backend: family.to_string(),
                reason,
            })?;

        on_state(InitState::VerifyingVersion);
        let found = backend.native_library_version();
        if found != VERSION {
            return Err(SysError::VersionMismatch {
                expected: VERSION.to_string(),
                found,
            });
        }

        backend.set_debug(debug);

        Ok(Sys {
            backend,
            family,
            grab: self.grab.unwrap_or_else(|| Arc::new(NoGrab)),
            launch: self.launch,
            debug,
        })
    }
}

/// The bound facade. Every operation forwards to the backend without re-validation.
pub struct Sys {
    backend: Box<dyn SysBackend>,
    family: OsFamily,
    grab: Arc<dyn GrabCoordinator>,
    launch: Option<Arc<dyn LaunchService>>,
    debug: bool,
}

impl Sys {
    pub fn builder(config: SysConfig) -> SysBuilder {
        SysBuilder::new(config)
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn family(&self) -> OsFamily {
        self.family
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Write `msg` to the diagnostic channel when debug is on.
    pub fn log(&self, msg: &str) {
        diag!(self.debug, "{}", msg);
    }

    /// Timer ticks per second; 0 means no high-resolution timer. Never divide by it
    /// unchecked; see [`Sys::ticks_to_duration`].
    pub fn timer_resolution(&self) -> u64 {
        self.backend.timer_resolution()
    }

    /// Current tick count modulo 2^63. The counter wraps and has no epoch; only the
    /// difference between two close readings means anything.
    pub fn time(&self) -> u64 {
        self.backend.time() & TIME_MASK
    }

    /// Ticks elapsed from `earlier` to `later`, across at most one wrap.
    pub fn time_delta(earlier: u64, later: u64) -> u64 {
        later.wrapping_sub(earlier) & TIME_MASK
    }

    /// Convert a tick count to wall time. `None` when the resolution is unknown.
    pub fn ticks_to_duration(&self, ticks: u64) -> Option<Duration> {
        let resolution = self.timer_resolution();
        if resolution == 0 {
            return None;
        }
        let secs = ticks / resolution;
        let nanos = (ticks % resolution) as u128 * 1_000_000_000 / resolution as u128;
        Some(Duration::new(secs, nanos as u32))
    }

    /// Show a blocking modal alert. Missing text is shown as empty. The pointer grab is
    /// released while the alert is up and the prior grab state is restored on every exit,
    /// including when the backend fails or panics.
    pub fn alert(&self, title: Option<&str>, message: Option<&str>) {
        let title = title.unwrap_or("");
        let message = message.unwrap_or("");

        let _release = GrabRelease::acquire(self.grab.as_ref());
        if let Err(e) = self.backend.alert(title, message) {
            diag!(self.debug, "[Sys] alert could not be displayed: {}", e);
        }
    }

    /// Best-effort browser launch. `false` only when failure is certain.
    pub fn open_url(&self, url: &str) -> bool {
        launch::open_url(
            url,
            self.launch.as_deref(),
            self.backend.as_ref(),
            self.debug,
        )
    }

    /// Clipboard text: `None` when there is no clipboard, `Some("")` when it is empty.
    pub fn clipboard(&self) -> Option<String> {
        self.backend.clipboard()
    }
}

/// Once-only holder for a facade. No caller ever sees a partially built `Sys`; all
/// callers after the first see the same `Sys` or the same error.
pub struct SysCell {
    cell: OnceLock<Result<Sys, SysError>>,
    state: AtomicU8,
}

impl SysCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            state: AtomicU8::new(InitState::Uninitialized as u8),
        }
    }

    /// Current step. Once the outcome is stored this is `Ready` or `Failed`, derived from
    /// the outcome itself.
    pub fn state(&self) -> InitState {
        match self.cell.get() {
            Some(Ok(_)) => InitState::Ready,
            Some(Err(_)) => InitState::Failed,
            None => InitState::from_u8(self.state.load(Ordering::SeqCst)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Initialize with the builder from `make` on first use; later calls return the stored
    /// outcome and never call `make`. A panic while building is stored as
    /// `BackendUnavailable` so it is as terminal as any other failure.
    pub fn get_or_init<F>(&self, make: F) -> Result<&Sys, SysError>
    where
        F: FnOnce() -> SysBuilder,
    {
        self.cell
            .get_or_init(|| {
                let mut backend = String::from("unknown");
                panic::catch_unwind(AssertUnwindSafe(|| {
                    let builder = make();
                    if let Ok(family) = platform::select(&builder.config.os_name()) {
                        backend = family.to_string();
                    }
                    builder.run(&|state| self.state.store(state as u8, Ordering::SeqCst))
                }))
                .unwrap_or_else(|payload| {
                    let step = InitState::from_u8(self.state.load(Ordering::SeqCst));
                    log::error!("[Sys] initialization panicked during {:?}", step);
                    Err(SysError::BackendUnavailable {
                        backend,
                        reason: format!("panicked: {}", panic_message(&*payload)),
                    })
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl Default for SysCell {
    fn default() -> Self {
        Self::new()
    }
}
