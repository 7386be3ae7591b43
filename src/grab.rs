//! Pointer-grab coordination used while a modal alert is on screen.

use std::sync::atomic::{AtomicBool, Ordering};

/// Toggle interface onto the application's input-grab subsystem.
pub trait GrabCoordinator: Send + Sync {
    fn is_grabbed(&self) -> bool;
    fn set_grabbed(&self, grabbed: bool);
}

/// Coordinator for applications that never grab the pointer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGrab;

impl GrabCoordinator for NoGrab {
    fn is_grabbed(&self) -> bool {
        false
    }

    fn set_grabbed(&self, _grabbed: bool) {}
}

/// A grab flag shared between the facade and an input layer.
#[derive(Debug, Default)]
pub struct AtomicGrab {
    grabbed: AtomicBool,
}

impl AtomicGrab {
    pub fn new(grabbed: bool) -> Self {
        Self {
            grabbed: AtomicBool::new(grabbed),
        }
    }
}

impl GrabCoordinator for AtomicGrab {
    fn is_grabbed(&self) -> bool {
        self.grabbed.load(Ordering::SeqCst)
    }

    fn set_grabbed(&self, grabbed: bool) {
        self.grabbed.store(grabbed, Ordering::SeqCst);
    }
}

/// Releases the grab for as long as it lives and puts the prior state back on drop,
/// including during unwinding.
pub(crate) struct GrabRelease<'a> {
    grab: &'a dyn GrabCoordinator,
    prior: bool,
}

impl<'a> GrabRelease<'a> {
    pub(crate) fn acquire(grab: &'a dyn GrabCoordinator) -> Self {
        let prior = grab.is_grabbed();
        if prior {
            grab.set_grabbed(false);
        }
        Self { grab, prior }
    }
}

impl Drop for GrabRelease<'_> {
    fn drop(&mut self) {
        if self.grab.is_grabbed() != self.prior {
            self.grab.set_grabbed(self.prior);
        }
    }
}
