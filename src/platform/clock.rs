// High-resolution tick source shared by the platform backends.
// Ticks are nanoseconds of a monotonic clock; the counter is free-running and not
// aligned to any epoch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Which counter backs `monotonic_nanos`. Chosen on first use and never switched, so
/// every reading in a process shares one base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    ClockGettime,
    Anchored,
}

fn source() -> Source {
    static SOURCE: OnceLock<Source> = OnceLock::new();
    *SOURCE.get_or_init(|| {
        if cfg!(unix) && clock_gettime_nanos().is_some() {
            Source::ClockGettime
        } else {
            Source::Anchored
        }
    })
}

/// Read the monotonic clock in nanoseconds.
pub fn monotonic_nanos() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);
    match source() {
        Source::ClockGettime => match clock_gettime_nanos() {
            Some(nanos) => {
                LAST.store(nanos, Ordering::Relaxed);
                nanos
            }
            // A failed read repeats the previous one instead of switching clocks.
            None => LAST.load(Ordering::Relaxed),
        },
        Source::Anchored => anchored_nanos(),
    }
}

#[cfg(unix)]
fn clock_gettime_nanos() -> Option<u64> {
    // SAFETY: timespec is plain old data; all-zero is a valid value.
    let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
    if rc != 0 {
        return None;
    }
    Some(
        (ts.tv_sec as u64)
            .wrapping_mul(NANOS_PER_SECOND)
            .wrapping_add(ts.tv_nsec as u64),
    )
}

#[cfg(not(unix))]
fn clock_gettime_nanos() -> Option<u64> {
    None
}

/// Nanoseconds since the first call in this process.
pub fn anchored_nanos() -> u64 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();

    let anchor = ANCHOR.get_or_init(Instant::now);
    // u128 nanoseconds only overflow u64 after ~584 years; truncation is the wrap.
    anchor.elapsed().as_nanos() as u64
}
