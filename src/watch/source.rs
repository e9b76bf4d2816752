// src/watch/source.rs

//! The platform event-source capability.
//!
//! Each backend satisfies the same contract: park the calling thread in the
//! kernel until filesystem activity occurs, then report whether any of it
//! touched a relevant file. Which backend is compiled is decided per target
//! OS; both normalize their kernel's notification model into this one
//! blocking-poll shape.

use anyhow::Result;

use crate::watch::target::WatchTarget;

/// A blocking source of "a relevant file changed" signals.
///
/// `next` blocks indefinitely; there are no idle wakeups. Bursts of changes
/// arriving between two calls coalesce with backend-defined granularity:
/// callers get at least one `true` per burst, never zero, and must not rely
/// on anything finer.
pub trait EventSource {
    /// Block until the next batch of filesystem activity and report whether
    /// any of it concerned a file with the watched extension.
    ///
    /// An `Err` means the notification channel itself is dead; there is no
    /// recovery path and watching cannot continue.
    fn next(&mut self) -> Result<bool>;
}

#[cfg(target_os = "linux")]
pub use crate::watch::inotify::InotifySource as PlatformSource;

#[cfg(any(target_os = "macos", target_os = "freebsd"))]
pub use crate::watch::kqueue::KqueueSource as PlatformSource;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "freebsd")))]
compile_error!("watchrun needs inotify (Linux) or kqueue (macOS/FreeBSD)");

/// Open the platform backend for the given target.
pub fn open(target: &WatchTarget) -> Result<PlatformSource> {
    PlatformSource::open(target)
}
