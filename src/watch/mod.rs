// src/watch/mod.rs

//! Filesystem watching.
//!
//! Turns platform change notifications into one semantic signal: "a file
//! with the watched extension changed". Two kernel models are normalized
//! behind [`source::EventSource`]:
//!
//! - [`inotify`]: a stream of named records from a single directory watch
//!   (Linux)
//! - [`kqueue`]: per-descriptor state changes over a pre-enumerated file
//!   set (macOS/FreeBSD)
//!
//! [`watcher`] owns the blocking loop and the bridge into the async
//! supervisor. This module knows nothing about the managed process; it only
//! reports changes.

pub mod source;
pub mod target;
pub mod watcher;

#[cfg(target_os = "linux")]
pub mod inotify;
#[cfg(any(target_os = "macos", target_os = "freebsd"))]
pub mod kqueue;

pub use source::EventSource;
pub use target::{WatchTarget, resolve_watch_root};
pub use watcher::{WatcherHandle, spawn_watcher, watch};
