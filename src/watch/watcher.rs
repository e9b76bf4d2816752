// src/watch/watcher.rs

//! The blocking watch loop and its bridge into the async supervisor.

use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::watch::source::{self, EventSource};
use crate::watch::target::WatchTarget;

/// Handle for the filesystem watcher thread.
///
/// The thread runs until the event source fails or the process exits; the
/// handle exists so callers keep an anchor to it.
#[derive(Debug)]
pub struct WatcherHandle {
    _thread: thread::JoinHandle<()>,
}

/// Block forever on the platform event source, invoking `on_change` once
/// per qualifying change.
///
/// `on_change` runs synchronously: the next kernel wait only begins after
/// it returns, so a burst of changes arriving in the meantime coalesces in
/// the kernel queue and surfaces as a single later invocation.
///
/// Returns only if the event source fatally fails.
pub fn watch(target: &WatchTarget, on_change: impl FnMut()) -> Result<()> {
    let source = source::open(target)?;
    info!(
        root = %target.root().display(),
        ext = target.extension(),
        "watching for changes"
    );
    run_loop(source, on_change)
}

/// The loop body of [`watch`], generic over the source so tests can drive
/// it with a scripted one.
pub fn run_loop(mut source: impl EventSource, mut on_change: impl FnMut()) -> Result<()> {
    loop {
        if source.next().context("polling for filesystem changes")? {
            on_change();
        }
    }
}

/// Run the watch loop on a dedicated thread, surfacing changes on `changes`.
///
/// The event source is opened here, on the caller's thread, so a facility
/// that cannot be created fails the boot synchronously instead of dying in
/// the background. The channel is expected to have capacity 1: a change
/// arriving while the receiver is mid-restart conflates into the
/// notification already queued.
///
/// The watcher thread ends only on a fatal source error; it logs the error
/// and drops its sender, which the supervisor observes as a closed channel.
pub fn spawn_watcher(target: WatchTarget, changes: mpsc::Sender<()>) -> Result<WatcherHandle> {
    let source = source::open(&target)?;
    info!(
        root = %target.root().display(),
        ext = target.extension(),
        "watching for changes"
    );

    let thread = thread::Builder::new()
        .name("watchrun-watch".into())
        .spawn(move || {
            let result = run_loop(source, || match changes.try_send(()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(())) => {
                    debug!("restart already pending; coalescing change");
                }
                Err(mpsc::error::TrySendError::Closed(())) => {}
            });
            if let Err(err) = result {
                error!(error = %err, "file watcher stopped");
            }
        })
        .context("spawning watcher thread")?;

    Ok(WatcherHandle { _thread: thread })
}
