// src/exec/manager.rs

//! Lifecycle of the single managed child process.

use std::process::Stdio;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use tokio::process::Command;
use tokio::sync::{Mutex, oneshot};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::exec::command::LaunchSpec;

/// Delay between the graceful group signal and the forceful one.
const GRACE_PERIOD: Duration = Duration::from_millis(100);

/// One live (or just-terminated) child.
///
/// `pgid` equals the child's own pid because the child is spawned as the
/// leader of a fresh process group; no unrelated process can ever share
/// that group id, which is what makes group-wide signaling safe. `exit_rx`
/// fires exactly once, when the exit observer has fully reaped the child.
struct ManagedProcess {
    pgid: Pid,
    exit_rx: oneshot::Receiver<()>,
}

/// Starts and stops the managed program, never letting two lifecycle
/// operations overlap.
///
/// All state lives behind one mutex. `stop` keeps it locked across the
/// grace period so a concurrent `start` cannot race into a process group
/// whose members are mid-termination.
pub struct ProcessManager {
    current: Mutex<Option<ManagedProcess>>,
}

impl ProcessManager {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Spawn the program described by `spec` in a new process group, with
    /// stdio passed through so interactive programs stay interactive.
    ///
    /// A failed launch is logged and leaves the manager idle; the next
    /// change event simply retries.
    pub async fn start(&self, spec: &LaunchSpec) {
        let mut current = self.current.lock().await;

        info!("running `{}`", spec.display());

        let mut command = Command::new(spec.program());
        command
            .args(spec.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .process_group(0); // new group, with the child as leader

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!(error = %err, "failed to start process");
                return;
            }
        };

        let Some(pid) = child.id() else {
            // cannot happen right after a successful spawn; treated like a
            // failed launch rather than guessing at a group id
            error!("spawned process reported no pid");
            return;
        };

        let (exit_tx, exit_rx) = oneshot::channel();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    info!("clean exit - waiting for changes before restart");
                }
                Ok(status) => {
                    warn!(%status, "app crashed - waiting for changes before restart");
                }
                Err(err) => {
                    error!(error = %err, "failed waiting on process");
                }
            }
            // the receiver is gone only if the manager was dropped first
            let _ = exit_tx.send(());
        });

        *current = Some(ManagedProcess {
            pgid: Pid::from_raw(pid as i32),
            exit_rx,
        });
    }

    /// Stop the current process group: graceful signal, grace period,
    /// forceful signal, then wait for the exit observer so the child is
    /// fully reaped before any later `start` touches the bookkeeping.
    ///
    /// A no-op when nothing is running, so calling it twice, or before the
    /// first `start`, is fine.
    pub async fn stop(&self) {
        let mut current = self.current.lock().await;
        let Some(process) = current.as_mut() else {
            return;
        };

        signal_group(process.pgid, Signal::SIGTERM);
        sleep(GRACE_PERIOD).await;
        // idempotent on a group that already exited
        signal_group(process.pgid, Signal::SIGKILL);

        if (&mut process.exit_rx).await.is_err() {
            warn!("exit observer ended without reporting");
        }

        // cleared only after the wait above: the exit observer must never
        // see the current process swapped out from under it
        *current = None;
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Send `signal` to the whole process group. A group that no longer exists
/// is not an error.
fn signal_group(pgid: Pid, signal: Signal) {
    match killpg(pgid, signal) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(err) => warn!(%pgid, %signal, error = %err, "failed to signal process group"),
    }
}
