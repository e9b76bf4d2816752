// src/lib.rs

pub mod cli;
pub mod exec;
pub mod logging;
pub mod watch;

use anyhow::{Context, Result, bail};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::exec::{LaunchSpec, ProcessManager};
use crate::watch::WatchTarget;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - target path resolution
/// - the process manager and its initial start
/// - the file watcher
/// - SIGINT / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<()> {
    let target_path = args
        .target
        .canonicalize()
        .with_context(|| format!("resolving {}", args.target.display()))?;
    let root = watch::resolve_watch_root(&target_path)?;

    if args.exec.is_none() && target_path.is_dir() {
        bail!(
            "{} is a directory; pass --exec to name the program to run",
            target_path.display()
        );
    }

    let spec = LaunchSpec::for_target(args.exec, target_path, args.args);
    let target = WatchTarget::new(root, &args.ext);

    let manager = ProcessManager::new();

    let mut sigint = signal(SignalKind::interrupt()).context("installing SIGINT handler")?;
    let mut sigterm = signal(SignalKind::terminate()).context("installing SIGTERM handler")?;

    manager.start(&spec).await;

    // capacity 1: a change landing while a restart is in flight conflates
    // into the notification already queued
    let (change_tx, mut change_rx) = mpsc::channel::<()>(1);
    let _watcher = match watch::spawn_watcher(target, change_tx) {
        Ok(handle) => handle,
        Err(err) => {
            manager.stop().await;
            return Err(err);
        }
    };

    loop {
        tokio::select! {
            _ = sigint.recv() => {
                info!("received SIGINT");
                manager.stop().await;
                return Ok(());
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM");
                manager.stop().await;
                return Ok(());
            }
            changed = change_rx.recv() => {
                if changed.is_none() {
                    // the watcher thread already logged its failure
                    manager.stop().await;
                    bail!("file watching ended unexpectedly");
                }
                info!("restarting due to changes...");
                manager.stop().await;
                manager.start(&spec).await;
            }
        }
    }
}
