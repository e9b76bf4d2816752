#![cfg(target_os = "linux")]

use std::error::Error;
use std::fs;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use watchrun::watch::{WatchTarget, spawn_watcher};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn writes_to_matching_files_are_reported() -> TestResult {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("main.ext");
    fs::write(&file, "hello")?;

    let (tx, mut rx) = mpsc::channel(1);
    let _watcher = spawn_watcher(WatchTarget::new(dir.path(), "ext"), tx)?;

    fs::write(&file, "hello again")?;

    timeout(Duration::from_secs(5), rx.recv())
        .await?
        .ok_or("watcher channel closed")?;
    Ok(())
}

#[tokio::test]
async fn other_extensions_stay_silent() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("main.ext"), "")?;

    let (tx, mut rx) = mpsc::channel(1);
    let _watcher = spawn_watcher(WatchTarget::new(dir.path(), "ext"), tx)?;

    fs::write(dir.path().join("notes.txt"), "scratch")?;

    assert!(timeout(Duration::from_millis(500), rx.recv()).await.is_err());
    Ok(())
}

#[tokio::test]
async fn files_created_after_startup_are_still_seen() -> TestResult {
    let dir = tempfile::tempdir()?;

    let (tx, mut rx) = mpsc::channel(1);
    let _watcher = spawn_watcher(WatchTarget::new(dir.path(), "ext"), tx)?;

    fs::write(dir.path().join("fresh.ext"), "")?;

    timeout(Duration::from_secs(5), rx.recv())
        .await?
        .ok_or("watcher channel closed")?;
    Ok(())
}
