use std::error::Error;
use std::fs;
use std::path::Path;

use watchrun::watch::{WatchTarget, resolve_watch_root};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn suffix_match_is_case_sensitive() -> TestResult {
    let target = WatchTarget::new("/tmp", "ext");

    assert!(target.is_relevant("main.ext"));
    assert!(!target.is_relevant("notes.txt"));
    assert!(!target.is_relevant("MAIN.EXT"));
    assert!(!target.is_relevant("main.ext.bak"));
    Ok(())
}

#[test]
fn extension_gets_a_leading_dot() -> TestResult {
    assert_eq!(WatchTarget::new("/tmp", "rs").extension(), ".rs");
    assert_eq!(WatchTarget::new("/tmp", ".rs").extension(), ".rs");
    assert_eq!(WatchTarget::new("/tmp", "  rs ").extension(), ".rs");
    Ok(())
}

#[test]
fn bare_names_need_the_dot_to_match() -> TestResult {
    let target = WatchTarget::new("/tmp", "rs");

    assert!(target.is_relevant("main.rs"));
    assert!(!target.is_relevant("mainrs"));
    Ok(())
}

#[test]
fn matching_files_walks_recursively() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;
    fs::write(dir.path().join("a.ext"), "")?;
    fs::write(dir.path().join("sub").join("b.ext"), "")?;
    fs::write(dir.path().join("notes.txt"), "")?;

    let target = WatchTarget::new(dir.path(), "ext");
    let mut files = target.matching_files()?;
    files.sort();

    assert_eq!(
        files,
        vec![
            dir.path().join("a.ext"),
            dir.path().join("sub").join("b.ext"),
        ]
    );
    Ok(())
}

#[test]
fn file_targets_watch_their_parent_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("main.ext");
    fs::write(&file, "")?;

    assert_eq!(resolve_watch_root(&file)?, dir.path());
    assert_eq!(resolve_watch_root(dir.path())?, dir.path());
    Ok(())
}

#[test]
fn missing_paths_fail_resolution() {
    assert!(resolve_watch_root(Path::new("/no/such/path")).is_err());
}
