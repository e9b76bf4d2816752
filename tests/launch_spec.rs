use std::ffi::{OsStr, OsString};

use watchrun::exec::LaunchSpec;

#[test]
fn interpreter_receives_the_target_as_first_argument() {
    let spec = LaunchSpec::for_target(
        Some("python3".into()),
        "/src/app.py".into(),
        vec![OsString::from("--port"), OsString::from("8080")],
    );

    assert_eq!(spec.program(), OsStr::new("python3"));
    assert_eq!(
        spec.args().to_vec(),
        vec![
            OsString::from("/src/app.py"),
            OsString::from("--port"),
            OsString::from("8080"),
        ]
    );
}

#[test]
fn bare_targets_run_directly() {
    let spec = LaunchSpec::for_target(None, "/src/app".into(), vec![OsString::from("-v")]);

    assert_eq!(spec.program(), OsStr::new("/src/app"));
    assert_eq!(spec.args().to_vec(), vec![OsString::from("-v")]);
}

#[test]
fn display_joins_program_and_arguments() {
    let spec = LaunchSpec::for_target(
        Some("python3".into()),
        "/src/app.py".into(),
        vec![OsString::from("--port"), OsString::from("8080")],
    );

    assert_eq!(spec.display(), "python3 /src/app.py --port 8080");
}
