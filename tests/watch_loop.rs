use std::error::Error;

use anyhow::anyhow;
use watchrun::watch::{EventSource, watcher};

type TestResult = Result<(), Box<dyn Error>>;

/// Scripted event source: plays back a fixed sequence of poll results, then
/// fails the way a dead notification channel would.
struct ScriptedSource {
    results: Vec<bool>,
}

impl EventSource for ScriptedSource {
    fn next(&mut self) -> anyhow::Result<bool> {
        if self.results.is_empty() {
            return Err(anyhow!("notification channel closed"));
        }
        Ok(self.results.remove(0))
    }
}

#[test]
fn callback_fires_once_per_relevant_poll() -> TestResult {
    let source = ScriptedSource {
        results: vec![true, false, true, false],
    };
    let mut calls = 0;

    let result = watcher::run_loop(source, || calls += 1);

    assert!(result.is_err());
    assert_eq!(calls, 2);
    Ok(())
}

#[test]
fn irrelevant_polls_never_invoke_the_callback() -> TestResult {
    let source = ScriptedSource {
        results: vec![false; 5],
    };
    let mut calls = 0;

    let _ = watcher::run_loop(source, || calls += 1);

    assert_eq!(calls, 0);
    Ok(())
}

#[test]
fn fatal_source_errors_propagate() {
    let source = ScriptedSource { results: vec![] };

    let err = watcher::run_loop(source, || {}).unwrap_err();

    assert!(err.to_string().contains("polling for filesystem changes"));
}
