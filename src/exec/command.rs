// src/exec/command.rs

//! Launch specification for the managed program.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// What to run on every (re)start: a program and its ordered arguments.
///
/// Built once at boot and reused verbatim for every restart.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    program: OsString,
    args: Vec<OsString>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<OsString>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the spec from the CLI surface: with an interpreter the target
    /// path becomes its first argument (`python3 app.py -- ...`); without
    /// one the target itself is the program.
    pub fn for_target(exec: Option<PathBuf>, target: PathBuf, passthrough: Vec<OsString>) -> Self {
        match exec {
            Some(program) => {
                let mut args = Vec::with_capacity(passthrough.len() + 1);
                args.push(target.into_os_string());
                args.extend(passthrough);
                Self::new(program.into_os_string(), args)
            }
            None => Self::new(target.into_os_string(), passthrough),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// One-line rendering for log output.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}
