// src/watch/kqueue.rs

//! Descriptor-set event source for macOS and FreeBSD, built on kqueue.
//!
//! kqueue's vnode filter is per descriptor, so every matching file is
//! enumerated and opened up front and one registration is made per
//! descriptor. Files created after the watch starts have no descriptor and
//! stay invisible until watchrun is restarted; that is a property of the
//! per-descriptor model, not something this backend papers over.

use std::fs::File;
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, RawFd};
use std::ptr;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::watch::source::EventSource;
use crate::watch::target::WatchTarget;

pub struct KqueueSource {
    kq: RawFd,
    // keeps the registered descriptors open for the lifetime of the queue
    _files: Vec<File>,
}

impl KqueueSource {
    /// Enumerate all matching files under the target root, open each one,
    /// and register write/rename/delete interest per descriptor.
    pub fn open(target: &WatchTarget) -> Result<Self> {
        let paths = target.matching_files()?;

        // SAFETY: fd-returning syscall with no arguments.
        let kq = unsafe { libc::kqueue() };
        if kq < 0 {
            return Err(io::Error::last_os_error()).context("creating kqueue");
        }

        let mut files = Vec::with_capacity(paths.len());
        let mut changes = Vec::with_capacity(paths.len());
        for path in &paths {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    // SAFETY: kq came from kqueue() above and is not used again.
                    unsafe { libc::close(kq) };
                    return Err(err)
                        .with_context(|| format!("opening {} for watching", path.display()));
                }
            };

            // SAFETY: kevent is a plain C struct; an all-zero value is valid.
            let mut change: libc::kevent = unsafe { mem::zeroed() };
            change.ident = file.as_raw_fd() as libc::uintptr_t;
            change.filter = libc::EVFILT_VNODE;
            change.flags = libc::EV_ADD | libc::EV_CLEAR;
            change.fflags = libc::NOTE_WRITE | libc::NOTE_RENAME | libc::NOTE_DELETE;
            changes.push(change);
            files.push(file);
        }

        if !changes.is_empty() {
            // register the whole change list in one call; nevents = 0 means
            // nothing is drained and the call returns immediately
            // SAFETY: `changes` is valid for the duration of the call and
            // its length is exact.
            let rc = unsafe {
                libc::kevent(
                    kq,
                    changes.as_ptr(),
                    changes.len() as libc::c_int,
                    ptr::null_mut(),
                    0,
                    ptr::null(),
                )
            };
            if rc < 0 {
                let err = io::Error::last_os_error();
                // SAFETY: kq came from kqueue() above and is not used again.
                unsafe { libc::close(kq) };
                return Err(err).context("registering kqueue interest");
            }
        }

        debug!(files = files.len(), "kqueue watch registered");
        Ok(Self { kq, _files: files })
    }
}

impl EventSource for KqueueSource {
    /// Any wakeup is a relevant change: the extension filter was already
    /// applied when the descriptor set was built.
    fn next(&mut self) -> Result<bool> {
        // SAFETY: kevent is a plain C struct; an all-zero value is valid.
        let mut event: libc::kevent = unsafe { mem::zeroed() };
        loop {
            // null timespec: wait indefinitely, no idle wakeups
            // SAFETY: `event` is valid for writes for the duration of the call.
            let rc = unsafe { libc::kevent(self.kq, ptr::null(), 0, &mut event, 1, ptr::null()) };
            if rc > 0 {
                trace!(ident = event.ident, fflags = event.fflags, "kqueue event");
                return Ok(true);
            }
            let err = io::Error::last_os_error();
            if rc < 0 && err.kind() != io::ErrorKind::Interrupted {
                return Err(err).context("waiting for kqueue events");
            }
            // rc == 0 cannot happen without a timeout; EINTR just retries
        }
    }
}

impl Drop for KqueueSource {
    fn drop(&mut self) {
        // SAFETY: kq is owned by this source and closed exactly once.
        unsafe { libc::close(self.kq) };
    }
}
