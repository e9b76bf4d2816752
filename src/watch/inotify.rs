// src/watch/inotify.rs

//! Stream-strategy event source for Linux, built directly on inotify.
//!
//! Interest is registered on the watched directory itself rather than on
//! individual files, so files created or replaced after startup are still
//! observed. Each wakeup delivers one or more variable-length records, each
//! carrying a NUL-terminated file name relative to the directory.

use std::ffi::CString;
use std::io;
use std::mem;
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStrExt;

use anyhow::{Context, Result, bail};
use tracing::trace;

use crate::watch::source::EventSource;
use crate::watch::target::WatchTarget;

/// Maximum file-name length on Linux; one maximal inotify record is the
/// fixed header plus the name plus its terminator.
const NAME_MAX: usize = 255;

const HEADER_LEN: usize = mem::size_of::<libc::inotify_event>();
const BUF_LEN: usize = HEADER_LEN + NAME_MAX + 1;

pub struct InotifySource {
    fd: RawFd,
    target: WatchTarget,
    buffer: [u8; BUF_LEN],
}

impl InotifySource {
    /// Create an inotify instance and register the target's root directory
    /// for create/modify/delete/move activity.
    pub fn open(target: &WatchTarget) -> Result<Self> {
        // SAFETY: fd-returning syscall with no pointer arguments.
        let fd = unsafe { libc::inotify_init1(libc::IN_CLOEXEC) };
        if fd < 0 {
            return Err(io::Error::last_os_error()).context("creating inotify instance");
        }

        let dir = CString::new(target.root().as_os_str().as_bytes())
            .context("watch root contains an interior NUL byte")?;
        let mask = libc::IN_MODIFY
            | libc::IN_CREATE
            | libc::IN_DELETE
            | libc::IN_MOVED_FROM
            | libc::IN_MOVED_TO;
        // SAFETY: `dir` is a valid NUL-terminated string for the duration of
        // the call.
        let wd = unsafe { libc::inotify_add_watch(fd, dir.as_ptr(), mask) };
        if wd < 0 {
            let err = io::Error::last_os_error();
            // SAFETY: fd came from inotify_init1 above and is not used again.
            unsafe { libc::close(fd) };
            return Err(err)
                .with_context(|| format!("watching {}", target.root().display()));
        }

        Ok(Self {
            fd,
            target: target.clone(),
            buffer: [0u8; BUF_LEN],
        })
    }
}

impl EventSource for InotifySource {
    fn next(&mut self) -> Result<bool> {
        let len = loop {
            // SAFETY: the buffer is owned by `self` and BUF_LEN bytes long.
            let n = unsafe { libc::read(self.fd, self.buffer.as_mut_ptr().cast(), BUF_LEN) };
            if n >= 0 {
                break n as usize;
            }
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            // anything else means the inotify handle is gone; a dead
            // notification channel has no recovery path
            return Err(err).context("reading from inotify descriptor");
        };

        if len < HEADER_LEN {
            bail!("short inotify read ({len} bytes)");
        }

        // the record's declared length field is rounded up to an alignment
        // boundary, so recover the true name length by scanning for the
        // terminating NUL instead
        let name_region = &self.buffer[HEADER_LEN..len];
        let name_len = name_region
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(name_region.len());
        let name = String::from_utf8_lossy(&name_region[..name_len]);

        let relevant = self.target.is_relevant(&name);
        trace!(name = %name, relevant, "inotify record");

        // stale trailing bytes from a longer previous name must not survive
        // into the next read
        self.buffer.fill(0);

        Ok(relevant)
    }
}

impl Drop for InotifySource {
    fn drop(&mut self) {
        // SAFETY: fd is owned by this source and closed exactly once.
        unsafe { libc::close(self.fd) };
    }
}
