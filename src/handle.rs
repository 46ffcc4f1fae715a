// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    os::unix::io::{FromRawFd, RawFd},
    path::Path,
    thread,
};

use nix::{
    fcntl::{self, OFlag},
    sys::stat::Mode,
    unistd,
};

use crate::errors::{FdError, FdResult};

/// An exclusively owned open file descriptor.
///
/// Exactly one `FdHandle` is responsible for closing a given descriptor at
/// any time. Ownership ends through [`close`](FdHandle::close) or
/// [`take_ownership`](FdHandle::take_ownership); after either, the handle
/// is permanently inert and every descriptor-bearing operation fails with
/// [`FdError::Closed`]. Dropping a handle whose ownership has not ended
/// closes the descriptor and then panics, so a leak is a bug caught during
/// development rather than a quiet drain on the process descriptor limit.
///
/// A handle is not thread-safe; concurrent use of one instance must be
/// serialized by the caller.
#[derive(Debug)]
pub struct FdHandle {
    fd: RawFd,
    open: bool,
}

impl FdHandle {
    /// Open `path` read-only with close-on-exec set and take ownership of
    /// the resulting descriptor.
    pub fn open<P: AsRef<Path>>(path: P) -> FdResult<FdHandle> {
        let fd = fcntl::open(
            path.as_ref(),
            OFlag::O_RDONLY | OFlag::O_CLOEXEC,
            Mode::empty(),
        )?;
        Ok(FdHandle { fd, open: true })
    }

    /// Whether this handle still owns its descriptor.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Duplicate the owned descriptor into a fresh, independently owned
    /// handle. The two descriptors share the underlying file object, and
    /// with it the seek position; each must still be closed separately.
    /// Success or failure, the original handle is unaffected.
    pub fn duplicate(&self) -> FdResult<FdHandle> {
        if !self.open {
            return Err(FdError::Closed(self.fd));
        }
        let fd = unistd::dup(self.fd)?;
        Ok(FdHandle { fd, open: true })
    }

    /// Hand the raw descriptor to the caller and end this handle's
    /// ownership of it. No close is issued, now or at drop; closing the
    /// returned descriptor becomes the caller's responsibility.
    pub fn take_ownership(&mut self) -> FdResult<RawFd> {
        if !self.open {
            return Err(FdError::Closed(self.fd));
        }
        self.open = false;
        Ok(self.fd)
    }

    /// Close the owned descriptor.
    ///
    /// The handle becomes inert even if the close syscall fails. POSIX
    /// offers no safe retry of a rejected close; the descriptor slot may
    /// already have been handed to an unrelated open.
    pub fn close(&mut self) -> FdResult<()> {
        if !self.open {
            return Err(FdError::Closed(self.fd));
        }
        self.open = false;
        unistd::close(self.fd)?;
        Ok(())
    }

    /// Run `body` with a view of the raw descriptor, without giving up
    /// ownership. The raw value is valid only for the duration of the
    /// call and must not be retained beyond it.
    pub fn with_fd<F, T>(&self, body: F) -> FdResult<T>
    where
        F: FnOnce(RawFd) -> T,
    {
        if !self.open {
            return Err(FdError::Closed(self.fd));
        }
        Ok(body(self.fd))
    }
}

impl FromRawFd for FdHandle {
    /// Take ownership of `fd`. The caller attests that `fd` is open and
    /// that no other live handle owns it; the descriptor is not validated.
    unsafe fn from_raw_fd(fd: RawFd) -> FdHandle {
        FdHandle { fd, open: true }
    }
}

impl Drop for FdHandle {
    fn drop(&mut self) {
        if self.open {
            // Release the descriptor before reporting, so the leak does
            // not also exhaust the process descriptor table.
            if let Err(e) = unistd::close(self.fd) {
                warn!("Failed to close leaked file descriptor {}: {}", self.fd, e);
            }
            self.open = false;
            if thread::panicking() {
                error!("file descriptor {} dropped while still open", self.fd);
            } else {
                panic!("file descriptor {} dropped while still open", self.fd);
            }
        }
    }
}
