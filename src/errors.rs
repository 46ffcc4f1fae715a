// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{error::Error, fmt, os::unix::io::RawFd};

use nix::errno::Errno;

pub type FdResult<T> = Result<T, FdError>;

#[derive(Debug)]
pub enum FdError {
    /// The handle's ownership of its descriptor has already ended, by
    /// close or by transfer; the operation was refused before any syscall.
    Closed(RawFd),
    /// The underlying open, dup, or close syscall failed.
    Os(nix::Error),
}

impl FdError {
    /// The OS error code equivalent for this error. A refused operation
    /// on an inert handle reports the code for a bad file descriptor.
    pub fn errno(&self) -> Errno {
        match *self {
            FdError::Closed(_) => Errno::EBADF,
            FdError::Os(err) => err,
        }
    }
}

impl fmt::Display for FdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FdError::Closed(fd) => write!(f, "file descriptor {} is not open", fd),
            FdError::Os(ref err) => write!(f, "OS error: {}", err),
        }
    }
}

impl Error for FdError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FdError::Closed(_) => None,
            FdError::Os(ref err) => Some(err),
        }
    }
}

impl From<nix::Error> for FdError {
    fn from(err: nix::Error) -> FdError {
        FdError::Os(err)
    }
}
