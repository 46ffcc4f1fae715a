// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Exclusive ownership of raw Unix file descriptors.
//!
//! A file descriptor is a scarce, process-wide handle that must be closed
//! exactly once. [`FdHandle`] owns one open descriptor for its lifetime and
//! checks at every entry point that ownership has not already ended, turning
//! use-after-close and double-close into ordinary errors and descriptor
//! leaks into a loud drop-time panic.

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
#[macro_use]
extern crate proptest;

mod errors;
mod handle;

pub use self::errors::{FdError, FdResult};
pub use self::handle::FdHandle;
