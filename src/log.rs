//! Logging shim.
//!
//! With the `log` feature the macros forward to the `log` crate. Without it
//! they expand to nothing, so no formatting code ends up in the binary.

#[cfg(feature = "log")]
pub(crate) use ::log::{debug, trace, warn};

#[cfg(not(feature = "log"))]
macro_rules! __debug {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "log"))]
macro_rules! __trace {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "log"))]
macro_rules! __warn {
    ($($arg:tt)+) => {};
}

#[cfg(not(feature = "log"))]
pub(crate) use {__debug as debug, __trace as trace, __warn as warn};
