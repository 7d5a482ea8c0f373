// recourse/src/resolution/mod.rs

//! The resolution engine: signaling conditions, convenience wrappers, and abort boundaries.

pub mod boundary;
pub mod signal;

pub use boundary::{catch_abort, AbortExt};
pub use signal::{demand, notify, signal, signal_as, signal_boxed};
