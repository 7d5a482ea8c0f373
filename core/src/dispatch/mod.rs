// recourse/src/dispatch/mod.rs

//! Handlers, restarts, and the `Operations` capability that connects them.

pub mod handler;
pub mod operations;
pub mod restart;

pub use handler::Handler;
pub use operations::Operations;
pub use restart::Restart;
