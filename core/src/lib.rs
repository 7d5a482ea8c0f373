// src/lib.rs

//! Recourse: a condition and restart engine for Rust.
//!
//! Signaling a condition is decoupled from deciding how to react to it (handlers)
//! and from producing a recovery value (restarts). Signaling never unwinds on its
//! own: control returns to the signaling call with whatever value the selected
//! restart produced, unless a handler explicitly aborts.
//!
//!  - Nested dynamic-extent scopes, each owning its handlers and restarts.
//!  - Innermost-first, registration-ordered search for handlers and restarts.
//!  - Handlers answer through an `Operations` capability: restart, skip, or abort.
//!  - Per-call policies for unhandled conditions and expected result types.
//!  - Call-scoped restarts that exist for exactly one signal.
//!  - Abort boundaries that stop a deliberate unwind at a chosen level.

pub mod ambient;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod policy;
pub mod resolution;
pub mod restarts;
pub mod scope;

// --- Re-exports for the Public API ---

// Condition/option model and the values flowing through the engine
pub use crate::core::condition::{Condition, RestartOption};
pub use crate::core::decision::Decision;
pub use crate::core::value::{ExpectedType, Value};

// Scopes and the stack that tracks the current one
pub use crate::scope::{ChainedSearch, Scope, ScopeGuard, ScopeId, ScopeKind, ScopeStack};

// Handler/restart registration and the capability handlers receive
pub use crate::dispatch::{Handler, Operations, Restart};

pub use crate::policy::{Policies, UnhandledPolicy};

// The resolution engine
pub use crate::resolution::{catch_abort, demand, notify, signal, signal_as, signal_boxed, AbortExt};

pub use crate::restarts::{Abort, Resume, RetryWith, UseValue};

pub use crate::error::{RecourseError, RecourseResult};

/*
    Core Workflow:
    1. Define condition types (`impl Condition for Malformed {}`) and, if needed,
       restart option types (`impl RestartOption for SkipEntry {}`).
    2. Around a unit of work, create a scope: `Scope::root()`, `scope.child()`, or
       `stack.enter()` on a `ScopeStack`.
    3. Low-level code registers the restarts it can offer: `scope.provide::<RetryWith<String>, _, _>(..)`
       or `scope.add_restart(UseValue::<i32>::restart())`.
    4. High-level code registers handlers: `scope.handle::<Malformed, _>(|c, ops| ops.restart(..))`.
    5. When something notable happens, `scope.signal(condition, &policies, call_restarts)`
       (or `notify` / `demand`) and use the returned value.
    6. Wrap units that may be abandoned in `catch_abort(|| ..)`.
*/
