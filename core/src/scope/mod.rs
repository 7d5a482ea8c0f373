// recourse/src/scope/mod.rs

//! Nested dynamic-extent scopes, the stack that tracks the current one, and the
//! chained search that walks them outward.

pub mod node;
pub mod search;
pub mod stack;

pub use node::{Scope, ScopeId, ScopeKind};
pub use search::ChainedSearch;
pub use stack::{ScopeGuard, ScopeStack};
