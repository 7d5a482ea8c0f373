// recourse/src/ambient.rs

//! A per-thread scope stack, for code that cannot thread a `Scope` through every call.
//!
//! Each thread has its own `ScopeStack`; call chains on different threads never see
//! each other's scopes. Code that can pass scopes explicitly should prefer that.

use crate::core::condition::Condition;
use crate::core::value::Value;
use crate::dispatch::Restart;
use crate::error::RecourseResult;
use crate::policy::Policies;
use crate::resolution;
use crate::scope::{Scope, ScopeStack};
use std::any::Any;
use std::marker::PhantomData;
use std::ops::Deref;

thread_local! {
  static STACK: ScopeStack = ScopeStack::new();
}

/// Guard for a scope entered on this thread's stack. Retires the scope on drop.
/// Not `Send`: it must be dropped on the thread that created it.
#[must_use = "the scope is retired as soon as the guard is dropped"]
pub struct AmbientScope {
  scope: Scope,
  _not_send: PhantomData<*const ()>,
}

impl Deref for AmbientScope {
  type Target = Scope;

  fn deref(&self) -> &Scope {
    &self.scope
  }
}

impl Drop for AmbientScope {
  fn drop(&mut self) {
    // The thread-local may already be gone during thread teardown.
    let _ = STACK.try_with(|stack| stack.retire(&self.scope));
  }
}

/// Creates a scope nested under this thread's current scope and makes it current.
pub fn enter() -> AmbientScope {
  AmbientScope {
    scope: STACK.with(ScopeStack::create),
    _not_send: PhantomData,
  }
}

/// This thread's current scope, if any.
pub fn current() -> Option<Scope> {
  STACK.with(ScopeStack::current)
}

// Signals from a thread with no current scope resolve against an empty root.
fn current_or_empty() -> Scope {
  current().unwrap_or_else(Scope::root)
}

/// [`resolution::signal`] from this thread's current scope.
pub fn signal<C, I>(condition: C, policies: &Policies, restarts: I) -> RecourseResult<Value>
where
  C: Condition,
  I: IntoIterator<Item = Restart>,
{
  resolution::signal(&current_or_empty(), condition, policies, restarts)
}

/// [`resolution::notify`] from this thread's current scope.
pub fn notify<C: Condition>(condition: C) -> RecourseResult<()> {
  resolution::notify(&current_or_empty(), condition)
}

/// [`resolution::demand`] from this thread's current scope.
pub fn demand<T, C>(condition: C) -> RecourseResult<T>
where
  T: Any + Send + Sync + std::fmt::Debug,
  C: Condition,
{
  resolution::demand::<T, C>(&current_or_empty(), condition)
}
