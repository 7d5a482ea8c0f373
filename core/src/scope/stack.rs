// recourse/src/scope/stack.rs

//! Tracks the current scope of one logical call chain.
//!
//! A `ScopeStack` is an ordinary value passed to whoever needs it; there is no
//! process-global "current scope". See [`crate::ambient`] for a per-thread instance.

use crate::scope::node::Scope;
use parking_lot::Mutex;
use std::ops::Deref;
use tracing::{event, Level};

/// The "current scope" pointer of one call chain, with create/retire operations.
///
/// Scopes must be retired in exactly the reverse order of their creation. The
/// stack cannot verify that in general; out-of-order retirement is logged and
/// leaves the chain pointing at the retired scope's parent.
#[derive(Debug, Default)]
pub struct ScopeStack {
  current: Mutex<Option<Scope>>,
}

impl ScopeStack {
  /// A stack with no current scope. The first `create` makes a root.
  pub fn new() -> Self {
    Self::default()
  }

  /// A stack whose current scope is `root`.
  pub fn with_root(root: Scope) -> Self {
    Self {
      current: Mutex::new(Some(root)),
    }
  }

  pub fn current(&self) -> Option<Scope> {
    self.current.lock().clone()
  }

  /// Creates a scope nested under the current one and makes it current.
  pub fn create(&self) -> Scope {
    let mut current = self.current.lock();
    let scope = match current.as_ref() {
      Some(parent) => parent.child(),
      None => Scope::root(),
    };
    *current = Some(scope.clone());
    scope
  }

  /// Restores `scope`'s parent as the current scope.
  ///
  /// No-op if `scope` was already retired or if there is no current scope.
  pub fn retire(&self, scope: &Scope) {
    let mut current = self.current.lock();
    let Some(active) = current.as_ref() else {
      event!(Level::TRACE, scope = %scope.id(), "No current scope; retire is a no-op.");
      return;
    };
    if scope.is_retired() {
      event!(Level::TRACE, scope = %scope.id(), "Scope already retired.");
      return;
    }
    if active != scope {
      event!(
        Level::WARN,
        scope = %scope.id(),
        current = %active.id(),
        "Retiring a scope that is not current. Scopes must be retired in reverse creation order."
      );
    }
    scope.mark_retired();
    *current = scope.parent().cloned();
    event!(Level::TRACE, scope = %scope.id(), "Scope retired.");
  }

  /// Creates a scope and returns a guard that retires it when dropped.
  pub fn enter(&self) -> ScopeGuard<'_> {
    ScopeGuard {
      stack: self,
      scope: self.create(),
    }
  }
}

/// Owns a scope created by [`ScopeStack::enter`] and retires it on drop, on every
/// exit path of the frame that holds it.
#[must_use = "the scope is retired as soon as the guard is dropped"]
pub struct ScopeGuard<'s> {
  stack: &'s ScopeStack,
  scope: Scope,
}

impl ScopeGuard<'_> {
  pub fn scope(&self) -> &Scope {
    &self.scope
  }
}

impl Deref for ScopeGuard<'_> {
  type Target = Scope;

  fn deref(&self) -> &Scope {
    &self.scope
  }
}

impl Drop for ScopeGuard<'_> {
  fn drop(&mut self) {
    self.stack.retire(&self.scope);
  }
}
