// recourse/src/scope/node.rs

//! Defines `Scope`, a node in the chain of nested dynamic-extent contexts.
//! Each scope owns the handlers and restarts registered in it and points at its parent.

use crate::core::condition::{Condition, RestartOption};
use crate::core::decision::Decision;
use crate::dispatch::{Handler, Operations, Restart};
use crate::error::RecourseResult;
use crate::scope::search::ChainedSearch;
use parking_lot::{RwLock, RwLockReadGuard};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a scope, used for logging and introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
  fn next() -> Self {
    ScopeId(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
  }

  pub fn as_u64(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for ScopeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "scope#{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
  /// A scope established by application code around a unit of work.
  Dynamic,
  /// The virtual scope carrying one `signal` call's restarts. Lives only for that call.
  Call,
}

/// Entries registered directly in one scope, in insertion order.
#[derive(Default)]
pub(crate) struct ScopeEntries {
  pub(crate) handlers: Vec<Handler>,
  pub(crate) restarts: Vec<Restart>,
}

struct ScopeNode {
  id: ScopeId,
  kind: ScopeKind,
  depth: usize,
  // Fixed at creation; a node can only point at a node that already exists,
  // so parent chains are acyclic.
  parent: Option<Scope>,
  entries: RwLock<ScopeEntries>,
  retired: AtomicBool,
}

// Unlink ancestors one at a time. Letting `parent` drop normally recurses once
// per level and overflows the stack on deep chains.
impl Drop for ScopeNode {
  fn drop(&mut self) {
    let mut next = self.parent.take();
    while let Some(Scope(node)) = next {
      // `None` when another handle still owns the ancestor; the walk stops there.
      next = Arc::into_inner(node).and_then(|mut ancestor| ancestor.parent.take());
    }
  }
}

/// Shared handle to a scope node. Cloning is cheap; equality is node identity.
#[derive(Clone)]
pub struct Scope(Arc<ScopeNode>);

impl Scope {
  fn with_parent(parent: Option<Scope>, kind: ScopeKind, entries: ScopeEntries) -> Self {
    let depth = parent.as_ref().map_or(0, |p| p.depth() + 1);
    let scope = Scope(Arc::new(ScopeNode {
      id: ScopeId::next(),
      kind,
      depth,
      parent,
      entries: RwLock::new(entries),
      retired: AtomicBool::new(false),
    }));
    event!(Level::TRACE, scope = %scope.id(), depth, kind = ?kind, "Scope created.");
    scope
  }

  /// Creates a scope with no parent.
  pub fn root() -> Self {
    Self::with_parent(None, ScopeKind::Dynamic, ScopeEntries::default())
  }

  /// Creates a scope nested under `self`.
  pub fn child(&self) -> Self {
    Self::with_parent(Some(self.clone()), ScopeKind::Dynamic, ScopeEntries::default())
  }

  /// Creates the virtual scope that holds one call's restarts ahead of `parent`.
  pub(crate) fn call_frame(parent: &Scope, restarts: Vec<Restart>) -> Self {
    Self::with_parent(
      Some(parent.clone()),
      ScopeKind::Call,
      ScopeEntries {
        handlers: Vec::new(),
        restarts,
      },
    )
  }

  pub fn id(&self) -> ScopeId {
    self.0.id
  }

  pub fn kind(&self) -> ScopeKind {
    self.0.kind
  }

  /// Number of parent links between this scope and its root.
  pub fn depth(&self) -> usize {
    self.0.depth
  }

  pub fn parent(&self) -> Option<&Scope> {
    self.0.parent.as_ref()
  }

  pub fn is_root(&self) -> bool {
    self.0.parent.is_none()
  }

  pub fn is_retired(&self) -> bool {
    self.0.retired.load(Ordering::Acquire)
  }

  /// Marks the scope retired. Returns `true` if it already was.
  pub(crate) fn mark_retired(&self) -> bool {
    self.0.retired.swap(true, Ordering::AcqRel)
  }

  /// Parent, grandparent, ... up to the root.
  pub fn ancestors(&self) -> impl Iterator<Item = Scope> {
    std::iter::successors(self.parent().cloned(), |scope| scope.parent().cloned())
  }

  pub(crate) fn entries(&self) -> RwLockReadGuard<'_, ScopeEntries> {
    self.0.entries.read()
  }

  pub(crate) fn clear_restarts(&self) {
    self.0.entries.write().restarts.clear();
  }

  // --- Registration ---

  pub fn add_handler(&self, handler: Handler) -> &Self {
    event!(Level::TRACE, scope = %self.id(), handler = %handler.label(), "Handler registered.");
    self.0.entries.write().handlers.push(handler);
    self
  }

  /// Registers a handler for every condition of type `C`.
  pub fn handle<C, F>(&self, reaction: F) -> &Self
  where
    C: Condition,
    F: Fn(&C, &Operations) -> RecourseResult<Decision> + Send + Sync + 'static,
  {
    self.add_handler(Handler::for_condition::<C, F>(reaction))
  }

  pub fn add_restart(&self, restart: Restart) -> &Self {
    event!(Level::TRACE, scope = %self.id(), restart = %restart.label(), "Restart registered.");
    self.0.entries.write().restarts.push(restart);
    self
  }

  /// Registers a restart for every option of type `O`.
  pub fn provide<O, R, F>(&self, recovery: F) -> &Self
  where
    O: RestartOption,
    R: Any + Send,
    F: Fn(O) -> RecourseResult<R> + Send + Sync + 'static,
  {
    self.add_restart(Restart::for_option::<O, R, F>(recovery))
  }

  // --- Introspection ---

  /// Handlers registered directly in this scope, in registration order.
  pub fn handlers(&self) -> Vec<Handler> {
    self.entries().handlers.clone()
  }

  /// Restarts registered directly in this scope, in registration order.
  pub fn restarts(&self) -> Vec<Restart> {
    self.entries().restarts.clone()
  }

  /// Every handler visible from this scope, innermost first.
  pub fn visible_handlers(&self) -> ChainedSearch<Handler> {
    ChainedSearch::handlers(self)
  }

  /// Every restart visible from this scope, innermost first.
  pub fn visible_restarts(&self) -> ChainedSearch<Restart> {
    ChainedSearch::restarts(self)
  }
}

impl PartialEq for Scope {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl Eq for Scope {}

impl fmt::Debug for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let entries = self.entries();
    f.debug_struct("Scope")
      .field("id", &self.id())
      .field("kind", &self.kind())
      .field("depth", &self.depth())
      .field("parent", &self.parent().map(Scope::id))
      .field("handlers", &entries.handlers.len())
      .field("restarts", &entries.restarts.len())
      .field("retired", &self.is_retired())
      .finish()
  }
}
