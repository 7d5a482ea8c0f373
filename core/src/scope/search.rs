// recourse/src/scope/search.rs

//! Lazy traversal of the entries visible from a scope, innermost scope first.

use crate::dispatch::{Handler, Restart};
use crate::scope::node::{Scope, ScopeEntries, ScopeId};
use std::iter::FusedIterator;
use tracing::{event, Level};

/// A single-pass sequence over every entry visible from a starting scope: the
/// starting scope's entries in registration order, then its parent's, and so on
/// up to the root.
///
/// Entries are read one at a time under a short read lock, so nothing is locked
/// while a handler or restart runs. An entry appended to a scope the search has
/// not yet moved past will still be produced.
pub struct ChainedSearch<T: Clone> {
  cursor: Option<Scope>,
  index: usize,
  select: fn(&ScopeEntries) -> &[T],
}

impl ChainedSearch<Handler> {
  pub(crate) fn handlers(from: &Scope) -> Self {
    Self::new(from, |entries| entries.handlers.as_slice())
  }
}

impl ChainedSearch<Restart> {
  pub(crate) fn restarts(from: &Scope) -> Self {
    Self::new(from, |entries| entries.restarts.as_slice())
  }
}

impl<T: Clone> ChainedSearch<T> {
  fn new(from: &Scope, select: fn(&ScopeEntries) -> &[T]) -> Self {
    Self {
      cursor: Some(from.clone()),
      index: 0,
      select,
    }
  }

  /// The scope whose entries are currently being produced, `None` once exhausted.
  pub fn current_scope(&self) -> Option<ScopeId> {
    self.cursor.as_ref().map(Scope::id)
  }
}

impl<T: Clone> Iterator for ChainedSearch<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    loop {
      let scope = self.cursor.as_ref()?;
      {
        let entries = scope.entries();
        if let Some(entry) = (self.select)(&entries).get(self.index) {
          self.index += 1;
          return Some(entry.clone());
        }
      }
      let parent = scope.parent().cloned();
      event!(Level::TRACE, scope = %scope.id(), "Scope exhausted, moving outward.");
      self.cursor = parent;
      self.index = 0;
    }
  }
}

impl<T: Clone> FusedIterator for ChainedSearch<T> {}
