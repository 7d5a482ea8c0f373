// recourse/src/dispatch/handler.rs

//! Defines `Handler`, a (condition test, reaction) pair registered in a scope.

use crate::core::condition::Condition;
use crate::core::decision::Decision;
use crate::dispatch::operations::Operations;
use crate::error::{RecourseError, RecourseResult};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Type alias for a handler's condition test.
pub type ConditionPredicate = Arc<dyn Fn(&dyn Condition) -> bool + Send + Sync + 'static>;

/// Type alias for a handler's reaction.
///
/// A reaction receives the signaled condition and the `Operations` capability of
/// the current signal, and must answer with a `Decision` obtained from it:
/// `ops.restart(option)`, `Ok(ops.skip())` or `ops.abort()`.
pub type Reaction =
  Arc<dyn Fn(&dyn Condition, &Operations) -> RecourseResult<Decision> + Send + Sync + 'static>;

/// A registered reaction to conditions that pass its predicate.
#[derive(Clone)]
pub struct Handler {
  label: Cow<'static, str>,
  predicate: ConditionPredicate,
  reaction: Reaction,
}

impl Handler {
  /// Builds a handler from an arbitrary predicate and an untyped reaction.
  pub fn new<P, F>(label: impl Into<Cow<'static, str>>, predicate: P, reaction: F) -> Self
  where
    P: Fn(&dyn Condition) -> bool + Send + Sync + 'static,
    F: Fn(&dyn Condition, &Operations) -> RecourseResult<Decision> + Send + Sync + 'static,
  {
    Self {
      label: label.into(),
      predicate: Arc::new(predicate),
      reaction: Arc::new(reaction),
    }
  }

  /// Handles every condition of type `C`.
  pub fn for_condition<C, F>(reaction: F) -> Self
  where
    C: Condition,
    F: Fn(&C, &Operations) -> RecourseResult<Decision> + Send + Sync + 'static,
  {
    Self::for_condition_where::<C, _, F>(|_| true, reaction)
  }

  /// Handles conditions of type `C` for which `predicate` also holds.
  pub fn for_condition_where<C, P, F>(predicate: P, reaction: F) -> Self
  where
    C: Condition,
    P: Fn(&C) -> bool + Send + Sync + 'static,
    F: Fn(&C, &Operations) -> RecourseResult<Decision> + Send + Sync + 'static,
  {
    Self::new(
      std::any::type_name::<C>(),
      move |condition: &dyn Condition| condition.downcast_ref::<C>().is_some_and(|c| predicate(c)),
      move |condition: &dyn Condition, ops: &Operations| match condition.downcast_ref::<C>() {
        Some(typed) => reaction(typed, ops),
        None => Err(RecourseError::Internal(format!(
          "handler for {} invoked with {}",
          std::any::type_name::<C>(),
          condition.kind()
        ))),
      },
    )
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  /// Tests this handler's predicate against `condition`.
  pub fn accepts(&self, condition: &dyn Condition) -> bool {
    (self.predicate)(condition)
  }

  pub(crate) fn react(&self, condition: &dyn Condition, ops: &Operations) -> RecourseResult<Decision> {
    (self.reaction)(condition, ops)
  }
}

impl fmt::Debug for Handler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Handler").field("label", &self.label).finish_non_exhaustive()
  }
}
