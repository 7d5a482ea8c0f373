// recourse/src/policy.rs

//! Per-call configuration of a signal: what to do when no handler resolves the
//! condition, and which result type the caller expects back.

use crate::core::condition::Condition;
use crate::core::value::{ExpectedType, Value};
use crate::error::{RecourseError, RecourseResult};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type alias for a custom handler-not-found strategy.
pub type FallbackFn = Arc<dyn Fn(Box<dyn Condition>) -> RecourseResult<Value> + Send + Sync + 'static>;

/// Strategy applied when the handler search is exhausted without a produced value.
#[derive(Clone, Default)]
pub enum UnhandledPolicy {
  /// Fail with `HandlerNotFound` carrying the condition.
  #[default]
  Error,
  /// Produce `Value::unit()` and carry on.
  Ignore,
  /// Let a function substitute a result or escalate.
  Fallback(FallbackFn),
}

impl UnhandledPolicy {
  pub fn fallback<F>(f: F) -> Self
  where
    F: Fn(Box<dyn Condition>) -> RecourseResult<Value> + Send + Sync + 'static,
  {
    UnhandledPolicy::Fallback(Arc::new(f))
  }

  /// Substitutes a clone of `value` for every unhandled condition.
  pub fn default_value<T>(value: T) -> Self
  where
    T: Any + Clone + Send + Sync,
  {
    Self::fallback(move |_| Ok(Value::new(value.clone())))
  }

  pub(crate) fn apply(&self, condition: Box<dyn Condition>) -> RecourseResult<Value> {
    match self {
      UnhandledPolicy::Error => Err(RecourseError::HandlerNotFound { condition }),
      UnhandledPolicy::Ignore => Ok(Value::unit()),
      UnhandledPolicy::Fallback(f) => f(condition),
    }
  }
}

impl fmt::Debug for UnhandledPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UnhandledPolicy::Error => f.write_str("Error"),
      UnhandledPolicy::Ignore => f.write_str("Ignore"),
      UnhandledPolicy::Fallback(_) => f.write_str("Fallback(..)"),
    }
  }
}

/// Policies for one signal. The default errors out on a missing handler and does
/// not check the result type.
#[derive(Debug, Clone, Default)]
pub struct Policies {
  on_unhandled: UnhandledPolicy,
  expected: Option<ExpectedType>,
}

impl Policies {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn error_if_unhandled() -> Self {
    Self::new().on_unhandled(UnhandledPolicy::Error)
  }

  pub fn ignore_if_unhandled() -> Self {
    Self::new().on_unhandled(UnhandledPolicy::Ignore)
  }

  pub fn on_unhandled(mut self, policy: UnhandledPolicy) -> Self {
    self.on_unhandled = policy;
    self
  }

  /// Requires the resolved value to be a `T`.
  pub fn expecting<T: Any>(mut self) -> Self {
    self.expected = Some(ExpectedType::of::<T>());
    self
  }

  pub fn unhandled_policy(&self) -> &UnhandledPolicy {
    &self.on_unhandled
  }

  pub fn expected(&self) -> Option<ExpectedType> {
    self.expected
  }

  /// Validates `value` against the expected type. A mismatch is a programming
  /// error and is never recovered.
  pub fn check(&self, value: Value) -> RecourseResult<Value> {
    match self.expected {
      Some(expected) if !expected.matches(&value) => Err(RecourseError::TypeMismatch {
        expected: expected.type_name(),
        found: value.type_name(),
      }),
      _ => Ok(value),
    }
  }

  pub(crate) fn handle_unhandled(&self, condition: Box<dyn Condition>) -> RecourseResult<Value> {
    self.on_unhandled.apply(condition).and_then(|value| self.check(value))
  }
}
