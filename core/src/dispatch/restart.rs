// recourse/src/dispatch/restart.rs

//! Defines `Restart`, a (option test, recovery) pair that a handler can select.

use crate::core::condition::RestartOption;
use crate::core::value::Value;
use crate::error::{RecourseError, RecourseResult};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Type alias for a restart's option test.
pub type OptionPredicate = Arc<dyn Fn(&dyn RestartOption) -> bool + Send + Sync + 'static>;

/// Type alias for a restart's recovery. It takes ownership of the selected option.
pub type Recovery = Arc<dyn Fn(Box<dyn RestartOption>) -> RecourseResult<Value> + Send + Sync + 'static>;

/// A registered recovery procedure, selected by the option a handler passes to
/// `Operations::restart`.
#[derive(Clone)]
pub struct Restart {
  label: Cow<'static, str>,
  predicate: OptionPredicate,
  recovery: Recovery,
}

impl Restart {
  pub fn new<P, F>(label: impl Into<Cow<'static, str>>, predicate: P, recovery: F) -> Self
  where
    P: Fn(&dyn RestartOption) -> bool + Send + Sync + 'static,
    F: Fn(Box<dyn RestartOption>) -> RecourseResult<Value> + Send + Sync + 'static,
  {
    Self {
      label: label.into(),
      predicate: Arc::new(predicate),
      recovery: Arc::new(recovery),
    }
  }

  /// Accepts every option of type `O`; the recovery's return value becomes the result.
  pub fn for_option<O, R, F>(recovery: F) -> Self
  where
    O: RestartOption,
    R: Any + Send,
    F: Fn(O) -> RecourseResult<R> + Send + Sync + 'static,
  {
    Self::for_option_where::<O, R, _, F>(|_| true, recovery)
  }

  /// Accepts options of type `O` for which `predicate` also holds.
  pub fn for_option_where<O, R, P, F>(predicate: P, recovery: F) -> Self
  where
    O: RestartOption,
    R: Any + Send,
    P: Fn(&O) -> bool + Send + Sync + 'static,
    F: Fn(O) -> RecourseResult<R> + Send + Sync + 'static,
  {
    Self::new(
      std::any::type_name::<O>(),
      move |option: &dyn RestartOption| option.downcast_ref::<O>().is_some_and(|o| predicate(o)),
      move |option: Box<dyn RestartOption>| match option.downcast::<O>() {
        Ok(typed) => recovery(*typed).map(Value::new),
        Err(other) => Err(RecourseError::Internal(format!(
          "restart for {} invoked with {}",
          std::any::type_name::<O>(),
          other.kind()
        ))),
      },
    )
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  /// Tests this restart's predicate against `option`.
  pub fn accepts(&self, option: &dyn RestartOption) -> bool {
    (self.predicate)(option)
  }

  pub(crate) fn recover(&self, option: Box<dyn RestartOption>) -> RecourseResult<Value> {
    (self.recovery)(option)
  }
}

impl fmt::Debug for Restart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Restart").field("label", &self.label).finish_non_exhaustive()
  }
}
