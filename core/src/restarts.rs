// recourse/src/restarts.rs

//! Built-in restart options and the restarts that accept them.
//!
//! Each option type comes with a constructor for its matching `Restart`. Register
//! that restart in a scope (or pass it to a single `signal` call), and a handler
//! selects it with `ops.restart(Option(..))`.

use crate::core::condition::RestartOption;
use crate::core::value::Value;
use crate::dispatch::Restart;
use crate::error::{RecourseError, RecourseResult};
use std::any::Any;
use std::fmt::Debug;

/// Use this exact value as the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseValue<T>(pub T);

impl<T: Any + Debug + Send + Sync> RestartOption for UseValue<T> {}

impl<T: Any + Debug + Send + Sync> UseValue<T> {
  /// Accepts `UseValue<T>` and returns the carried value unchanged.
  pub fn restart() -> Restart {
    Restart::for_option::<UseValue<T>, T, _>(|UseValue(value)| Ok(value))
  }
}

/// Run the original operation again with new input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryWith<I>(pub I);

impl<I: Any + Debug + Send + Sync> RestartOption for RetryWith<I> {}

impl<I: Any + Debug + Send + Sync> RetryWith<I> {
  /// Accepts `RetryWith<I>`; `retry` re-invokes the operation with the new input.
  /// The operation itself belongs to the application.
  pub fn restart<R, F>(retry: F) -> Restart
  where
    R: Any + Send,
    F: Fn(I) -> RecourseResult<R> + Send + Sync + 'static,
  {
    Restart::for_option::<RetryWith<I>, R, _>(move |RetryWith(input)| retry(input))
  }
}

/// Acknowledge the condition and let execution continue without a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resume;

impl RestartOption for Resume {}

impl Resume {
  /// Accepts `Resume` and returns `Value::unit()`.
  pub fn restart() -> Restart {
    Restart::new(
      "Resume",
      |option: &dyn RestartOption| option.is::<Resume>(),
      |_| Ok(Value::unit()),
    )
  }
}

/// Give up: unwind to the nearest abort boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abort;

impl RestartOption for Abort {}

impl Abort {
  /// Accepts `Abort` and always fails with `RecourseError::Aborted`.
  pub fn restart() -> Restart {
    Restart::new(
      "Abort",
      |option: &dyn RestartOption| option.is::<Abort>(),
      |_| Err(RecourseError::Aborted),
    )
  }
}
