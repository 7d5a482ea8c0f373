// recourse/src/core/value.rs

//! The type-erased result of a resolution and the descriptor used to validate it.

use crate::error::{RecourseError, RecourseResult};
use std::any::{Any, TypeId};
use std::fmt;

/// A value produced by a restart or by an unhandled-condition policy.
///
/// Restarts for different option kinds return different Rust types, so results
/// travel through the engine erased. `take::<T>()` recovers the concrete value.
pub struct Value {
  inner: Box<dyn Any + Send>,
  type_id: TypeId,
  type_name: &'static str,
}

impl Value {
  pub fn new<T: Any + Send>(value: T) -> Self {
    Self {
      inner: Box::new(value),
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  /// The "no meaningful value" sentinel returned by acknowledging restarts.
  pub fn unit() -> Self {
    Self::new(())
  }

  pub fn is_unit(&self) -> bool {
    self.type_id == TypeId::of::<()>()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.type_id == TypeId::of::<T>()
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.inner.downcast_ref::<T>()
  }

  /// Recovers the concrete value, handing the `Value` back unchanged on mismatch.
  pub fn downcast<T: Any>(self) -> Result<T, Value> {
    if !self.is::<T>() {
      return Err(self);
    }
    let Value {
      inner,
      type_id,
      type_name,
    } = self;
    match inner.downcast::<T>() {
      Ok(typed) => Ok(*typed),
      Err(inner) => Err(Value {
        inner,
        type_id,
        type_name,
      }),
    }
  }

  /// Like `downcast`, but a mismatch is reported as `RecourseError::TypeMismatch`.
  pub fn take<T: Any>(self) -> RecourseResult<T> {
    self.downcast::<T>().map_err(|value| RecourseError::TypeMismatch {
      expected: std::any::type_name::<T>(),
      found: value.type_name,
    })
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Value").field(&self.type_name).finish()
  }
}

/// Describes the result type a caller expects back from a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedType {
  type_id: TypeId,
  type_name: &'static str,
}

impl ExpectedType {
  pub fn of<T: Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn matches(&self, value: &Value) -> bool {
    self.type_id == value.type_id()
  }
}
