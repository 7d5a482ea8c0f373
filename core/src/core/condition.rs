// recourse/src/core/condition.rs

//! Defines the open `Condition` and `RestartOption` traits that applications
//! implement for their own types, plus the type-erased downcasting helpers the
//! engine uses to match handlers and restarts against them.

use std::any::Any;
use std::fmt;

/// Upcast helper so trait objects built on it can be inspected as `dyn Any`.
///
/// Implemented for every `'static` type; user code never implements it directly.
pub trait AsAny: Any {
  fn as_any(&self) -> &dyn Any;
  fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
  fn as_any(&self) -> &dyn Any {
    self
  }

  fn into_any(self: Box<Self>) -> Box<dyn Any> {
    self
  }
}

/// Something notable that happened and was signaled.
///
/// Applications define their own condition types and opt in with an empty impl:
///
/// ```
/// use recourse::Condition;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Malformed(String);
///
/// impl Condition for Malformed {}
/// ```
///
/// Conditions carry whatever payload the application needs. The engine only uses
/// their type (or a custom predicate) to pick handlers.
pub trait Condition: AsAny + fmt::Debug + Send + Sync + 'static {
  /// The concrete type name, used in logs and error messages.
  fn kind(&self) -> &'static str {
    std::any::type_name::<Self>()
  }
}

/// The value a handler passes to `Operations::restart` to select a recovery strategy.
///
/// Same opt-in shape as [`Condition`]. The built-in options live in [`crate::restarts`].
pub trait RestartOption: AsAny + fmt::Debug + Send + Sync + 'static {
  /// The concrete type name, used in logs and error messages.
  fn kind(&self) -> &'static str {
    std::any::type_name::<Self>()
  }
}

// Both trait objects get the same inspection API. Always call these on the trait
// object (`&*boxed`), never on a `Box<dyn ...>` itself.
macro_rules! erased_downcast {
  ($tr:ident) => {
    impl dyn $tr {
      /// Returns `true` if the erased value is a `T`.
      pub fn is<T: $tr>(&self) -> bool {
        self.as_any().is::<T>()
      }

      /// Borrows the erased value as a `T`, if it is one.
      pub fn downcast_ref<T: $tr>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
      }

      /// Recovers the owned `T`, handing the box back unchanged on mismatch.
      pub fn downcast<T: $tr>(self: Box<Self>) -> Result<Box<T>, Box<dyn $tr>> {
        if !self.is::<T>() {
          return Err(self);
        }
        match self.into_any().downcast::<T>() {
          Ok(typed) => Ok(typed),
          Err(_) => unreachable!("type checked before downcast"),
        }
      }
    }
  };
}

erased_downcast!(Condition);
erased_downcast!(RestartOption);
