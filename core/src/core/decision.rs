// recourse/src/core/decision.rs

//! Defines the decision a handler hands back to the resolution engine.

use crate::core::value::Value;

/// Outcome of one handler invocation: either a value was produced through a
/// restart, or the handler declined and the search continues.
///
/// Handlers cannot build a `Decision` themselves. The only ways to obtain one are
/// `Operations::restart`, `Operations::skip` and `Operations::abort`.
#[derive(Debug)]
pub struct Decision {
  outcome: Outcome,
}

#[derive(Debug)]
enum Outcome {
  Produced(Value),
  Declined,
}

impl Decision {
  pub(crate) fn produced(value: Value) -> Self {
    Self {
      outcome: Outcome::Produced(value),
    }
  }

  pub(crate) fn declined() -> Self {
    Self {
      outcome: Outcome::Declined,
    }
  }

  pub fn is_produced(&self) -> bool {
    matches!(self.outcome, Outcome::Produced(_))
  }

  pub fn is_declined(&self) -> bool {
    matches!(self.outcome, Outcome::Declined)
  }

  /// Borrows the produced value, if any.
  pub fn value(&self) -> Option<&Value> {
    match &self.outcome {
      Outcome::Produced(value) => Some(value),
      Outcome::Declined => None,
    }
  }

  pub(crate) fn into_value(self) -> Option<Value> {
    match self.outcome {
      Outcome::Produced(value) => Some(value),
      Outcome::Declined => None,
    }
  }
}
