// recourse/src/resolution/signal.rs

//! Contains `signal`, the resolution engine's entry point, and the `notify` and
//! `demand` conveniences built on it.

use crate::core::condition::Condition;
use crate::core::value::Value;
use crate::dispatch::{Operations, Restart};
use crate::error::RecourseResult;
use crate::policy::Policies;
use crate::restarts::{Resume, UseValue};
use crate::scope::Scope;
use std::any::Any;
use tracing::{event, instrument, Level};

/// Owns the virtual scope holding one call's restarts. Dropping it clears and
/// retires that scope, on normal return as well as on `?` propagation.
struct CallFrame {
  scope: Scope,
}

impl CallFrame {
  fn open(signaling: &Scope, restarts: Vec<Restart>) -> Self {
    Self {
      scope: Scope::call_frame(signaling, restarts),
    }
  }
}

impl Drop for CallFrame {
  fn drop(&mut self) {
    self.scope.clear_restarts();
    self.scope.mark_retired();
    event!(Level::TRACE, call_scope = %self.scope.id(), "Call-scoped restarts removed.");
  }
}

/// Signals `condition` from `scope` and waits for a handled result.
///
/// Handlers are searched from `scope` outward. The first one whose predicate accepts
/// the condition reacts; if it declines, the search continues with the next match.
/// A produced value is checked against `policies` and returned. If no handler
/// produces a value, the policies' unhandled strategy decides the outcome.
///
/// `restarts` exist only for the duration of this call and are searched before any
/// restart registered in a scope.
pub fn signal<C, I>(scope: &Scope, condition: C, policies: &Policies, restarts: I) -> RecourseResult<Value>
where
  C: Condition,
  I: IntoIterator<Item = Restart>,
{
  signal_boxed(scope, Box::new(condition), policies, restarts.into_iter().collect())
}

/// `signal` for a condition that is already boxed.
#[instrument(
  name = "signal",
  skip_all,
  fields(
    condition = %condition.kind(),
    scope = %scope.id(),
    call_restarts = restarts.len(),
  )
)]
pub fn signal_boxed(
  scope: &Scope,
  condition: Box<dyn Condition>,
  policies: &Policies,
  restarts: Vec<Restart>,
) -> RecourseResult<Value> {
  let frame = CallFrame::open(scope, restarts);
  let ops = Operations::new(frame.scope.clone());

  let mut declined = 0usize;
  for handler in scope.visible_handlers() {
    if !handler.accepts(&*condition) {
      continue;
    }
    event!(Level::DEBUG, handler = %handler.label(), "Handler matched. Reacting.");
    let decision = handler.react(&*condition, &ops)?;
    match decision.into_value() {
      Some(value) => {
        event!(Level::DEBUG, handler = %handler.label(), value_type = %value.type_name(), "Condition resolved.");
        return policies.check(value);
      }
      None => {
        declined += 1;
        event!(Level::TRACE, handler = %handler.label(), "Handler declined.");
      }
    }
  }

  event!(
    Level::DEBUG,
    declined,
    policy = ?policies.unhandled_policy(),
    "No handler resolved the condition. Applying unhandled policy."
  );
  policies.handle_unhandled(condition)
}

/// `signal` with the result checked against and converted to `T`.
pub fn signal_as<T, C, I>(scope: &Scope, condition: C, policies: Policies, restarts: I) -> RecourseResult<T>
where
  T: Any,
  C: Condition,
  I: IntoIterator<Item = Restart>,
{
  signal(scope, condition, &policies.expecting::<T>(), restarts)?.take::<T>()
}

/// Fire-and-forget notification: a `Resume` restart is available to handlers and an
/// unhandled condition is ignored.
pub fn notify<C: Condition>(scope: &Scope, condition: C) -> RecourseResult<()> {
  signal(scope, condition, &Policies::ignore_if_unhandled(), [Resume::restart()]).map(|_| ())
}

/// Signals a condition that must resolve to a concrete `T`: a `UseValue<T>` restart is
/// available to handlers and an unhandled condition is an error.
pub fn demand<T, C>(scope: &Scope, condition: C) -> RecourseResult<T>
where
  T: Any + Send + Sync + std::fmt::Debug,
  C: Condition,
{
  signal_as::<T, C, _>(
    scope,
    condition,
    Policies::error_if_unhandled(),
    [UseValue::<T>::restart()],
  )
}

impl Scope {
  /// See [`signal`].
  pub fn signal<C, I>(&self, condition: C, policies: &Policies, restarts: I) -> RecourseResult<Value>
  where
    C: Condition,
    I: IntoIterator<Item = Restart>,
  {
    signal(self, condition, policies, restarts)
  }

  /// See [`signal_as`].
  pub fn signal_as<T, C, I>(&self, condition: C, policies: Policies, restarts: I) -> RecourseResult<T>
  where
    T: Any,
    C: Condition,
    I: IntoIterator<Item = Restart>,
  {
    signal_as::<T, C, I>(self, condition, policies, restarts)
  }

  /// See [`notify`].
  pub fn notify<C: Condition>(&self, condition: C) -> RecourseResult<()> {
    notify(self, condition)
  }

  /// See [`demand`].
  pub fn demand<T, C>(&self, condition: C) -> RecourseResult<T>
  where
    T: Any + Send + Sync + std::fmt::Debug,
    C: Condition,
  {
    demand::<T, C>(self, condition)
  }
}
