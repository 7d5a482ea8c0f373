// recourse/src/dispatch/operations.rs

//! Defines `Operations`, the capability handed to a handler while it reacts.

use crate::core::condition::RestartOption;
use crate::core::decision::Decision;
use crate::dispatch::restart::Restart;
use crate::error::{RecourseError, RecourseResult};
use crate::scope::{ChainedSearch, Scope};
use tracing::{event, instrument, Level};

/// The only interface a handler gets while it runs. Offers exactly three moves:
/// invoke a restart by option, decline, or abort.
///
/// Bound to the virtual call scope of the signal being handled, whose parent is
/// the scope the condition was signaled in. Restart search starts there, so the
/// call's own restarts are found before any scope-registered ones.
pub struct Operations {
  scope: Scope,
}

impl Operations {
  pub(crate) fn new(scope: Scope) -> Self {
    Self { scope }
  }

  /// Selects the first visible restart that accepts `option` and runs it.
  ///
  /// Fails with `RestartNotFound` carrying `option` when no restart accepts it.
  pub fn restart<O: RestartOption>(&self, option: O) -> RecourseResult<Decision> {
    self.restart_boxed(Box::new(option))
  }

  /// `restart` for an option that is already boxed.
  #[instrument(
    name = "Operations::restart",
    skip_all,
    fields(option = %option.kind(), call_scope = %self.scope.id())
  )]
  pub fn restart_boxed(&self, option: Box<dyn RestartOption>) -> RecourseResult<Decision> {
    let Some(restart) = self.find_restart(&*option) else {
      event!(Level::DEBUG, "No restart accepts the option.");
      return Err(RecourseError::RestartNotFound { option });
    };
    event!(Level::DEBUG, restart = %restart.label(), "Invoking restart.");
    let value = restart.recover(option)?;
    event!(Level::TRACE, value_type = %value.type_name(), "Restart produced a value.");
    Ok(Decision::produced(value))
  }

  /// Declines the condition; the engine moves on to the next matching handler.
  pub fn skip(&self) -> Decision {
    Decision::declined()
  }

  /// Gives up on the signal. The returned error unwinds through every `?` until a
  /// `catch_abort` boundary stops it.
  pub fn abort(&self) -> RecourseResult<Decision> {
    event!(Level::DEBUG, call_scope = %self.scope.id(), "Handler aborted.");
    Err(RecourseError::Aborted)
  }

  /// The call scope of the current signal. Nested scopes and recursive signals
  /// made from here still see this call's restarts.
  pub fn scope(&self) -> &Scope {
    &self.scope
  }

  /// The restart `restart(option)` would select, without running it.
  pub fn find_restart(&self, option: &dyn RestartOption) -> Option<Restart> {
    self.visible_restarts().find(|restart| restart.accepts(option))
  }

  pub fn visible_restarts(&self) -> ChainedSearch<Restart> {
    self.scope.visible_restarts()
  }
}
