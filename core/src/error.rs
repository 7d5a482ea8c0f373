// recourse/src/error.rs
use crate::core::condition::{Condition, RestartOption};
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecourseError {
  /// No handler accepted the condition and the policy escalated.
  #[error("No handler accepted condition {condition:?}")]
  HandlerNotFound { condition: Box<dyn Condition> },

  /// A handler asked for a restart option nobody provides.
  #[error("No restart accepts option {option:?}")]
  RestartNotFound { option: Box<dyn RestartOption> },

  /// Deliberate unwind requested by a handler or by the `Abort` restart.
  /// Not a failure; stopped by `catch_abort`.
  #[error("Signal aborted")]
  Aborted,

  #[error("Type mismatch for resolved value (expected {expected}, found {found})")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("Error in user-provided handler or restart. Source: {source}")]
  ReactionFailure {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal recourse error: {0}")]
  Internal(String),
}

impl RecourseError {
  pub fn is_aborted(&self) -> bool {
    matches!(self, RecourseError::Aborted)
  }

  /// The unhandled condition, when this is `HandlerNotFound`.
  pub fn condition(&self) -> Option<&dyn Condition> {
    match self {
      RecourseError::HandlerNotFound { condition } => Some(&**condition),
      _ => None,
    }
  }

  /// Takes the unhandled condition back as its concrete type.
  pub fn into_condition<C: Condition>(self) -> Option<C> {
    match self {
      RecourseError::HandlerNotFound { condition } => condition.downcast::<C>().ok().map(|c| *c),
      _ => None,
    }
  }

  /// The rejected option, when this is `RestartNotFound`.
  pub fn option(&self) -> Option<&dyn RestartOption> {
    match self {
      RecourseError::RestartNotFound { option } => Some(&**option),
      _ => None,
    }
  }

  pub fn into_option<O: RestartOption>(self) -> Option<O> {
    match self {
      RecourseError::RestartNotFound { option } => option.downcast::<O>().ok().map(|o| *o),
      _ => None,
    }
  }
}

// Application code inside handlers and restarts usually speaks anyhow.
impl From<AnyhowError> for RecourseError {
  fn from(err: AnyhowError) -> Self {
    // An engine error that passed through anyhow (e.g. an abort raised by a nested
    // signal inside a retry) keeps its identity instead of becoming a ReactionFailure.
    match err.downcast::<RecourseError>() {
      Ok(recourse_err) => recourse_err,
      Err(source) => RecourseError::ReactionFailure { source },
    }
  }
}

pub type RecourseResult<T, E = RecourseError> = std::result::Result<T, E>;
