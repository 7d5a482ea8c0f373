// recourse/src/resolution/boundary.rs

//! Abort boundaries: the point where a deliberate abort stops unwinding.

use crate::error::{RecourseError, RecourseResult};
use tracing::{event, Level};

/// Runs `body` and stops an abort raised anywhere inside it.
///
/// Returns `Ok(Some(value))` when `body` completes, `Ok(None)` when it aborted, and
/// passes every other error through unchanged. Code in `body` after the abort point
/// does not run; execution continues right after this call.
pub fn catch_abort<T, F>(body: F) -> RecourseResult<Option<T>>
where
  F: FnOnce() -> RecourseResult<T>,
{
  match body() {
    Ok(value) => Ok(Some(value)),
    Err(RecourseError::Aborted) => {
      event!(Level::DEBUG, "Abort intercepted at boundary.");
      Ok(None)
    }
    Err(other) => Err(other),
  }
}

/// Extension for stopping an abort on a result that is already in hand.
pub trait AbortExt<T> {
  /// Same mapping as [`catch_abort`].
  fn abort_to_none(self) -> RecourseResult<Option<T>>;
}

impl<T> AbortExt<T> for RecourseResult<T> {
  fn abort_to_none(self) -> RecourseResult<Option<T>> {
    catch_abort(|| self)
  }
}
