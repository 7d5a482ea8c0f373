// recourse/examples/abort_boundary.rs

//! A handler that gives up calls `abort()`. The abort unwinds through ordinary `?`
//! propagation and stops at the nearest `catch_abort` boundary.

use recourse::{catch_abort, Condition, Policies, RecourseResult, Scope};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct QuotaExceeded {
  user: String,
  used: u64,
}

impl Condition for QuotaExceeded {}

fn upload(scope: &Scope, user: &str, used: u64) -> RecourseResult<()> {
  let request = scope.child();
  if used > 100 {
    request.signal(
      QuotaExceeded {
        user: user.to_string(),
        used,
      },
      &Policies::new(),
      [],
    )?;
  }
  info!(%user, "Upload stored.");
  Ok(())
}

fn handle_batch(scope: &Scope, batch: &[(&str, u64)]) -> RecourseResult<usize> {
  let session = scope.child();
  let mut stored = 0;
  for (user, used) in batch {
    upload(&session, user, *used)?;
    stored += 1;
  }
  Ok(stored)
}

fn main() -> RecourseResult<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let server = Scope::root();
  server.handle::<QuotaExceeded, _>(|quota, ops| {
    warn!(user = %quota.user, used = quota.used, "Quota exceeded, abandoning batch.");
    ops.abort()
  });

  let batches: [&[(&str, u64)]; 2] = [&[("ana", 10), ("bo", 20)], &[("cy", 30), ("dee", 250), ("eli", 5)]];
  for (index, batch) in batches.iter().enumerate() {
    match catch_abort(|| handle_batch(&server, batch))? {
      Some(stored) => info!(batch = index, stored, "Batch complete."),
      None => info!(batch = index, "Batch aborted; continuing with the next one."),
    }
  }
  Ok(())
}
