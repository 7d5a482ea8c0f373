// recourse/examples/progress_notification.rs

//! `notify` reports progress without requiring anyone to listen. A handler that does
//! listen answers with `Resume`, and a missing handler is simply ignored.

use recourse::{Condition, RecourseResult, Resume, Scope};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Progress {
  done: usize,
  total: usize,
}

impl Condition for Progress {}

fn copy_files(scope: &Scope, files: &[&str]) -> RecourseResult<usize> {
  for (index, file) in files.iter().enumerate() {
    info!(%file, "Copying.");
    scope.notify(Progress {
      done: index + 1,
      total: files.len(),
    })?;
  }
  Ok(files.len())
}

fn main() -> RecourseResult<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let files = ["a.txt", "b.txt", "c.txt", "d.txt"];

  info!("--- Silent run: no progress handler ---");
  copy_files(&Scope::root(), &files)?;

  info!("--- Observed run ---");
  let ui = Scope::root();
  let reports = Arc::new(AtomicUsize::new(0));
  let counter = reports.clone();
  ui.handle::<Progress, _>(move |progress, ops| {
    counter.fetch_add(1, Ordering::SeqCst);
    info!("Progress: {}/{} ({}%)", progress.done, progress.total, progress.done * 100 / progress.total);
    ops.restart(Resume)
  });

  // The copy runs in a nested scope; the UI handler above is still visible.
  let worker = ui.child();
  let copied = copy_files(&worker, &files)?;
  info!(copied, reports = reports.load(Ordering::SeqCst), "Done.");
  Ok(())
}
