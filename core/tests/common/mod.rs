// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use recourse::{Condition, Policies, RecourseResult, Restart, RestartOption, RetryWith, Scope};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Condition Types ---
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Malformed(pub String);

impl Condition for Malformed {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
  pub done: usize,
  pub total: usize,
}

impl Condition for Progress {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning(pub String);

impl Condition for Warning {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Threshold(pub u32);

impl Condition for Threshold {}

// --- Common Restart Options ---
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipEntry;

impl RestartOption for SkipEntry {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unregistered(pub u32);

impl RestartOption for Unregistered {}

// --- A tiny "log entry" domain used by reprocessing scenarios ---
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
  pub level: String,
  pub message: String,
}

fn split_entry(raw: &str) -> Option<Entry> {
  raw.split_once(": ").map(|(level, message)| Entry {
    level: level.to_string(),
    message: message.to_string(),
  })
}

/// Parses `LEVEL: message`. Malformed input is signaled from `scope`; the call offers
/// a `RetryWith<String>` restart that parses replacement text instead.
pub fn parse_entry(scope: &Scope, raw: &str) -> RecourseResult<Entry> {
  if let Some(entry) = split_entry(raw) {
    return Ok(entry);
  }
  let retry_scope = scope.clone();
  scope.signal_as::<Entry, _, _>(
    Malformed(raw.to_string()),
    Policies::new(),
    [RetryWith::<String>::restart(move |text| parse_entry(&retry_scope, &text))],
  )
}

/// Like `parse_entry`, but offers no restart of its own; recovery relies on
/// restarts registered in enclosing scopes.
pub fn parse_entry_plain(scope: &Scope, raw: &str) -> RecourseResult<Entry> {
  if let Some(entry) = split_entry(raw) {
    return Ok(entry);
  }
  scope.signal_as::<Entry, _, _>(Malformed(raw.to_string()), Policies::new(), [])
}

/// A restart that reparses replacement text, for registering in a scope.
pub fn reparse_restart(scope: &Scope) -> Restart {
  let reparse_scope = scope.clone();
  RetryWith::<String>::restart(move |text| {
    RESTART_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    parse_entry_plain(&reparse_scope, &text)
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static RESTART_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
  RESTART_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
