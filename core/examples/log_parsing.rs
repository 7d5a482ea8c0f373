// recourse/examples/log_parsing.rs

//! Parses a batch of log lines. The parser signals `MalformedLine` for bad input and
//! offers restarts; the caller decides, per line, which recovery to use.

use recourse::{Condition, Policies, RecourseError, RecourseResult, Restart, RestartOption, RetryWith, Scope, UseValue};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct LogEntry {
  level: String,
  message: String,
}

#[derive(Debug)]
struct MalformedLine {
  line_no: usize,
  text: String,
}

impl Condition for MalformedLine {}

/// Drop the offending line.
#[derive(Debug)]
struct SkipLine;

impl RestartOption for SkipLine {}

// --- Parser side: knows how to recover, not when ---

fn parse_line(scope: &Scope, line_no: usize, text: &str) -> RecourseResult<Option<LogEntry>> {
  if let Some((level, message)) = text.split_once(": ") {
    return Ok(Some(LogEntry {
      level: level.to_string(),
      message: message.to_string(),
    }));
  }

  let retry_scope = scope.clone();
  scope.signal_as::<Option<LogEntry>, _, _>(
    MalformedLine {
      line_no,
      text: text.to_string(),
    },
    Policies::new(),
    [
      Restart::for_option::<UseValue<LogEntry>, _, _>(|UseValue(entry)| Ok(Some(entry))),
      RetryWith::<String>::restart(move |fixed| parse_line(&retry_scope, line_no, &fixed)),
      Restart::for_option::<SkipLine, Option<LogEntry>, _>(|_| Ok(None)),
    ],
  )
}

fn parse_all(scope: &Scope, lines: &[&str]) -> RecourseResult<Vec<LogEntry>> {
  let mut entries = Vec::new();
  for (line_no, text) in lines.iter().enumerate() {
    if let Some(entry) = parse_line(scope, line_no + 1, text)? {
      entries.push(entry);
    }
  }
  Ok(entries)
}

// --- Caller side: knows when, not how ---

fn main() -> RecourseResult<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let lines = [
    "INFO: service started",
    "WARN disk at 91%",
    "garbage",
    "",
    "ERROR: connection refused",
  ];

  let app = Scope::root();
  app.handle::<MalformedLine, _>(|bad, ops| {
    if bad.text.is_empty() {
      info!(line = bad.line_no, "Blank line, using placeholder.");
      return ops.restart(UseValue(LogEntry {
        level: "INFO".to_string(),
        message: "<blank>".to_string(),
      }));
    }
    if let Some((level, rest)) = bad.text.split_once(' ') {
      if level.chars().all(|c| c.is_ascii_uppercase()) {
        info!(line = bad.line_no, "Missing colon, retrying with a repaired line.");
        return ops.restart(RetryWith(format!("{}: {}", level, rest)));
      }
    }
    warn!(line = bad.line_no, text = %bad.text, "Unrecoverable line, skipping.");
    ops.restart(SkipLine)
  });

  let entries = parse_all(&app, &lines)?;
  for entry in &entries {
    info!(level = %entry.level, message = %entry.message, "Parsed entry.");
  }
  info!("Parsed {} of {} lines.", entries.len(), lines.len());

  // Without a handler, the same input escalates to the caller.
  match parse_all(&Scope::root(), &lines) {
    Err(err @ RecourseError::HandlerNotFound { .. }) => {
      let line = err.into_condition::<MalformedLine>().map(|c| c.line_no);
      info!(?line, "Unhandled malformed line reached the caller.");
    }
    other => warn!(?other, "Expected the parse to escalate."),
  }
  Ok(())
}
