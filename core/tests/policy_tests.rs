// tests/policy_tests.rs
mod common;

use common::*;
use recourse::{Policies, RecourseError, RecourseResult, Resume, Scope, UnhandledPolicy, UseValue, Value};
use serial_test::serial;
use std::sync::atomic::Ordering;

#[test]
fn test_default_policy_errors_on_missing_handler() {
  setup_tracing();
  let policies = Policies::default();
  assert!(matches!(policies.unhandled_policy(), UnhandledPolicy::Error));
  assert!(policies.expected().is_none());

  let err = Scope::root()
    .signal(Warning("nobody".into()), &policies, [])
    .expect_err("default policy escalates");
  assert_eq!(err.into_condition::<Warning>(), Some(Warning("nobody".into())));
}

#[test]
fn test_ignore_policy_produces_unit() -> RecourseResult<()> {
  setup_tracing();
  let value = Scope::root().signal(Warning("quiet".into()), &Policies::ignore_if_unhandled(), [])?;
  assert!(value.is_unit());
  Ok(())
}

#[test]
fn test_default_value_policy_substitutes_result() -> RecourseResult<()> {
  setup_tracing();
  let policies = Policies::new()
    .on_unhandled(UnhandledPolicy::default_value(-1_i32))
    .expecting::<i32>();
  let scope = Scope::root();

  assert_eq!(scope.signal(Threshold(3), &policies, [])?.take::<i32>()?, -1);
  // The same policies value can serve several calls.
  assert_eq!(scope.signal(Threshold(4), &policies, [])?.take::<i32>()?, -1);
  Ok(())
}

#[test]
fn test_fallback_policy_can_inspect_and_escalate() {
  setup_tracing();
  let policies = Policies::new().on_unhandled(UnhandledPolicy::fallback(|condition| {
    let small = condition.downcast_ref::<Threshold>().map(|t| t.0).filter(|n| *n < 10);
    match small {
      Some(n) => Ok(Value::new(n * 2)),
      None => Err(RecourseError::HandlerNotFound { condition }),
    }
  }));
  let scope = Scope::root();

  let doubled = scope.signal(Threshold(4), &policies, []).and_then(|v| v.take::<u32>());
  assert_eq!(doubled.ok(), Some(8));

  let escalated = scope.signal(Threshold(40), &policies, []).expect_err("fallback escalates");
  assert_eq!(escalated.into_condition::<Threshold>(), Some(Threshold(40)));
}

#[test]
fn test_fallback_not_used_when_handler_resolves() -> RecourseResult<()> {
  setup_tracing();
  let scope = Scope::root();
  scope.handle::<Threshold, _>(|t, ops| ops.restart(UseValue(t.0 as i32)));
  let policies = Policies::new().on_unhandled(UnhandledPolicy::default_value(-1_i32));
  let value = scope.signal(Threshold(5), &policies, [UseValue::<i32>::restart()])?;
  assert_eq!(value.take::<i32>()?, 5);
  Ok(())
}

#[test]
fn test_expected_type_mismatch_is_reported() {
  setup_tracing();
  let scope = Scope::root();
  scope.handle::<Threshold, _>(|_, ops| ops.restart(UseValue("not a number")));

  let err = scope
    .signal(
      Threshold(1),
      &Policies::new().expecting::<u64>(),
      [UseValue::<&'static str>::restart()],
    )
    .expect_err("handler produced a &str");
  match err {
    RecourseError::TypeMismatch { expected, found } => {
      assert_eq!(expected, "u64");
      assert_eq!(found, "&str");
    }
    other => panic!("Expected TypeMismatch, got {:?}", other),
  }
}

#[test]
fn test_expected_type_applies_to_policy_results() {
  setup_tracing();
  let err = Scope::root()
    .signal(
      Warning("w".into()),
      &Policies::ignore_if_unhandled().expecting::<String>(),
      [],
    )
    .expect_err("ignore produces (), not String");
  assert!(matches!(err, RecourseError::TypeMismatch { .. }));
}

#[test]
fn test_value_take_reports_mismatch() {
  let err = Value::new(5_u8).take::<String>().expect_err("u8 is not String");
  match err {
    RecourseError::TypeMismatch { expected, found } => {
      assert!(expected.ends_with("String"));
      assert_eq!(found, "u8");
    }
    other => panic!("Expected TypeMismatch, got {:?}", other),
  }

  let value = Value::new(5_u8);
  assert!(value.is::<u8>());
  assert_eq!(value.downcast_ref::<u8>(), Some(&5));
  let back = value.downcast::<u16>().expect_err("u8 is not u16");
  assert_eq!(back.type_name(), "u8");
}

// --- notify / demand ---

#[test]
#[serial]
fn test_notify_without_handler_is_ignored() -> RecourseResult<()> {
  setup_tracing();
  reset_counters();
  let scope = Scope::root();
  scope.notify(Progress { done: 1, total: 3 })?;
  assert_eq!(HANDLER_EXEC_COUNTER.load(Ordering::SeqCst), 0);
  Ok(())
}

#[test]
#[serial]
fn test_notify_handler_resumes() -> RecourseResult<()> {
  setup_tracing();
  reset_counters();
  let scope = Scope::root();
  scope.handle::<Progress, _>(|progress, ops| {
    HANDLER_EXEC_COUNTER.fetch_add(progress.done, Ordering::SeqCst);
    ops.restart(Resume)
  });

  for done in 1..=3 {
    scope.notify(Progress { done, total: 3 })?;
  }
  assert_eq!(HANDLER_EXEC_COUNTER.load(Ordering::SeqCst), 6);
  Ok(())
}

#[test]
fn test_demand_resolves_with_use_value() -> RecourseResult<()> {
  setup_tracing();
  let scope = Scope::root();
  scope.handle::<Malformed, _>(|m, ops| ops.restart(UseValue(m.0.len())));
  let length = scope.demand::<usize, _>(Malformed("four".into()))?;
  assert_eq!(length, 4);
  Ok(())
}

#[test]
fn test_demand_without_handler_errors() {
  setup_tracing();
  let err = Scope::root()
    .demand::<usize, _>(Malformed("x".into()))
    .expect_err("demand requires a handler");
  assert!(matches!(err, RecourseError::HandlerNotFound { .. }));
}

#[test]
fn test_demand_rejects_value_of_wrong_type() {
  setup_tracing();
  let scope = Scope::root();
  scope.add_restart(UseValue::<i8>::restart());
  scope.handle::<Malformed, _>(|_, ops| ops.restart(UseValue(1_i8)));
  let err = scope.demand::<usize, _>(Malformed("x".into())).expect_err("i8 is not usize");
  assert!(matches!(err, RecourseError::TypeMismatch { .. }));
}
