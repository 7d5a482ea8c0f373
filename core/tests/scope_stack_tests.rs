// tests/scope_stack_tests.rs
mod common;

use common::*;
use recourse::{RecourseError, RecourseResult, Scope, ScopeKind, ScopeStack};

#[test]
fn test_create_nests_under_current() {
  setup_tracing();
  let stack = ScopeStack::new();
  assert!(stack.current().is_none());

  let outer = stack.create();
  assert!(outer.is_root());
  assert_eq!(stack.current(), Some(outer.clone()));

  let inner = stack.create();
  assert_eq!(inner.parent(), Some(&outer));
  assert_eq!(inner.depth(), 1);
  assert_eq!(inner.kind(), ScopeKind::Dynamic);
  assert_eq!(stack.current(), Some(inner.clone()));

  stack.retire(&inner);
  assert_eq!(stack.current(), Some(outer.clone()));
  stack.retire(&outer);
  assert!(stack.current().is_none());
}

#[test]
fn test_lifo_retirement_restores_initial_scope() {
  setup_tracing();
  let base = Scope::root();
  let stack = ScopeStack::with_root(base.clone());

  let mut created = Vec::new();
  for _ in 0..5 {
    created.push(stack.create());
  }
  assert_eq!(stack.current().map(|s| s.depth()), Some(5));

  while let Some(scope) = created.pop() {
    stack.retire(&scope);
    assert!(scope.is_retired());
  }
  assert_eq!(stack.current(), Some(base));
}

#[test]
fn test_interleaved_nesting_restores_initial_scope() {
  setup_tracing();
  let base = Scope::root();
  let stack = ScopeStack::with_root(base.clone());

  let a = stack.create();
  let b = stack.create();
  stack.retire(&b);
  let c = stack.create();
  assert_eq!(c.parent(), Some(&a));
  let d = stack.create();
  stack.retire(&d);
  stack.retire(&c);
  stack.retire(&a);

  assert_eq!(stack.current(), Some(base));
}

#[test]
fn test_retire_is_idempotent() {
  setup_tracing();
  let stack = ScopeStack::new();
  let outer = stack.create();
  let inner = stack.create();

  stack.retire(&inner);
  stack.retire(&inner);
  assert_eq!(stack.current(), Some(outer));
}

#[test]
fn test_retire_without_current_is_noop() {
  setup_tracing();
  let stack = ScopeStack::new();
  let stray = Scope::root().child();
  stack.retire(&stray);
  assert!(stack.current().is_none());
  assert!(!stray.is_retired());
}

#[test]
fn test_guard_retires_on_drop() {
  setup_tracing();
  let stack = ScopeStack::new();
  let outer = stack.enter();
  {
    let inner = stack.enter();
    assert_eq!(inner.parent(), Some(outer.scope()));
    assert_eq!(stack.current().as_ref(), Some(inner.scope()));
  }
  assert_eq!(stack.current().as_ref(), Some(outer.scope()));
  drop(outer);
  assert!(stack.current().is_none());
}

fn step(fail: bool) -> RecourseResult<()> {
  if fail {
    return Err(RecourseError::Internal("early exit".to_string()));
  }
  Ok(())
}

fn fails_inside_scope(stack: &ScopeStack) -> RecourseResult<()> {
  let _guard = stack.enter();
  step(false)?;
  step(true)?;
  Ok(())
}

#[test]
fn test_guard_retires_on_error_path() {
  setup_tracing();
  let base = Scope::root();
  let stack = ScopeStack::with_root(base.clone());
  assert!(fails_inside_scope(&stack).is_err());
  assert_eq!(stack.current(), Some(base));
}

#[test]
fn test_out_of_order_retirement_moves_to_parent() {
  setup_tracing();
  let stack = ScopeStack::new();
  let a = stack.create();
  let b = stack.create();
  let _c = stack.create();

  // Discipline violation: b retired while c is current.
  stack.retire(&b);
  assert_eq!(stack.current(), Some(a));
}

#[test]
fn test_scope_identity_and_ancestors() {
  setup_tracing();
  let root = Scope::root();
  let mid = root.child();
  let leaf = mid.child();

  assert_ne!(root.id(), mid.id());
  assert!(leaf.id().as_u64() > mid.id().as_u64());
  assert_eq!(mid.id().to_string(), format!("scope#{}", mid.id().as_u64()));
  assert_eq!(leaf.clone(), leaf);
  assert_ne!(leaf, mid);

  let ancestors: Vec<_> = leaf.ancestors().map(|s| s.id()).collect();
  assert_eq!(ancestors, vec![mid.id(), root.id()]);
  assert_eq!(leaf.depth(), 2);
  assert!(root.ancestors().next().is_none());
}

fn drop_on_small_stack<F: FnOnce() + Send + 'static>(work: F) {
  std::thread::Builder::new()
    .stack_size(2 * 1024 * 1024)
    .spawn(work)
    .expect("spawn test thread")
    .join()
    .expect("deep chain dropped without overflowing the stack");
}

#[test]
fn test_dropping_deep_chain_does_not_overflow() {
  drop_on_small_stack(|| {
    let mut leaf = Scope::root();
    for _ in 0..200_000 {
      leaf = leaf.child();
    }
    assert_eq!(leaf.depth(), 200_000);
    drop(leaf);
  });
}

#[test]
fn test_dropping_deep_stack_does_not_overflow() {
  drop_on_small_stack(|| {
    let stack = ScopeStack::new();
    for _ in 0..200_000 {
      let _ = stack.create();
    }
    assert_eq!(stack.current().map(|s| s.depth()), Some(199_999));
    drop(stack);
  });
}

#[test]
fn test_dropping_leaf_keeps_shared_ancestors() {
  setup_tracing();
  let root = Scope::root();
  let mid = root.child();
  let leaf = mid.child().child();
  drop(leaf);
  // Ancestors still held elsewhere stay intact.
  assert_eq!(mid.parent(), Some(&root));
  assert_eq!(mid.depth(), 1);
  assert_eq!(mid.child().ancestors().count(), 2);
}
