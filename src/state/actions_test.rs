use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::{Pin, pin};
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use super::*;

// =============================================================
// Test fixtures
// =============================================================

impl GuardHandle for Rc<RefCell<ActionGuard>> {
    fn try_begin(&self, key: &str) -> bool {
        self.borrow_mut().try_begin(key)
    }

    fn finish(&self) {
        self.borrow_mut().finish();
    }
}

/// Future that stays pending until its gate is released.
struct GateFuture(Rc<Cell<bool>>);

impl Future for GateFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() { Poll::Ready(()) } else { Poll::Pending }
    }
}

fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
    }
}

fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}

fn guard() -> Rc<RefCell<ActionGuard>> {
    Rc::new(RefCell::new(ActionGuard::default()))
}

// =============================================================
// ActionGuard
// =============================================================

#[test]
fn guard_starts_idle() {
    let guard = ActionGuard::default();
    assert!(!guard.is_busy());
    assert!(guard.pending_key().is_none());
}

#[test]
fn try_begin_claims_the_guard() {
    let mut guard = ActionGuard::default();
    assert!(guard.try_begin("ban:42"));
    assert!(guard.is_busy());
    assert_eq!(guard.pending_key(), Some("ban:42"));
}

#[test]
fn identical_action_is_refused_while_pending() {
    let mut guard = ActionGuard::default();
    assert!(guard.try_begin("ban:42"));
    assert!(!guard.try_begin("ban:42"));
}

#[test]
fn conflicting_action_is_refused_while_pending() {
    // One action per view at a time, whatever its target.
    let mut guard = ActionGuard::default();
    assert!(guard.try_begin("ban:42"));
    assert!(!guard.try_begin("unban:7"));
}

#[test]
fn finish_releases_for_the_next_action() {
    let mut guard = ActionGuard::default();
    assert!(guard.try_begin("ban:42"));
    guard.finish();
    assert!(guard.try_begin("unban:42"));
}

#[test]
fn finish_when_idle_is_a_no_op() {
    let mut guard = ActionGuard::default();
    guard.finish();
    assert!(!guard.is_busy());
}

// =============================================================
// execute
// =============================================================

#[test]
fn execute_runs_the_action_and_returns_its_outcome() {
    let guard = guard();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();

    let outcome = block_on(execute(&guard, "ban:42", || async move {
        counter.set(counter.get() + 1);
        Ok(())
    }));

    assert_eq!(outcome, Some(Ok(())));
    assert_eq!(calls.get(), 1);
    assert!(!guard.borrow().is_busy());
}

#[test]
fn rapid_double_submission_makes_exactly_one_call() {
    let guard = guard();
    let gate = Rc::new(Cell::new(false));
    let calls = Rc::new(Cell::new(0));

    let first_gate = gate.clone();
    let first_calls = calls.clone();
    let mut first = pin!(execute(&guard, "ban:42", move || async move {
        first_calls.set(first_calls.get() + 1);
        GateFuture(first_gate).await;
        Ok(())
    }));
    assert!(poll_once(first.as_mut()).is_pending());

    // The second click lands while the first request is still in flight.
    let second_calls = calls.clone();
    let second = execute(&guard, "ban:42", move || async move {
        second_calls.set(second_calls.get() + 1);
        Ok(())
    });
    assert_eq!(block_on(second), None);

    gate.set(true);
    assert_eq!(block_on(first), Some(Ok(())));
    assert_eq!(calls.get(), 1);
    assert!(!guard.borrow().is_busy());
}

#[test]
fn failure_still_releases_the_guard() {
    let guard = guard();

    let outcome = block_on(execute(&guard, "kick:7", || async {
        Err(ApiError::Api("member not found".to_owned()))
    }));

    assert_eq!(outcome, Some(Err(ApiError::Api("member not found".to_owned()))));
    assert!(!guard.borrow().is_busy());
    assert!(guard.try_begin("kick:7"));
}

#[test]
fn unauthorized_failure_does_not_leave_the_view_disabled() {
    let guard = guard();

    let outcome = block_on(execute(&guard, "mute:9", || async {
        Err(ApiError::Unauthorized)
    }));

    assert_eq!(outcome, Some(Err(ApiError::Unauthorized)));
    assert!(!guard.borrow().is_busy());
}
