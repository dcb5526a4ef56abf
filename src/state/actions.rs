//! Moderation-action execution.
//!
//! Every moderation mutation (ban, unban, mute, unmute, kick, reset or
//! adjust points) follows the same shape: guard against concurrent
//! invocation, call the transport, refetch the affected list, report the
//! outcome. [`ActionGuard`] is the per-view in-flight flag and [`execute`]
//! is the runner; pages own the refetch-and-notify half since it touches
//! their resources.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use leptos::prelude::{RwSignal, Update};

use crate::net::client::ApiError;

/// At most one moderation action may be in flight per view; the key of the
/// pending action is kept so controls can reflect what is running.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionGuard {
    in_flight: Option<String>,
}

impl ActionGuard {
    /// Claim the guard for `key`. Refused while any action is pending —
    /// identical and conflicting actions are blocked alike.
    pub fn try_begin(&mut self, key: &str) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(key.to_owned());
        true
    }

    /// Release the guard. Safe to call when already idle.
    pub fn finish(&mut self) {
        self.in_flight = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_key(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }
}

/// Shared handle to a view's action guard. The UI backs this with a signal;
/// tests use a plain `RefCell`.
pub trait GuardHandle {
    fn try_begin(&self, key: &str) -> bool;
    fn finish(&self);
}

impl GuardHandle for RwSignal<ActionGuard> {
    fn try_begin(&self, key: &str) -> bool {
        self.try_update(|guard| guard.try_begin(key)).unwrap_or(false)
    }

    fn finish(&self) {
        let _ = self.try_update(ActionGuard::finish);
    }
}

/// Run one moderation action under the view's guard.
///
/// Returns `None` when a pending action blocked this invocation, otherwise
/// the transport outcome. The guard is released on every path — success,
/// failure, or a 401-driven reset must never leave the view disabled.
pub async fn execute<G, F, Fut>(guard: &G, key: &str, action: F) -> Option<Result<(), ApiError>>
where
    G: GuardHandle,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    if !guard.try_begin(key) {
        return None;
    }
    let result = action().await;
    guard.finish();
    Some(result)
}
