//! Route views.

pub mod groups;
pub mod login;
pub mod stats;
pub mod users;

use leptos::prelude::*;

use crate::net::client::ApiError;
use crate::state::actions::{self, ActionGuard};
use crate::state::notices::NoticesState;

/// Run one moderation action on behalf of a page: claim the view's guard,
/// call the transport, refetch the backing list on success, and report the
/// outcome as a notice.
///
/// Guarded-out invocations are dropped silently, and so is `Unauthorized` —
/// the transport's global policy already resets the session for those.
pub(crate) fn run_action<R, F, Fut>(
    guard: RwSignal<ActionGuard>,
    notices: RwSignal<NoticesState>,
    list: LocalResource<Result<R, ApiError>>,
    key: String,
    success: &'static str,
    action: F,
) where
    R: 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    leptos::task::spawn_local(async move {
        match actions::execute(&guard, &key, action).await {
            None | Some(Err(ApiError::Unauthorized)) => {}
            Some(Ok(())) => {
                let _ = notices.try_update(|state| state.push_success(success));
                // The server copy is authoritative; no in-place patching.
                list.refetch();
            }
            Some(Err(err)) => {
                let _ = notices.try_update(|state| state.push_error(err.to_string()));
            }
        }
    });
}
