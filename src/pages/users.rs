//! User moderation page — list, ban/unban, points controls.

use leptos::prelude::*;

use crate::net::client::Api;
use crate::net::types::UserStatus;
use crate::pages::run_action;
use crate::state::actions::ActionGuard;
use crate::state::notices::NoticesState;

/// The moderation actions reachable from a user row. Each one requires a
/// reason; points adjustment also takes a signed delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UserAction {
    Ban,
    Unban,
    ResetPoints,
    AdjustPoints,
}

impl UserAction {
    fn title(self) -> &'static str {
        match self {
            Self::Ban => "Ban user",
            Self::Unban => "Unban user",
            Self::ResetPoints => "Reset points",
            Self::AdjustPoints => "Adjust points",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::ResetPoints => "reset-points",
            Self::AdjustPoints => "adjust-points",
        }
    }

    fn success(self) -> &'static str {
        match self {
            Self::Ban => "User banned.",
            Self::Unban => "User unbanned.",
            Self::ResetPoints => "Points reset.",
            Self::AdjustPoints => "Points adjusted.",
        }
    }
}

/// Platform user table with per-row moderation controls.
#[component]
pub fn UsersPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let notices = expect_context::<RwSignal<NoticesState>>();
    let guard = RwSignal::new(ActionGuard::default());

    let users = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_users().await }
        }
    });

    // Dialog state for the pending action.
    let dialog = RwSignal::new(Option::<(UserAction, i64)>::None);
    let reason = RwSignal::new(String::new());
    let points_input = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(Option::<String>::None);

    let open_dialog = move |action: UserAction, user_id: i64| {
        reason.set(String::new());
        points_input.set(String::new());
        dialog_error.set(None);
        dialog.set(Some((action, user_id)));
    };

    let on_confirm = Callback::new({
        let api = api.clone();
        move |()| {
            let Some((action, user_id)) = dialog.get_untracked() else {
                return;
            };
            let reason_text = reason.get_untracked().trim().to_owned();
            if reason_text.is_empty() {
                dialog_error.set(Some("A reason is required.".to_owned()));
                return;
            }
            let key = format!("{}:{user_id}", action.key());
            let api = api.clone();
            match action {
                UserAction::Ban => {
                    run_action(guard, notices, users, key, action.success(), move || async move {
                        api.ban_user(user_id, &reason_text).await
                    });
                }
                UserAction::Unban => {
                    run_action(guard, notices, users, key, action.success(), move || async move {
                        api.unban_user(user_id, &reason_text).await
                    });
                }
                UserAction::ResetPoints => {
                    run_action(guard, notices, users, key, action.success(), move || async move {
                        api.reset_points(user_id, &reason_text).await
                    });
                }
                UserAction::AdjustPoints => {
                    let Ok(delta) = points_input.get_untracked().trim().parse::<i64>() else {
                        dialog_error
                            .set(Some("Enter a whole-number points delta.".to_owned()));
                        return;
                    };
                    run_action(guard, notices, users, key, action.success(), move || async move {
                        api.adjust_points(user_id, delta, &reason_text).await
                    });
                }
            }
            dialog.set(None);
        }
    });

    view! {
        <section class="users-page">
            <h1>"Users"</h1>

            <Suspense fallback=move || {
                view! { <p class="page-status">"Loading users..."</p> }
            }>
                {move || {
                    users
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="page-status">"No users yet."</p> }.into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Telegram ID"</th>
                                                <th>"Email"</th>
                                                <th>"Status"</th>
                                                <th>"Points"</th>
                                                <th>"Joined"</th>
                                                <th>"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|user| {
                                                    let user_id = user.id;
                                                    let busy = move || guard.get().is_busy();
                                                    let status_action = match user.status {
                                                        UserStatus::Active => UserAction::Ban,
                                                        UserStatus::Banned => UserAction::Unban,
                                                    };
                                                    view! {
                                                        <tr>
                                                            <td>{user.telegram_id}</td>
                                                            <td>{user.email.unwrap_or_default()}</td>
                                                            <td class="data-table__status">
                                                                {user.status.label()}
                                                            </td>
                                                            <td>{user.points}</td>
                                                            <td>{user.created_at}</td>
                                                            <td class="data-table__actions">
                                                                <button
                                                                    class="btn btn--small"
                                                                    disabled=busy
                                                                    on:click=move |_| open_dialog(
                                                                        status_action,
                                                                        user_id,
                                                                    )
                                                                >
                                                                    {status_action.title()}
                                                                </button>
                                                                <button
                                                                    class="btn btn--small"
                                                                    disabled=busy
                                                                    on:click=move |_| open_dialog(
                                                                        UserAction::AdjustPoints,
                                                                        user_id,
                                                                    )
                                                                >
                                                                    "Adjust points"
                                                                </button>
                                                                <button
                                                                    class="btn btn--small"
                                                                    disabled=busy
                                                                    on:click=move |_| open_dialog(
                                                                        UserAction::ResetPoints,
                                                                        user_id,
                                                                    )
                                                                >
                                                                    "Reset points"
                                                                </button>
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                            Err(err) => {
                                view! { <p class="page-error">{err.to_string()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>

            <Show when=move || dialog.get().is_some()>
                <div class="dialog-backdrop" on:click=move |_| dialog.set(None)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>
                            {move || {
                                dialog.get().map(|(action, _)| action.title()).unwrap_or_default()
                            }}
                        </h2>
                        <label class="dialog__label">
                            "Reason"
                            <input
                                class="dialog__input"
                                type="text"
                                prop:value=move || reason.get()
                                on:input=move |ev| reason.set(event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || {
                            matches!(dialog.get(), Some((UserAction::AdjustPoints, _)))
                        }>
                            <label class="dialog__label">
                                "Points delta"
                                <input
                                    class="dialog__input"
                                    type="text"
                                    prop:value=move || points_input.get()
                                    on:input=move |ev| points_input.set(event_target_value(&ev))
                                />
                            </label>
                        </Show>
                        {move || {
                            dialog_error
                                .get()
                                .map(|message| view! { <p class="dialog__error">{message}</p> })
                        }}
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| dialog.set(None)>
                                "Cancel"
                            </button>
                            <button
                                class="btn btn--primary"
                                disabled=move || guard.get().is_busy()
                                on:click=move |_| on_confirm.run(())
                            >
                                "Confirm"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
