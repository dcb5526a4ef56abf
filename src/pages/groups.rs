//! Group member moderation page — mute, unmute, kick.

use leptos::prelude::*;

use crate::net::client::Api;
use crate::pages::run_action;
use crate::state::actions::ActionGuard;
use crate::state::notices::NoticesState;

/// The member actions that go through the dialog. A reason is optional for
/// both; mute also takes an optional duration in minutes, empty meaning
/// indefinite. Unmute runs directly from the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemberAction {
    Mute,
    Kick,
}

impl MemberAction {
    fn title(self) -> &'static str {
        match self {
            Self::Mute => "Mute member",
            Self::Kick => "Kick member",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Mute => "mute",
            Self::Kick => "kick",
        }
    }

    fn success(self) -> &'static str {
        match self {
            Self::Mute => "Member muted.",
            Self::Kick => "Member kicked.",
        }
    }
}

/// Managed-group member table with per-row moderation controls.
#[component]
pub fn GroupsPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let notices = expect_context::<RwSignal<NoticesState>>();
    let guard = RwSignal::new(ActionGuard::default());

    let members = LocalResource::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.fetch_group_members().await }
        }
    });

    let dialog = RwSignal::new(Option::<(MemberAction, i64)>::None);
    let reason = RwSignal::new(String::new());
    let duration_input = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(Option::<String>::None);

    let open_dialog = move |action: MemberAction, user_id: i64| {
        reason.set(String::new());
        duration_input.set(String::new());
        dialog_error.set(None);
        dialog.set(Some((action, user_id)));
    };

    let on_unmute = Callback::new({
        let api = api.clone();
        move |user_id: i64| {
            let api = api.clone();
            run_action(
                guard,
                notices,
                members,
                format!("unmute:{user_id}"),
                "Member unmuted.",
                move || async move { api.unmute_member(user_id, None).await },
            );
        }
    });

    let on_confirm = Callback::new({
        let api = api.clone();
        move |()| {
            let Some((action, user_id)) = dialog.get_untracked() else {
                return;
            };
            let reason_text = reason.get_untracked().trim().to_owned();
            let reason_opt = (!reason_text.is_empty()).then_some(reason_text);
            let key = format!("{}:{user_id}", action.key());
            let api = api.clone();
            match action {
                MemberAction::Mute => {
                    let duration_text = duration_input.get_untracked().trim().to_owned();
                    let duration = if duration_text.is_empty() {
                        None
                    } else {
                        match duration_text.parse::<u32>() {
                            Ok(minutes) if minutes > 0 => Some(minutes),
                            _ => {
                                dialog_error.set(Some(
                                    "Duration must be a positive number of minutes.".to_owned(),
                                ));
                                return;
                            }
                        }
                    };
                    run_action(guard, notices, members, key, action.success(), move || async move {
                        api.mute_member(user_id, duration, reason_opt.as_deref()).await
                    });
                }
                MemberAction::Kick => {
                    run_action(guard, notices, members, key, action.success(), move || async move {
                        api.kick_member(user_id, reason_opt.as_deref()).await
                    });
                }
            }
            dialog.set(None);
        }
    });

    view! {
        <section class="groups-page">
            <h1>"Group members"</h1>

            <Suspense fallback=move || {
                view! { <p class="page-status">"Loading members..."</p> }
            }>
                {move || {
                    members
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="page-status">"No members."</p> }.into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Username"</th>
                                                <th>"Status"</th>
                                                <th>"Joined"</th>
                                                <th>"Muted"</th>
                                                <th>"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .map(|member| {
                                                    let user_id = member.user_id;
                                                    let busy = move || guard.get().is_busy();
                                                    let mute_control = if member.is_muted {
                                                        view! {
                                                            <button
                                                                class="btn btn--small"
                                                                disabled=busy
                                                                on:click=move |_| on_unmute.run(user_id)
                                                            >
                                                                "Unmute"
                                                            </button>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <button
                                                                class="btn btn--small"
                                                                disabled=busy
                                                                on:click=move |_| open_dialog(
                                                                    MemberAction::Mute,
                                                                    user_id,
                                                                )
                                                            >
                                                                "Mute"
                                                            </button>
                                                        }
                                                            .into_any()
                                                    };
                                                    view! {
                                                        <tr>
                                                            <td>{member.username}</td>
                                                            <td>{member.status}</td>
                                                            <td>{member.joined_date}</td>
                                                            <td>{if member.is_muted { "yes" } else { "no" }}</td>
                                                            <td class="data-table__actions">
                                                                {mute_control}
                                                                <button
                                                                    class="btn btn--small btn--danger"
                                                                    disabled=busy
                                                                    on:click=move |_| open_dialog(
                                                                        MemberAction::Kick,
                                                                        user_id,
                                                                    )
                                                                >
                                                                    "Kick"
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
                            "Reason (optional)"
                            <input
                                class="dialog__input"
                                type="text"
                                prop:value=move || reason.get()
                                on:input=move |ev| reason.set(event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || {
                            matches!(dialog.get(), Some((MemberAction::Mute, _)))
                        }>
                            <label class="dialog__label">
                                "Duration in minutes (empty for indefinite)"
                                <input
                                    class="dialog__input"
                                    type="text"
                                    prop:value=move || duration_input.get()
                                    on:input=move |ev| duration_input.set(event_target_value(&ev))
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
