//! Notification tray rendering [`NoticesState`].

use leptos::prelude::*;

use crate::state::notices::{NoticeKind, NoticesState};

/// Fixed tray rendering the current notices, newest last. Each notice gets a
/// close button and a timed dismissal; both go through `dismiss` by id, so
/// whichever fires second is a no-op.
#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticesState>>();

    view! {
        <div class="notice-tray">
            <For
                each=move || notices.get().items
                key=|notice| notice.id.clone()
                children=move |notice| {
                    schedule_dismiss(notices, notice.id.clone());
                    let close_id = notice.id.clone();
                    let kind_class = match notice.kind {
                        NoticeKind::Success => "notice notice--success",
                        NoticeKind::Error => "notice notice--error",
                    };
                    view! {
                        <div class=kind_class>
                            <span class="notice__text">{notice.text}</span>
                            <button
                                class="notice__close"
                                on:click=move |_| {
                                    let _ = notices
                                        .try_update(|state| state.dismiss(&close_id));
                                }
                            >
                                "x"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

fn schedule_dismiss(notices: RwSignal<NoticesState>, id: String) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        /// How long a notice stays on screen before it dismisses itself.
        const NOTICE_LIFETIME_SECS: u64 = 5;
        gloo_timers::future::sleep(std::time::Duration::from_secs(NOTICE_LIFETIME_SECS)).await;
        // The signal is gone when the app unmounted; nothing left to dismiss.
        let _ = notices.try_update(|state| state.dismiss(&id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (notices, id);
}
