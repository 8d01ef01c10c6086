//! Toast stack for transient notices.

use helenite::mutation::NoticeKind;
use leptos::prelude::*;

use crate::state::app::AppContext;

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "toast toast--success",
        NoticeKind::Info => "toast toast--info",
        NoticeKind::Warning => "toast toast--warning",
        NoticeKind::Error => "toast toast--error",
    }
}

#[component]
pub fn Toasts() -> impl IntoView {
    let app = expect_context::<AppContext>();

    view! {
        <div class="toasts" role="status">
            <For
                each=move || app.toasts.get().toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=kind_class(toast.notice.kind)>
                            <span>{toast.notice.message}</span>
                            <button
                                class="toast__dismiss"
                                on:click=move |_| app.toasts.update(|t| t.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
