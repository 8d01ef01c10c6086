//! Single post with comments, the comment form, and delete for the author.

#[cfg(test)]
#[path = "post_test.rs"]
mod post_test;

use helenite::net::types::{Post, PostDetail};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::post_card::PostCard;
use crate::pages::login::field_message;
use crate::state::app::AppContext;
use crate::util::flow::InlineError;

/// Only the author sees the delete button.
pub fn can_delete(post: &Post, me: &str) -> bool {
    !me.is_empty() && post.profile.as_ref().is_some_and(|author| author.username == me)
}

#[component]
pub fn PostView(detail: PostDetail) -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let comment = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<InlineError>);

    let post = detail.post;
    let endpoint = post.endpoint.clone();
    let deletable = {
        let post = post.clone();
        move || app.session.with(|s| can_delete(&post, &s.profile().username))
    };

    let on_comment = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            let text = comment.get();
            if let Err(e) = helenite::validation::validate_comment(&text) {
                error.set(Some(InlineError { field: e.field, message: e.message }));
                return;
            }
            error.set(None);
            busy.set(true);
            let endpoint = endpoint.clone();

            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let session = app.session.get_untracked();
                    let navigator = app.navigator();
                    let result =
                        helenite::mutation::post::comment(&session, navigator.api(), &endpoint, &text).await;
                    if result.is_ok() {
                        comment.set(String::new());
                    }
                    error.set(crate::util::flow::finish(app, session, result, navigate));
                    busy.set(false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (text, endpoint, app, &navigate);
                busy.set(false);
            }
        }
    };

    let on_delete = {
        let post = post.clone();
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            let post = post.clone();
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let session = app.session.get_untracked();
                    let navigator = app.navigator();
                    let result = helenite::mutation::post::delete_post(&session, navigator.api(), &post).await;
                    let _ = crate::util::flow::finish(app, session, result, navigate);
                    busy.set(false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (post, &navigate);
                busy.set(false);
            }
        }
    };

    view! {
        <section class="post-page">
            <PostCard post=post/>
            <Show when=deletable>
                <button class="button button--danger" disabled=move || busy.get() on:click=on_delete.clone()>
                    "Delete post"
                </button>
            </Show>
            <ul class="comments">
                {detail
                    .comments
                    .into_iter()
                    .map(|c| {
                        view! {
                            <li class="comments__item">
                                <span class="comments__author">{c.comment_user}</span>
                                <span class="comments__text">{c.comment_text}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <form class="comment-form" on:submit=on_comment>
                <textarea
                    placeholder="Write a comment"
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                ></textarea>
                <p class="field-error">{move || field_message(error.get().as_ref(), "comment_text")}</p>
                <button class="button" type="submit" disabled=move || busy.get()>"Comment"</button>
            </form>
        </section>
    }
}
