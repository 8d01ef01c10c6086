//! Feed and discover pages with the new-post form.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use helenite::net::transport::FileUpload;
use helenite::net::types::FeedPage;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::post_card::PostCard;
use crate::pages::login::field_message;
use crate::state::app::AppContext;
use crate::util::flow::InlineError;

pub fn empty_feed_message(title: &str) -> &'static str {
    if title == "Discover" {
        "Nobody has posted anything yet."
    } else {
        "Nothing here yet. Add some friends or write your first post."
    }
}

#[component]
pub fn FeedView(page: FeedPage, #[prop(into)] title: String) -> impl IntoView {
    let empty = empty_feed_message(&title);
    let posts = page.results;
    view! {
        <section class="feed">
            <h1>{title}</h1>
            <NewPostForm/>
            <Show when={
                let none = posts.is_empty();
                move || none
            }>
                <p class="feed__empty">{empty}</p>
            </Show>
            {posts.into_iter().map(|post| view! { <PostCard post/> }).collect_view()}
        </section>
    }
}

#[component]
pub fn NewPostForm() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let text = RwSignal::new(String::new());
    let image = RwSignal::new(None::<FileUpload>);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<InlineError>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = text.get();
        let upload = image.get();
        if let Err(e) = helenite::validation::validate_post(&body, upload.as_ref()) {
            error.set(Some(InlineError { field: e.field, message: e.message }));
            return;
        }
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let session = app.session.get_untracked();
                let navigator = app.navigator();
                let result = helenite::mutation::post::new_post(&session, navigator.api(), &body, upload).await;
                if result.is_ok() {
                    text.set(String::new());
                    image.set(None);
                }
                error.set(crate::util::flow::finish(app, session, result, navigate));
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (body, upload, app, &navigate);
        }
    };

    let on_image = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            leptos::task::spawn_local(async move {
                image.set(crate::util::files::read_selected(&input).await);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    view! {
        <form class="new-post" on:submit=on_submit>
            <textarea
                class="new-post__text"
                placeholder="What's on your mind?"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            ></textarea>
            <p class="field-error">
                {move || {
                    let current = error.get();
                    field_message(current.as_ref(), "post_text").or_else(|| field_message(current.as_ref(), "post_image"))
                }}
            </p>
            <div class="new-post__actions">
                <input type="file" accept=".jpg,.jpeg,.png" on:change=on_image/>
                <button class="button" type="submit" disabled=move || busy.get()>"Post"</button>
            </div>
        </form>
    }
}
