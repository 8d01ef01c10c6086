//! One post in a feed, profile, or post page.

use helenite::net::types::Post;
use helenite::routes::Route;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::app::AppContext;
use crate::util::format;

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();

    let slug = post.slug().to_owned();
    let post_href = Route::Post { post_id: slug.clone() }.path();
    let liked = {
        let post = post.clone();
        move || app.session.with(|s| post.liked_by(&s.profile().username))
    };
    let (author_name, author_href, author_avatar) = match &post.profile {
        Some(author) => (
            format::display_name(&author.full_name, &author.username).to_owned(),
            Some(Route::Profile { username: author.username.clone() }.path()),
            format::avatar(author.pfp.as_deref()),
        ),
        None => (String::new(), None, format::avatar(None)),
    };

    let on_like = move |_| {
        let slug = slug.clone();
        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let session = app.session.get_untracked();
                let navigator = app.navigator();
                let result = helenite::mutation::post::like(&session, navigator.api(), &slug).await;
                let _ = crate::util::flow::finish(app, session, result, navigate);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (slug, &navigate);
        }
    };

    view! {
        <article class="post-card">
            <header class="post-card__header">
                <img class="avatar avatar--small" src=author_avatar alt=""/>
                {author_href.map(|href| view! { <a class="post-card__author" href=href>{author_name}</a> })}
                <span class="post-card__date">{format::publication_date(&post.post_publication_date).to_owned()}</span>
            </header>
            <Show when={
                let text = post.post_text.clone();
                move || !text.is_empty()
            }>
                <p class="post-card__text">{post.post_text.clone()}</p>
            </Show>
            {post.post_image.clone().map(|src| view! { <img class="post-card__image" src=src alt=""/> })}
            <footer class="post-card__footer">
                <button
                    class="post-card__like"
                    class:post-card__like--active=liked
                    on:click=on_like
                >
                    {format::likes_label(post.likes_count)}
                </button>
                <a class="post-card__comments" href=post_href>{format::comments_label(post.comments_count)}</a>
            </footer>
        </article>
    }
}
