//! Top navigation with search and logout.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use helenite::routes::Route;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::app::AppContext;
use crate::util::format;

/// Search route for a submitted query; blank queries go nowhere.
pub fn search_path(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| Route::Search { query: query.to_owned() }.path())
}

#[component]
pub fn NavBar() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let query = RwSignal::new(String::new());

    let logged_in = move || app.session.with(|s| s.session().is_logged_in());
    let username = move || app.session.with(|s| s.profile().username.clone());
    let avatar = move || app.session.with(|s| format::avatar(Some(s.profile().avatar_url.as_str())));
    let profile_href = move || Route::Profile { username: username() }.path();
    let friends_href = move || Route::Friends { username: username() }.path();

    let on_search = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if let Some(path) = search_path(&query.get()) {
                navigate(&path, NavigateOptions::default());
            }
        }
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let mut session = app.session.get_untracked();
                let navigator = app.navigator();
                let outcome = helenite::mutation::auth::logout(&mut session, navigator.api()).await;
                app.session.set(session);
                crate::util::flow::apply(app, outcome, navigate);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &navigate;
        }
    };

    view! {
        <Show when=logged_in>
            <nav class="nav-bar">
                <a class="nav-bar__brand" href="/feed">"Helenite"</a>
                <a href="/feed">"Feed"</a>
                <a href="/feed/discover">"Discover"</a>
                <a href=friends_href>"Friends"</a>
                <form class="nav-bar__search" on:submit=on_search.clone()>
                    <input
                        type="search"
                        placeholder="Search people"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                </form>
                <a class="nav-bar__profile" href=profile_href>
                    <img class="avatar avatar--small" src=avatar alt=""/>
                    <span>{username}</span>
                </a>
                <button class="nav-bar__logout" on:click=on_logout.clone()>"Log out"</button>
            </nav>
        </Show>
    }
}
