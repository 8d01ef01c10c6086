//! Profile page with posts and the friend request button.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use helenite::net::types::ProfileDetail;
use helenite::routes::Route;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;

use crate::components::post_card::PostCard;
use crate::state::app::AppContext;
use crate::util::format;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FriendAction {
    /// Viewing your own profile.
    Own,
    Send,
    Accept,
}

pub fn friend_action(me: &str, username: &str, has_pending_request: bool) -> FriendAction {
    if me == username {
        FriendAction::Own
    } else if has_pending_request {
        FriendAction::Accept
    } else {
        FriendAction::Send
    }
}

#[component]
pub fn ProfileView(profile: Option<ProfileDetail>) -> impl IntoView {
    let Some(profile) = profile else {
        return view! {
            <section class="profile profile--empty">
                <p>"This profile is not available."</p>
            </section>
        }
        .into_any();
    };

    let app = expect_context::<AppContext>();
    let navigate = use_navigate();
    let username = profile.summary.username.clone();
    let action = {
        let username = username.clone();
        move || {
            app.session.with(|s| {
                let pending = s.profile_cache().has_pending_request_from(&username);
                friend_action(&s.profile().username, &username, pending)
            })
        }
    };
    let busy = RwSignal::new(false);

    let on_friend = {
        let username = username.clone();
        move |_| {
            if busy.get() {
                return;
            }
            busy.set(true);
            let target = username.clone();
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let session = app.session.get_untracked();
                    let navigator = app.navigator();
                    let result = helenite::mutation::friends::friend_request(&session, navigator.api(), &target).await;
                    let _ = crate::util::flow::finish(app, session, result, navigate);
                    busy.set(false);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (target, &navigate);
            }
        }
    };

    let friends_href = Route::Friends { username: username.clone() }.path();
    let settings_href = Route::Settings { username: profile.summary.slug().to_owned() }.path();
    let name = format::display_name(&profile.summary.full_name, &username).to_owned();
    let posts = profile.posts;

    view! {
        <section class="profile">
            <header class="profile__header">
                <img class="avatar avatar--large" src=format::avatar(profile.summary.pfp.as_deref()) alt=""/>
                <div>
                    <h1>{name}</h1>
                    <p class="profile__username">"@" {username.clone()}</p>
                    {profile.birthday.map(|b| view! { <p class="profile__detail">"Born " {b}</p> })}
                    {profile.birth_place.map(|p| view! { <p class="profile__detail">"From " {p}</p> })}
                </div>
                <nav class="profile__links">
                    <a href=friends_href>"Friends"</a>
                    {move || match action() {
                        FriendAction::Own => {
                            view! { <a href=settings_href.clone()>"Settings"</a> }.into_any()
                        }
                        FriendAction::Send => {
                            view! {
                                <button class="button" disabled=move || busy.get() on:click=on_friend.clone()>
                                    "Add friend"
                                </button>
                            }
                                .into_any()
                        }
                        FriendAction::Accept => {
                            view! {
                                <button class="button" disabled=move || busy.get() on:click=on_friend.clone()>
                                    "Accept friend request"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </nav>
            </header>
            <div class="profile__posts">
                {posts.into_iter().map(|post| view! { <PostCard post/> }).collect_view()}
            </div>
        </section>
    }
    .into_any()
}
