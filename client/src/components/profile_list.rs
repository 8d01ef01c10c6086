//! List of compact profiles (search results, friends).

use helenite::net::types::ProfileSummary;
use helenite::routes::Route;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::util::format;

#[component]
pub fn ProfileList(profiles: Vec<ProfileSummary>, #[prop(into)] empty: String) -> impl IntoView {
    if profiles.is_empty() {
        return view! { <p class="profile-list__empty">{empty}</p> }.into_any();
    }
    view! {
        <ul class="profile-list">
            {profiles
                .into_iter()
                .map(|p| {
                    let href = Route::Profile { username: p.username.clone() }.path();
                    let name = format::display_name(&p.full_name, &p.username).to_owned();
                    view! {
                        <li class="profile-list__item">
                            <img class="avatar avatar--small" src=format::avatar(p.pfp.as_deref()) alt=""/>
                            <a href=href>{name}</a>
                            <span class="profile-list__username">"@" {p.username}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}
