//! Friends list page.

use helenite::net::types::ProfileSummary;
use leptos::prelude::*;

use crate::components::profile_list::ProfileList;

#[component]
pub fn FriendsView(friends: Vec<ProfileSummary>) -> impl IntoView {
    view! {
        <section class="friends">
            <h1>"Friends"</h1>
            <ProfileList profiles=friends empty="No friends to show yet."/>
        </section>
    }
}
