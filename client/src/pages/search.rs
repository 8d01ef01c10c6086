//! People search results.

use helenite::net::types::ProfileSummary;
use leptos::prelude::*;

use crate::components::profile_list::ProfileList;

#[component]
pub fn SearchView(results: Vec<ProfileSummary>) -> impl IntoView {
    view! {
        <section class="search">
            <h1>"Search results"</h1>
            <ProfileList profiles=results empty="No one matched your search."/>
        </section>
    }
}
