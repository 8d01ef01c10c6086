//! Route outlet: guard, load, and render the current location.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route in the app table renders this component. It hands the current
//! location to the core navigator, follows guard redirects, and renders the
//! loaded page, the error page, or the not-found page. Reloads requested by
//! flows re-run the same location.

#[cfg(test)]
#[path = "route_view_test.rs"]
mod route_view_test;

use helenite::navigation::RouteRender;
use helenite::routes::Route;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::nav_bar::NavBar;
use crate::components::toasts::Toasts;
use crate::pages::error::{ErrorPage, NotFoundPage};
use crate::pages::page_view;
use crate::state::app::AppContext;

/// Join a router pathname and search string into what [`Route::parse`] expects.
pub fn path_and_query(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

#[component]
pub fn RouteView() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let location = use_location();
    let navigate = use_navigate();
    let render = RwSignal::new(None::<RouteRender>);

    Effect::new(move || {
        let route = Route::parse(&path_and_query(&location.pathname.get(), &location.search.get()));
        app.reload.track();

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let mut session = app.session.get_untracked();
                let navigator = app.navigator();
                let outcome = navigator.navigate(&mut session, route).await;
                app.session.set(session);
                match outcome {
                    Some(RouteRender::Redirect(target)) => {
                        let options = leptos_router::NavigateOptions { replace: true, ..Default::default() };
                        navigate(&target.path(), options);
                    }
                    Some(other) => render.set(Some(other)),
                    None => {}
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (route, &navigate);
        }
    });

    view! {
        <NavBar/>
        <main class="page">
            {move || match render.get() {
                None | Some(RouteRender::Redirect(_)) => {
                    view! { <p class="page__loading">"Loading..."</p> }.into_any()
                }
                Some(RouteRender::Page(data)) => page_view(data),
                Some(RouteRender::Error(error)) => view! { <ErrorPage error/> }.into_any(),
                Some(RouteRender::NotFound) => view! { <NotFoundPage/> }.into_any(),
            }}
        </main>
        <Toasts/>
    }
}
