//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_view::RouteView;
use crate::state::app::AppContext;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Every path renders through [`RouteView`], which runs the guard and loader
/// for the current location. The route table here only decides which paths
/// exist; anything else falls through to the same view and renders as not
/// found.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppContext::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/helenite.css"/>
        <Title text="Helenite"/>

        <Router>
            <Routes fallback=|| view! { <RouteView/> }>
                <Route path=StaticSegment("") view=RouteView/>
                <Route path=StaticSegment("login") view=RouteView/>
                <Route path=StaticSegment("register") view=RouteView/>
                <Route path=StaticSegment("about-us") view=RouteView/>
                <Route path=StaticSegment("feed") view=RouteView/>
                <Route path=(StaticSegment("feed"), StaticSegment("discover")) view=RouteView/>
                <Route path=StaticSegment("search") view=RouteView/>
                <Route path=(StaticSegment("post"), ParamSegment("post_id")) view=RouteView/>
                <Route path=(StaticSegment("profile"), ParamSegment("username")) view=RouteView/>
                <Route
                    path=(StaticSegment("profile"), ParamSegment("username"), StaticSegment("settings"))
                    view=RouteView
                />
                <Route
                    path=(StaticSegment("profile"), ParamSegment("username"), StaticSegment("friends"))
                    view=RouteView
                />
            </Routes>
        </Router>
    }
}
