//! Route entry: guard, load, render decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Navigator::navigate`] is the single path from "the user asked for a URL"
//! to "this is what the page shows". It refreshes the session, runs the guard,
//! runs the route's loader under a fresh [`RequestScope`], and applies the
//! route's [`FailurePolicy`]. Starting a navigation cancels the previous one,
//! so a slow load never lands on a page the user has already left.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::cell::{Cell, RefCell};

use crate::cancel::RequestScope;
use crate::context::SessionContext;
use crate::guard::GuardDecision;
use crate::loader::{self, FailurePolicy, LoaderError};
use crate::mutation::Navigation;
use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::{FeedPage, PostDetail, ProfileDetail, ProfileSummary, SettingsView};
use crate::routes::Route;
use crate::storage::CredentialStore;

/// Loaded data for one page. `None` and empty lists are the empty state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageData {
    Landing,
    Login,
    Register,
    AboutUs,
    Feed(FeedPage),
    Discover(FeedPage),
    Profile(Option<ProfileDetail>),
    /// `None` when the caller may not view or edit these settings.
    Settings(Option<SettingsView>),
    Friends(Vec<ProfileSummary>),
    Post(PostDetail),
    Search(Vec<ProfileSummary>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteRender {
    Redirect(Route),
    Page(PageData),
    /// The application error page.
    Error(LoaderError),
    NotFound,
}

pub struct Navigator<T> {
    api: ApiClient<T>,
    current: RefCell<Route>,
    scope: RefCell<RequestScope>,
    generation: Cell<u64>,
}

impl<T: HttpTransport> Navigator<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            current: RefCell::new(Route::Landing),
            scope: RefCell::new(RequestScope::new()),
            generation: Cell::new(0),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// The last route entered, after redirects.
    pub fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    /// Enter `route`. Returns `None` when a later navigation superseded this
    /// one before its data arrived.
    pub async fn navigate<S: CredentialStore>(
        &self,
        ctx: &mut SessionContext<S>,
        route: Route,
    ) -> Option<RouteRender> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let scope = RequestScope::new();
        self.scope.replace(scope.clone()).cancel_all();

        if let GuardDecision::Redirect(target) = ctx.guard(&route) {
            tracing::debug!(from = %route, to = %target, "guard redirect");
            self.current.replace(target.clone());
            return Some(RouteRender::Redirect(target));
        }
        self.current.replace(route.clone());

        let token = ctx.bearer_token();
        let render = self.load(&scope, &route, token.as_deref()).await;
        if self.generation.get() != generation {
            tracing::debug!(%route, "navigation superseded");
            return None;
        }
        if render == Some(RouteRender::Redirect(Route::Login)) {
            // Stored token is missing or the server no longer accepts it.
            if let Err(err) = ctx.sign_out() {
                tracing::warn!(error = %err, "could not clear rejected session");
            }
            self.current.replace(Route::Login);
        }
        render
    }

    /// Re-run the current route's loader.
    pub async fn reload<S: CredentialStore>(&self, ctx: &mut SessionContext<S>) -> Option<RouteRender> {
        let route = self.current();
        self.navigate(ctx, route).await
    }

    /// Apply a mutation's navigation result. [`Navigation::ToAfter`] navigates
    /// immediately; the caller waits out the delay first.
    pub async fn follow<S: CredentialStore>(
        &self,
        ctx: &mut SessionContext<S>,
        navigation: Navigation,
    ) -> Option<RouteRender> {
        match navigation {
            Navigation::Stay => None,
            Navigation::Reload => self.reload(ctx).await,
            Navigation::To(route) | Navigation::ToAfter { route, .. } => self.navigate(ctx, route).await,
        }
    }

    /// Cancel whatever is in flight.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
        self.scope.borrow().cancel_all();
    }

    async fn load(&self, scope: &RequestScope, route: &Route, token: Option<&str>) -> Option<RouteRender> {
        let api = &self.api;
        let result = match route {
            Route::Landing => Ok(PageData::Landing),
            Route::Login => Ok(PageData::Login),
            Route::Register => Ok(PageData::Register),
            Route::AboutUs => Ok(PageData::AboutUs),
            Route::NotFound { path } => {
                tracing::debug!(%path, "no such route");
                return Some(RouteRender::NotFound);
            }
            Route::Feed => scope.run(loader::feed(api, token)).await.map(PageData::Feed),
            Route::Discover => scope.run(loader::discover(api, token)).await.map(PageData::Discover),
            Route::Profile { username } => scope
                .run(loader::profile(api, token, username))
                .await
                .map(|p| PageData::Profile(Some(p))),
            Route::Settings { username } => scope
                .run(loader::settings(api, token, username))
                .await
                .map(|s| PageData::Settings(Some(s))),
            Route::Friends { username } => scope
                .run(loader::friends(api, token, username))
                .await
                .map(PageData::Friends),
            Route::Post { post_id } => scope.run(loader::post(api, token, post_id)).await.map(PageData::Post),
            Route::Search { query } => scope.run(loader::search(api, token, query)).await.map(PageData::Search),
        };

        match result {
            Ok(page) => Some(RouteRender::Page(page)),
            Err(LoaderError::Cancelled) => None,
            Err(LoaderError::Unauthenticated) => Some(RouteRender::Redirect(Route::Login)),
            Err(err) => {
                tracing::warn!(%route, status = ?err.status(), error = %err, "load failed");
                Some(match FailurePolicy::for_route(route) {
                    FailurePolicy::ErrorPage => RouteRender::Error(err),
                    FailurePolicy::EmptyState => RouteRender::Page(empty_page(route)),
                })
            }
        }
    }
}

/// The empty state rendered for a failed load under [`FailurePolicy::EmptyState`].
fn empty_page(route: &Route) -> PageData {
    match route {
        Route::Profile { .. } => PageData::Profile(None),
        Route::Settings { .. } => PageData::Settings(None),
        Route::Friends { .. } => PageData::Friends(Vec::new()),
        Route::Search { .. } => PageData::Search(Vec::new()),
        Route::Feed => PageData::Feed(FeedPage::default()),
        Route::Discover => PageData::Discover(FeedPage::default()),
        Route::Landing | Route::Login | Route::Register | Route::AboutUs | Route::Post { .. } | Route::NotFound { .. } => {
            PageData::Landing
        }
    }
}
