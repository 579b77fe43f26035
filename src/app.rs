use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::*;
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::api::client::ApiClient;
use crate::components::search_bar::SearchBar;
use crate::config::ClientConfig;
use crate::models::post::{Role, User};
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::post_detail::PostDetailPage;
use crate::pages::search_results::SearchResultsPage;
use crate::session::{BrowserSessionStore, SessionContext};

/// API client carrying the current session's token.
///
/// Must be called under [`App`], which provides the config and session.
pub fn use_api_client() -> ApiClient {
    let config = expect_context::<ClientConfig>();
    let session = expect_context::<SessionContext>();
    ApiClient::new(config.api_base_url).with_token(session.token())
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ClientConfig::from_build_env());
    provide_context(SessionContext::new(Rc::new(BrowserSessionStore)));

    view! {
        <Title text="Blog"/>

        <Router>
            <NavBar/>
            <main>
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/search") view=SearchResultsPage/>
                    <Route path=path!("/posts/:id") view=PostDetailPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    view! {
        <nav class="top-nav">
            <a href="/" class="logo">"BlogLogo"</a>
            <SearchBar/>
            <div class="nav-auth">
                {move || {
                    if session.is_signed_in() {
                        view! { <UserMenu/> }.into_any()
                    } else {
                        view! { <a href="/login">"Log in"</a> }.into_any()
                    }
                }}
            </div>
        </nav>
    }
}

#[component]
fn UserMenu() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let user = session.user();
    let name = user.as_ref().map(|u| u.username.clone()).unwrap_or_default();
    let avatar = match user.as_ref().and_then(|u| u.profile_image.clone()) {
        Some(src) => view! { <img src=src class="avatar" /> }.into_any(),
        None => {
            let initial = user.as_ref().map(User::initial).unwrap_or_default();
            view! { <span class="avatar avatar-empty">{initial}</span> }.into_any()
        }
    };
    let badge = session
        .is_admin()
        .then(|| view! { <span class="role-badge">{Role::Admin.to_string()}</span> });

    view! {
        <span class="nav-user">{avatar} {name}</span>
        {badge}
        <button
            class="btn-logout"
            on:click=move |_| {
                session.end();
                navigate("/", Default::default());
            }
        >
            "Log out"
        </button>
    }
}
