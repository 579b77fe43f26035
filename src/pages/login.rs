use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::app::use_api_client;
use crate::error::AppError;
use crate::session::{SessionContext, UserSession};

/// Message shown for a failed sign-in.
fn login_error_message(err: AppError) -> String {
    match err {
        AppError::Server { message, .. } => message,
        AppError::Network(_) => "Could not reach the server. Please try again.".to_string(),
        other => other.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    let api = use_api_client();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        pending.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match api.login(&email, &password).await {
                Ok(response) => {
                    session.begin(UserSession::from(response));
                    navigate("/", Default::default());
                }
                Err(e) => error.set(Some(login_error_message(e))),
            }
            pending.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <h2>"Sign in"</h2>
            {move || error.get().map(|msg| view! { <div class="alert alert-error">{msg}</div> })}
            <form on:submit=on_submit>
                <label>"Email"</label>
                <input
                    type="email"
                    required=true
                    placeholder="you@example.com"
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <label>"Password"</label>
                <input
                    type="password"
                    required=true
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
