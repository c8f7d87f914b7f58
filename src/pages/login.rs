//! Login Page

use crm_core::api::LoginArgs;
use crm_core::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::context::use_session;

pub const MSG_MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const MSG_BAD_CREDENTIALS: &str = "Your email or password is incorrect.";
pub const MSG_UNREACHABLE: &str = "Unable to reach server. Please try again.";

/// Inline message for a failed login
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => MSG_BAD_CREDENTIALS.to_string(),
        ApiError::Status { status: 400 | 403, .. } => MSG_BAD_CREDENTIALS.to_string(),
        ApiError::Network(_) => MSG_UNREACHABLE.to_string(),
        other => other.user_message(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let company = move || session.tenant.with(|t| t.branding.company_name.clone());
    let logo = move || session.tenant.with(|t| t.branding.logo.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some(MSG_MISSING_CREDENTIALS.to_string()));
            return;
        }

        error.set(None);
        busy.set(true);
        let api = session.api();
        spawn_local(async move {
            let args = LoginArgs { email: &email_value, password: &password_value };
            match api.login(&args).await {
                Ok(response) => {
                    info!("[Login] Success for {}", email_value);
                    password.set(String::new());
                    session.login(response);
                }
                Err(e) => {
                    warn!("[Login] Failed: {}", e);
                    error.set(Some(login_error_message(&e)));
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit novalidate>
                {move || match logo() {
                    Some(src) => view! { <img class="login-logo" src=src alt=company() /> }.into_any(),
                    None => view! { <h1 class="login-title">{company()}</h1> }.into_any(),
                }}
                <p class="login-subtitle">"Sign in to your account"</p>
                {move || error.get().map(|message| view! { <div class="form-error" role="alert">{message}</div> })}
                <label class="form-field">
                    <span class="form-label">"Email"</span>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-label">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(login_error_message(&ApiError::Unauthorized), MSG_BAD_CREDENTIALS);
        assert_eq!(login_error_message(&ApiError::Network("offline".into())), MSG_UNREACHABLE);
        let server = ApiError::Status { status: 500, message: "Internal error".into() };
        assert_eq!(login_error_message(&server), "Internal error");
    }
}
