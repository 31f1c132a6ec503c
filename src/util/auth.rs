//! Shared auth flow and Leptos wiring for the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `sign_in`/`sign_up` instead of talking to the API and the store
//! separately, and route components apply identical unauthenticated redirect
//! behavior through `install_unauth_redirect`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::ApiConfig;
use crate::net::api::{self, ApiError};
use crate::net::types::{Credentials, User};
use crate::state::{Session, SessionError, SessionStore, Subscription};

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Log in with `credentials` and record the result in `store`.
///
/// When the profile lookup after a successful login fails, a placeholder
/// user is stored so that a later `SessionStore::hydrate` can complete it.
///
/// # Errors
///
/// Returns an error if the login request fails or the API hands back an
/// empty token.
pub async fn sign_in(
    store: &SessionStore,
    config: &ApiConfig,
    credentials: &Credentials,
) -> Result<(), AuthFlowError> {
    let token = api::login_user(config, credentials).await?;
    let profile = api::fetch_profile(config, &token.access_token).await;
    let user = profile_or_placeholder(profile, &credentials.username);
    store.login(&token.access_token, user)?;
    Ok(())
}

/// The fetched profile, or a placeholder for `username` awaiting hydration.
fn profile_or_placeholder(profile: Result<User, ApiError>, username: &str) -> User {
    match profile {
        Ok(user) => user,
        Err(e) => {
            log::warn!("auth: profile lookup after login failed: {e}");
            User::placeholder(username)
        }
    }
}

/// Register a new account, then sign in with the same credentials.
///
/// # Errors
///
/// Returns an error if registration or the follow-up sign-in fails.
pub async fn sign_up(
    store: &SessionStore,
    config: &ApiConfig,
    credentials: &Credentials,
) -> Result<User, AuthFlowError> {
    let user = api::register_user(config, credentials).await?;
    sign_in(store, config, credentials).await?;
    Ok(user)
}

/// Make `store` available to descendant components.
pub fn provide_session_store(store: SessionStore) {
    provide_context(store);
}

/// The store provided by an ancestor, if any.
pub fn use_session_store() -> Option<SessionStore> {
    use_context::<SessionStore>()
}

/// Mirror `store` into a signal for reactive rendering.
///
/// The signal stops updating once the returned subscription is unsubscribed.
pub fn session_signal(store: &SessionStore) -> (RwSignal<Session>, Subscription) {
    let signal = RwSignal::new(store.session());
    let sub = store.subscribe(move |session| {
        let _ = signal.try_set(session.clone());
    });
    (signal, sub)
}

pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.is_authenticated()
}

/// Redirect to `/login` whenever the session is not authenticated.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if session.with(should_redirect_unauth) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Run `SessionStore::hydrate` against `/auth/profile` on the local executor.
#[cfg(feature = "hydrate")]
pub fn spawn_hydration(store: SessionStore, config: ApiConfig) {
    leptos::task::spawn_local(async move {
        let outcome = store
            .hydrate(move |token| async move { api::fetch_profile(&config, &token).await })
            .await;
        log::debug!("session: hydration finished: {outcome:?}");
    });
}
