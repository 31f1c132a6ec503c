//! The authenticated-session value held by [`SessionStore`](super::store::SessionStore).
//!
//! DESIGN
//! ======
//! Fields are private so the invariants hold for every value in circulation:
//! `authenticated` is derived from the other fields, and identity never
//! outlives the credential (no token ⇒ no user, no email).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("login token must not be empty")]
    EmptyToken,
    #[error("login user must have a username")]
    EmptyUsername,
}

/// Current authentication state of the browser user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    token: Option<String>,
    user: Option<User>,
    email: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Session {
    /// Assemble a session from raw parts, normalizing blanks to absent.
    pub fn from_parts(token: Option<String>, user: Option<User>, email: Option<String>) -> Self {
        let Some(token) = non_blank(token) else {
            return Self::default();
        };
        let email = non_blank(email);
        let authenticated = user.is_some() || email.is_some();
        Self { authenticated, token: Some(token), user, email }
    }

    /// A logged-in session for `user`, with `email` derived from the user record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for a blank token and
    /// [`SessionError::EmptyUsername`] for a user without a username.
    pub fn signed_in(token: &str, user: User) -> Result<Self, SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if user.username.trim().is_empty() {
            return Err(SessionError::EmptyUsername);
        }
        let email = user.email.clone();
        Ok(Self::from_parts(Some(token.to_owned()), Some(user), email))
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Whether the session holds a credential whose user record still needs
    /// to be fetched from the backend.
    pub fn needs_hydration(&self) -> bool {
        self.token.is_some() && !self.user.as_ref().is_some_and(User::has_identity)
    }
}
