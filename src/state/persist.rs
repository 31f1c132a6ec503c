//! Mapping between [`Session`] and persisted storage keys.
//!
//! MIGRATION
//! =========
//! Older clients stored the bearer token under `accessToken`; current ones
//! use `token`. Reads prefer the current key and fall back to the legacy one.
//! Writes go to both so a rollback to an older client still finds the
//! session. Reading never rewrites storage.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use super::session::Session;
use crate::net::types::User;
use crate::util::storage::{KeyValueStorage, load_json, save_json};

pub const TOKEN_KEY: &str = "token";
pub const LEGACY_TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "currentUser";
pub const EMAIL_KEY: &str = "email";

/// Storage layouts for the bearer token, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKeyScheme {
    Legacy,
    Current,
}

impl TokenKeyScheme {
    /// Lookup order on read.
    pub const READ_ORDER: [Self; 2] = [Self::Current, Self::Legacy];
    /// Keys kept in sync on write. Drop `Legacy` once no deployed client reads it.
    pub const WRITE_SET: [Self; 2] = [Self::Current, Self::Legacy];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Legacy => LEGACY_TOKEN_KEY,
            Self::Current => TOKEN_KEY,
        }
    }
}

/// First non-blank token in [`TokenKeyScheme::READ_ORDER`].
fn read_token(storage: &dyn KeyValueStorage) -> Option<(String, TokenKeyScheme)> {
    TokenKeyScheme::READ_ORDER.into_iter().find_map(|scheme| {
        storage
            .get_item(scheme.key())
            .filter(|t| !t.trim().is_empty())
            .map(|t| (t, scheme))
    })
}

/// Rebuild the session from storage, or the default without one.
///
/// Read-only. A malformed `currentUser` degrades to "no user" without
/// affecting the token or email.
pub fn read_session(storage: Option<&dyn KeyValueStorage>) -> Session {
    let Some(storage) = storage else {
        return Session::default();
    };

    let token = read_token(storage).map(|(token, scheme)| {
        if scheme == TokenKeyScheme::Legacy {
            log::debug!("session: token found under legacy key {LEGACY_TOKEN_KEY}");
        }
        token
    });
    let user = load_json::<User>(storage, USER_KEY);
    let email = storage
        .get_item(EMAIL_KEY)
        .filter(|e| !e.is_empty())
        .or_else(|| user.as_ref().and_then(|u| u.email.clone()));

    Session::from_parts(token, user, email)
}

/// Mirror `session` into storage, removing keys for absent fields.
pub fn write_session(storage: &dyn KeyValueStorage, session: &Session) {
    match session.token() {
        Some(token) => {
            for scheme in TokenKeyScheme::WRITE_SET {
                storage.set_item(scheme.key(), token);
            }
        }
        None => {
            storage.remove_item(TOKEN_KEY);
            storage.remove_item(LEGACY_TOKEN_KEY);
        }
    }

    match session.user() {
        Some(user) => save_json(storage, USER_KEY, user),
        None => storage.remove_item(USER_KEY),
    }

    match session.email() {
        Some(email) => storage.set_item(EMAIL_KEY, email),
        None => storage.remove_item(EMAIL_KEY),
    }
}
