//! Wire DTOs for the Readia REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the API's JSON so serde stays lossless. Users are
//! identified by `username`; `email` is optional and only present when the
//! backend supplies it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by `/auth/register` and `/auth/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id. `0` marks a placeholder awaiting hydration.
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// A user record built before the backend confirmed the profile.
    pub fn placeholder(username: &str) -> Self {
        Self { id: 0, username: username.to_owned(), email: None }
    }

    /// Whether this record carries a real backend identifier.
    pub fn has_identity(&self) -> bool {
        self.id != 0
    }
}

/// Body for `/auth/register` and `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful `/auth/login` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// A reviewed book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub is_recommended: Option<bool>,
    /// ISO date the book was read.
    #[serde(default)]
    pub read_on: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /books/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BookCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommended: Option<bool>,
}

/// Partial body for `PUT /books/{id}`; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_on: Option<String>,
}
