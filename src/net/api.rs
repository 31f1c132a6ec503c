//! REST API helpers for the Readia backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call fails with
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the API's `detail`
//! message when present, so pages can show it verbatim. Nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{Book, BookCreate, BookUpdate, Credentials, TokenResponse, User};
use crate::config::ApiConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

fn book_path(id: i64) -> String {
    format!("/books/{id}")
}

/// Pick the human-readable message out of an error response body.
///
/// Prefers a JSON `detail` field, then the raw body, then the status text.
fn error_detail(body: &str, status_text: &str) -> String {
    let body = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => return detail.clone(),
            Some(serde_json::Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }
    if body.is_empty() { status_text.to_owned() } else { body.to_owned() }
}

/// A body that could not be read is a transport failure, not an empty body.
#[cfg(any(test, feature = "hydrate"))]
fn body_text<E: std::fmt::Display>(read: Result<String, E>) -> Result<String, ApiError> {
    read.map_err(|e| ApiError::Network(e.to_string()))
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn request<B: Serialize + ?Sized>(
    method: Method,
    url: &str,
    token: Option<&str>,
    body: Option<&B>,
) -> Result<String, ApiError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder, RequestCredentials};

    let method = match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(url)
        .method(method)
        .header("Content-Type", "application/json")
        .credentials(RequestCredentials::Include);
    if let Some(token) = token {
        builder = builder.header("Authorization", &bearer_header(token));
    }
    let req = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let text = body_text(resp.text().await)?;
    if !resp.ok() {
        let status = resp.status();
        log::debug!("api: {url} failed with {status}");
        return Err(ApiError::Status { status, message: error_detail(&text, &resp.status_text()) });
    }
    Ok(text)
}

#[cfg(not(feature = "hydrate"))]
async fn request<B: Serialize + ?Sized>(
    method: Method,
    url: &str,
    token: Option<&str>,
    body: Option<&B>,
) -> Result<String, ApiError> {
    let _ = (method, url, token, body);
    Err(ApiError::Unavailable)
}

/// Register a new account via `POST /auth/register`.
///
/// # Errors
///
/// Returns an error if the request fails, the username is taken (409), or
/// the response is not a user record.
pub async fn register_user(config: &ApiConfig, credentials: &Credentials) -> Result<User, ApiError> {
    let body = request(Method::Post, &config.endpoint("/auth/register"), None, Some(credentials)).await?;
    decode_body(&body)
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// # Errors
///
/// Returns an error if the request fails or the credentials are rejected (401).
pub async fn login_user(config: &ApiConfig, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
    let body = request(Method::Post, &config.endpoint("/auth/login"), None, Some(credentials)).await?;
    decode_body(&body)
}

/// Fetch the user the bearer `token` belongs to from `GET /auth/profile`.
///
/// # Errors
///
/// Returns an error if the request fails, the token is rejected, or the body
/// does not match the user shape.
pub async fn fetch_profile(config: &ApiConfig, token: &str) -> Result<User, ApiError> {
    let body = request::<()>(Method::Get, &config.endpoint("/auth/profile"), Some(token), None).await?;
    decode_body(&body)
}

/// List the current user's books from `GET /books/`.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not a list of books.
pub async fn list_books(config: &ApiConfig, token: Option<&str>) -> Result<Vec<Book>, ApiError> {
    let body = request::<()>(Method::Get, &config.endpoint("/books/"), token, None).await?;
    decode_body(&body)
}

/// Create a book via `POST /books/`.
///
/// # Errors
///
/// Returns an error if the request fails or the created book cannot be decoded.
pub async fn create_book(config: &ApiConfig, token: Option<&str>, book: &BookCreate) -> Result<Book, ApiError> {
    let body = request(Method::Post, &config.endpoint("/books/"), token, Some(book)).await?;
    decode_body(&body)
}

/// Apply a partial update via `PUT /books/{id}`.
///
/// # Errors
///
/// Returns an error if the request fails or the updated book cannot be decoded.
pub async fn update_book(
    config: &ApiConfig,
    token: Option<&str>,
    id: i64,
    changes: &BookUpdate,
) -> Result<Book, ApiError> {
    let body = request(Method::Put, &config.endpoint(&book_path(id)), token, Some(changes)).await?;
    decode_body(&body)
}

/// Delete a book via `DELETE /books/{id}`. The API answers 204 with no body.
///
/// # Errors
///
/// Returns an error if the request fails or the server responds with a non-OK status.
pub async fn delete_book(config: &ApiConfig, token: Option<&str>, id: i64) -> Result<(), ApiError> {
    request::<()>(Method::Delete, &config.endpoint(&book_path(id)), token, None).await?;
    Ok(())
}
