//! Networking modules for the Readia REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the JSON schema shared
//! with the backend.

pub mod api;
pub mod types;
