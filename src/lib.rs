//! # readia-client
//!
//! Browser-side data access and session layer for the Readia book-review app.
//!
//! The crate owns the authenticated session (`state::session`), the REST
//! helpers that talk to the API (`net`), the storage abstraction the session
//! persists through (`util::storage`), and the Leptos glue that exposes the
//! session to UI code (`util::auth`). Browser-only behavior is gated behind
//! the `hydrate` feature; native builds (tests, SSR) fall back to no-ops.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// Install the browser console logger and panic hook.
///
/// Safe to call more than once; only the first call takes effect.
#[cfg(feature = "hydrate")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);
}
