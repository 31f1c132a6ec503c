//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` is the plain value, `persist` maps it onto storage keys, and
//! `store` is the shared reactive holder UI code subscribes to.

pub mod persist;
pub mod session;
pub mod store;

pub use session::{Session, SessionError};
pub use store::{Hydration, SessionStore, Subscription};
