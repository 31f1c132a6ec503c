//! Reactive, storage-backed holder of the browser user's [`Session`].
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` is built by the composition root and handed to UI code
//! (see `util::auth::provide_session_store`). It is the single writer of the
//! persisted session keys; observers registered with [`SessionStore::subscribe`]
//! see every state in mutation order.
//!
//! Each mutation swaps the in-memory value, then mirrors it to storage, then
//! notifies observers, all before returning. Locks are released before any
//! observer or fetcher runs, so observers may call back into the store.
//! A mutation made from inside an observer is applied to memory and storage
//! at once, but its notification is queued behind the one in progress; the
//! outermost mutation delivers the queue in order before it returns.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping [`SessionStore::hydrate`] calls are not serialized: each one
//! that succeeds ends in `login`, and the last to finish wins. A hydration
//! that completes after a logout logs the user back in with the same token;
//! this drift is accepted rather than tracked.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::persist::{read_session, write_session};
use super::session::{Session, SessionError};
use crate::net::types::User;
use crate::util::storage::{SharedStorage, browser_storage};

type Observer = Arc<dyn Fn(&Session) + Send + Sync>;

struct Shared {
    storage: Option<SharedStorage>,
    session: Mutex<Session>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer_id: AtomicU64,
    dispatch: Mutex<Dispatch>,
}

/// Sessions awaiting delivery, and whether a delivery loop is running.
#[derive(Default)]
struct Dispatch {
    notifying: bool,
    pending: VecDeque<Session>,
}

impl Shared {
    fn is_registered(&self, id: u64) -> bool {
        self.observers.lock().iter().any(|(oid, _)| *oid == id)
    }
}

/// Outcome of [`SessionStore::hydrate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hydration {
    /// No credential to hydrate with.
    NoToken,
    /// The persisted user already has a backend id; no request was made.
    Trusted,
    /// The profile was fetched and the session re-logged-in with it.
    Refreshed,
    /// The fetch failed; the session is unchanged.
    Failed,
}

/// Cloneable handle to the shared session state.
#[derive(Clone)]
pub struct SessionStore {
    shared: Arc<Shared>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.shared.session.lock())
            .field("has_storage", &self.shared.storage.is_some())
            .field("observer_count", &self.shared.observers.lock().len())
            .finish()
    }
}

impl SessionStore {
    /// Build a store initialized from `storage`.
    ///
    /// `None` means no persistent storage exists in this context (SSR): the
    /// store starts logged out and never writes.
    pub fn new(storage: Option<SharedStorage>) -> Self {
        let session = read_session(storage.as_deref());
        log::debug!("session: initialized (authenticated={})", session.is_authenticated());
        Self {
            shared: Arc::new(Shared {
                storage,
                session: Mutex::new(session),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(0),
                dispatch: Mutex::new(Dispatch::default()),
            }),
        }
    }

    /// Build a store over the current context's storage (see [`browser_storage`]).
    pub fn from_browser() -> Self {
        Self::new(browser_storage())
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.shared.session.lock().clone()
    }

    /// Register `observer`; it is called right away with the current session
    /// and again after every mutation until the returned handle is used to
    /// unsubscribe.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let id = self.shared.next_observer_id.fetch_add(1, Ordering::Relaxed);
        let observer: Observer = Arc::new(observer);
        self.shared.observers.lock().push((id, Arc::clone(&observer)));
        observer(&self.session());
        Subscription { id, shared: Arc::downgrade(&self.shared) }
    }

    /// Replace the session with a logged-in one for `token` and `user`.
    ///
    /// # Errors
    ///
    /// Rejects a blank token or a user without a username; the session is
    /// left untouched in that case.
    pub fn login(&self, token: &str, user: User) -> Result<(), SessionError> {
        let next = Session::signed_in(token, user)?;
        log::debug!("session: login");
        self.replace(next);
        Ok(())
    }

    /// Replace the session with the logged-out default and clear storage.
    ///
    /// Idempotent; observers are notified on every call.
    pub fn logout(&self) {
        log::debug!("session: logout");
        self.replace(Session::default());
    }

    /// Best-effort repair of a session holding a token but no confirmed user.
    ///
    /// `fetch` is invoked with the bearer token only when the current user is
    /// missing or a placeholder (`id == 0`). A successful fetch logs in again
    /// with the same token; a failure is logged and leaves the session as-is.
    pub async fn hydrate<F, Fut, E>(&self, fetch: F) -> Hydration
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<User, E>>,
        E: fmt::Display,
    {
        let current = self.session();
        let Some(token) = current.token().map(str::to_owned) else {
            return Hydration::NoToken;
        };
        if !current.needs_hydration() {
            return Hydration::Trusted;
        }

        log::debug!("session: hydrating user profile");
        match fetch(token.clone()).await {
            Ok(user) => match self.login(&token, user) {
                Ok(()) => Hydration::Refreshed,
                Err(e) => {
                    log::warn!("session: hydration returned unusable user: {e}");
                    Hydration::Failed
                }
            },
            Err(e) => {
                log::warn!("session: hydration failed: {e}");
                Hydration::Failed
            }
        }
    }

    fn replace(&self, next: Session) {
        *self.shared.session.lock() = next.clone();
        if let Some(storage) = &self.shared.storage {
            write_session(storage.as_ref(), &next);
        }

        {
            let mut dispatch = self.shared.dispatch.lock();
            dispatch.pending.push_back(next);
            if dispatch.notifying {
                return;
            }
            dispatch.notifying = true;
        }
        loop {
            let next = {
                let mut dispatch = self.shared.dispatch.lock();
                match dispatch.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        dispatch.notifying = false;
                        break;
                    }
                }
            };
            self.notify(&next);
        }
    }

    fn notify(&self, session: &Session) {
        let observers: Vec<(u64, Observer)> = self.shared.observers.lock().clone();
        for (id, observer) in observers {
            // An earlier observer may have unsubscribed this one.
            if self.shared.is_registered(id) {
                observer(session);
            }
        }
    }
}

/// Handle returned by [`SessionStore::subscribe`].
///
/// Dropping the handle keeps the observer registered.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Stop delivering sessions to the observer.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.observers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
