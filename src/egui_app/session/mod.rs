//! # Session State Holder
//!
//! Single source of truth for the signed-in account. The store is cheap to
//! clone; every clone shares the same state, storage and event channel.
//!
//! ## States
//!
//! - `Unauthenticated`
//! - `Authenticated(Session)` where a [`Session`] always holds both a
//!   non-empty token and a user
//!
//! ## Transitions
//!
//! | From            | To              | Trigger                              |
//! |-----------------|-----------------|--------------------------------------|
//! | Unauthenticated | Authenticated   | [`SessionStore::sign_in`]            |
//! | Authenticated   | Authenticated   | [`SessionStore::apply_role`], [`SessionStore::reconcile_user`] |
//! | Authenticated   | Unauthenticated | [`SessionStore::sign_out`]           |
//!
//! Each transition updates the in-memory state and the persisted record while
//! holding the state lock, so readers never see a half-applied change.
//! Subscribers get a [`SessionEvent`] after the transition is complete.

pub mod storage;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::shared::{Role, User};
pub use storage::{
    FileSessionStorage, MemorySessionStorage, SessionStorage, StorageError, StoredSession,
};

const EVENT_CAPACITY: usize = 32;

/// Authenticated session; token and user always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user asked to log out
    Logout,
    /// Some request came back 401
    Unauthorized,
    /// The stored session could not be verified at startup
    VerificationFailed,
}

/// Published after every completed transition
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(User),
    UserUpdated(User),
    SignedOut(SignOutReason),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session response is incomplete: {0}")]
    Incomplete(&'static str),
    #[error("no active session")]
    NotSignedIn,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct Inner {
    state: RwLock<SessionState>,
    storage: Box<dyn SessionStorage>,
    events: broadcast::Sender<SessionEvent>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Build the store from persisted state.
    ///
    /// A record is only restored when it holds both a non-empty token and a
    /// parseable user. Anything else is erased and the store starts
    /// unauthenticated.
    pub fn restore(storage: impl SessionStorage + 'static) -> Self {
        let state = match storage.load() {
            Ok(Some(StoredSession {
                token: Some(token),
                user: Some(user),
            })) if !token.is_empty() => {
                tracing::info!(user = %user.username, "Restored persisted session");
                SessionState::Authenticated(Session { token, user })
            }
            Ok(None) => SessionState::Unauthenticated,
            Ok(Some(_)) => {
                tracing::warn!("Discarding incomplete session record");
                Self::erase(&storage);
                SessionState::Unauthenticated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session record");
                Self::erase(&storage);
                SessionState::Unauthenticated
            }
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(state),
                storage: Box::new(storage),
                events,
            }),
        }
    }

    /// Empty store backed by process memory only
    pub fn in_memory() -> Self {
        Self::restore(MemorySessionStorage::new())
    }

    fn erase(storage: &dyn SessionStorage) {
        if let Err(e) = storage.clear() {
            tracing::error!(error = %e, "Failed to clear session storage");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read(), SessionState::Authenticated(_))
    }

    pub fn token(&self) -> Option<String> {
        self.read().session().map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().session().map(|s| s.user.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Establish a session from a successful login/register response.
    ///
    /// Replaces any previous session. On a storage failure the state is left
    /// untouched.
    pub fn sign_in(&self, token: String, user: User) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::Incomplete("token"));
        }
        if user.id.is_empty() {
            return Err(SessionError::Incomplete("user id"));
        }

        {
            let mut state = self.write();
            self.inner.storage.save(&StoredSession {
                token: Some(token.clone()),
                user: Some(user.clone()),
            })?;
            *state = SessionState::Authenticated(Session {
                token,
                user: user.clone(),
            });
        }

        tracing::info!(user = %user.username, role = %user.role, "Signed in");
        self.publish(SessionEvent::SignedIn(user));
        Ok(())
    }

    /// Optimistically change the role of the signed-in user.
    ///
    /// Only `role` is touched; the merged record is persisted.
    pub fn apply_role(&self, role: Role) -> Result<User, SessionError> {
        self.update_user(|user| user.role = role)
    }

    /// Replace the stored user with a server-provided record, keeping the token.
    pub fn reconcile_user(&self, fresh: User) -> Result<User, SessionError> {
        if fresh.id.is_empty() {
            return Err(SessionError::Incomplete("user id"));
        }
        self.update_user(move |user| *user = fresh)
    }

    fn update_user(&self, change: impl FnOnce(&mut User)) -> Result<User, SessionError> {
        let updated = {
            let mut state = self.write();
            let session = match &*state {
                SessionState::Authenticated(session) => session,
                SessionState::Unauthenticated => return Err(SessionError::NotSignedIn),
            };

            let mut user = session.user.clone();
            change(&mut user);
            let token = session.token.clone();

            self.inner.storage.save(&StoredSession {
                token: Some(token.clone()),
                user: Some(user.clone()),
            })?;
            *state = SessionState::Authenticated(Session {
                token,
                user: user.clone(),
            });
            user
        };

        tracing::debug!(user = %updated.username, role = %updated.role, "Session user updated");
        self.publish(SessionEvent::UserUpdated(updated.clone()));
        Ok(updated)
    }

    /// Tear the session down. Never fails: a storage error is logged and the
    /// in-memory state is cleared regardless.
    ///
    /// Storage is cleared even when no session is active. The `SignedOut`
    /// event is only published when one was. Returns whether a session was
    /// active.
    pub fn sign_out(&self, reason: SignOutReason) -> bool {
        let was_active = {
            let mut state = self.write();
            if let Err(e) = self.inner.storage.clear() {
                tracing::error!(error = %e, "Failed to clear persisted session");
            }
            let was_active = matches!(*state, SessionState::Authenticated(_));
            *state = SessionState::Unauthenticated;
            was_active
        };

        if was_active {
            tracing::info!(?reason, "Signed out");
            self.publish(SessionEvent::SignedOut(reason));
        }
        was_active
    }
}
