//! # Auth Context
//!
//! The signed-in session, held in memory and mirrored to a
//! [`SessionStore`]. The request layer reads the bearer token from here
//! instead of from storage on every call.
//!
//! Every change (sign-in, token refresh, logout) bumps a generation counter
//! published on a `tokio::sync::watch` channel so the refresh scheduler can
//! re-plan.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::Account;
use tokio::sync::watch;

use lib_core::Result;

use crate::store::{MemoryStore, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

/// Tokens plus the account they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub account: Account,
}

impl From<shared::SignInResponse> for Session {
    fn from(response: shared::SignInResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            account: response.account,
        }
    }
}

pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    session: RwLock<Option<Session>>,
    generation: watch::Sender<u64>,
}

impl AuthContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            store,
            session: RwLock::new(None),
            generation,
        }
    }

    /// Context backed by a [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load a previously persisted session, if the store has a complete one.
    ///
    /// A store holding a token without a readable account is treated as
    /// signed out.
    pub fn restore(&self) -> Result<Option<Session>> {
        let access_token = self.store.get(ACCESS_TOKEN_KEY)?;
        let user = self.store.get(USER_KEY)?;

        let restored = match (access_token, user) {
            (Some(access_token), Some(user)) => match serde_json::from_str::<Account>(&user) {
                Ok(account) => Some(Session {
                    access_token,
                    refresh_token: self.store.get(REFRESH_TOKEN_KEY)?,
                    account,
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted user is unreadable; ignoring session");
                    None
                }
            },
            _ => None,
        };

        if let Some(session) = &restored {
            tracing::info!(account_id = %session.account.id, "Session restored");
            *self.session.write() = Some(session.clone());
            self.bump();
        }
        Ok(restored)
    }

    /// Replace the current session and persist it.
    pub fn sign_in(&self, session: Session) -> Result<()> {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token)?;
        match &session.refresh_token {
            Some(refresh_token) => self.store.set(REFRESH_TOKEN_KEY, refresh_token)?,
            None => self.store.remove(REFRESH_TOKEN_KEY)?,
        }
        self.store.set(USER_KEY, &serde_json::to_string(&session.account)?)?;

        tracing::info!(account_id = %session.account.id, "Signed in");
        *self.session.write() = Some(session);
        self.bump();
        Ok(())
    }

    /// Swap in refreshed tokens. A `None` refresh token keeps the old one.
    ///
    /// Ignored when nobody is signed in (a logout raced the refresh).
    pub fn update_tokens(&self, access_token: String, refresh_token: Option<String>) -> Result<()> {
        let mut guard = self.session.write();
        let Some(session) = guard.as_mut() else {
            tracing::debug!("Token update ignored: no active session");
            return Ok(());
        };

        self.store.set(ACCESS_TOKEN_KEY, &access_token)?;
        if let Some(refresh_token) = &refresh_token {
            self.store.set(REFRESH_TOKEN_KEY, refresh_token)?;
        }

        session.access_token = access_token;
        if refresh_token.is_some() {
            session.refresh_token = refresh_token;
        }
        drop(guard);

        self.bump();
        Ok(())
    }

    /// Forget the session and wipe the store.
    pub fn logout(&self) -> Result<()> {
        *self.session.write() = None;
        self.bump();
        self.store.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session.read().as_ref().and_then(|s| s.refresh_token.clone())
    }

    pub fn account(&self) -> Option<Account> {
        self.session.read().as_ref().map(|s| s.account.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.access_token().map(|token| format!("Bearer {}", token))
    }

    /// Receiver that changes whenever the session does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    fn bump(&self) {
        self.generation.send_modify(|generation| *generation = generation.wrapping_add(1));
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn account() -> Account {
        Account {
            id: "acc-1".to_string(),
            email: "staff@factory.vn".to_string(),
            username: None,
            first_name: Some("Lan".to_string()),
            last_name: None,
            phone_number: None,
            avatar_url: None,
            role: Role::WarehouseStaff,
            created_at: None,
        }
    }

    fn session() -> Session {
        Session {
            access_token: "access-1".to_string(),
            refresh_token: Some("refresh-1".to_string()),
            account: account(),
        }
    }

    #[test]
    fn test_sign_in_persists_and_restores() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let auth = AuthContext::new(Arc::clone(&store));
        auth.sign_in(session()).unwrap();
        assert_eq!(auth.bearer().as_deref(), Some("Bearer access-1"));

        let fresh = AuthContext::new(store);
        assert!(!fresh.is_authenticated());
        let restored = fresh.restore().unwrap().unwrap();
        assert_eq!(restored, session());
        assert_eq!(fresh.account().unwrap().id, "acc-1");
    }

    #[test]
    fn test_logout_clears_store_wholesale() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        store.set("unrelated", "x").unwrap();
        let auth = AuthContext::new(Arc::clone(&store));
        auth.sign_in(session()).unwrap();

        auth.logout().unwrap();
        assert!(auth.bearer().is_none());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get("unrelated").unwrap(), None);
    }

    #[test]
    fn test_update_tokens_keeps_refresh_token_when_not_rotated() {
        let auth = AuthContext::in_memory();
        auth.sign_in(session()).unwrap();

        auth.update_tokens("access-2".to_string(), None).unwrap();
        assert_eq!(auth.access_token().as_deref(), Some("access-2"));
        assert_eq!(auth.refresh_token().as_deref(), Some("refresh-1"));

        auth.update_tokens("access-3".to_string(), Some("refresh-2".to_string())).unwrap();
        assert_eq!(auth.refresh_token().as_deref(), Some("refresh-2"));
    }

    #[test]
    fn test_update_tokens_without_session_is_ignored() {
        let auth = AuthContext::in_memory();
        auth.update_tokens("access".to_string(), None).unwrap();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_restore_ignores_unreadable_user() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        store.set(ACCESS_TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{broken").unwrap();

        let auth = AuthContext::new(store);
        assert_eq!(auth.restore().unwrap(), None);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_changes_are_published() {
        let auth = AuthContext::in_memory();
        let mut rx = auth.subscribe();
        assert!(!rx.has_changed().unwrap());

        auth.sign_in(session()).unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        auth.logout().unwrap();
        assert!(rx.has_changed().unwrap());
    }
}
