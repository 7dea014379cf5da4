use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    core::errors::AppResult,
    providers::supabase::SupabaseClient,
    security::keyring,
};

/// An authenticated owner session issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_email: String,
    pub expires_at: DateTime<Utc>,
}

/// Holds the current session and broadcasts session-changed events.
///
/// The editor subscribes via [`SessionStore::subscribe`] and gates writes on
/// the latest value; sign-in and sign-out are the only writers.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    pub async fn sign_in(
        &self,
        client: &SupabaseClient,
        email: &str,
        password: &str,
    ) -> AppResult<Session> {
        let session = client.sign_in(email, password).await?;
        if !session.refresh_token.is_empty() {
            // Persisting the token is best-effort; the live session stands
            // even when the keyring is unavailable.
            if let Err(err) = keyring::store_refresh_token(&session.refresh_token) {
                tracing::warn!(error = %err, "could not persist refresh token");
            }
        }
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Restores a session from the persisted refresh token, if any. Absence or
    /// a stale token is not an error; the caller just stays signed out.
    pub async fn restore(&self, client: &SupabaseClient) -> Option<Session> {
        let token = keyring::load_refresh_token().ok()?;
        match client.refresh_session(&token).await {
            Ok(session) => {
                if !session.refresh_token.is_empty() {
                    let _ = keyring::store_refresh_token(&session.refresh_token);
                }
                self.tx.send_replace(Some(session.clone()));
                Some(session)
            }
            Err(err) => {
                tracing::debug!(error = %err, "persisted session could not be refreshed");
                None
            }
        }
    }

    /// The local session is always cleared, even when the remote revocation
    /// call fails.
    pub async fn sign_out(&self, client: &SupabaseClient) -> AppResult<()> {
        let current = self.current();
        self.tx.send_replace(None);
        let _ = keyring::clear_refresh_token();
        if let Some(session) = current {
            client.sign_out(&session.access_token).await?;
        }
        Ok(())
    }

    /// Direct setter for tests and for host shells that run their own auth UI.
    pub fn set(&self, session: Option<Session>) {
        self.tx.send_replace(session);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
