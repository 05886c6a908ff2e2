//! Password authentication and the process-wide session
//!
//! `AuthSession` is the single owner of the signed-in state. It is shared by
//! clone, read by every request for its bearer token, and broadcasts
//! sign-in/sign-out to subscribers until they unsubscribe.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::http::RestClient;
use crate::{ClientError, ClientResult};

/// Buffered auth events per subscriber
const EVENT_CAPACITY: usize = 16;

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued by a successful password sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the backend only sent the latter
    fn stamp_expiry(mut self, now: i64) -> Self {
        if self.expires_at.is_none()
            && let Some(expires_in) = self.expires_in
        {
            self.expires_at = Some(now + expires_in);
        }
        self
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }

    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }
}

/// Auth state change
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    /// Session taken over from persisted storage
    Restored(Session),
    SignedOut,
}

#[derive(Debug)]
struct SessionInner {
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
}

/// Process-wide session object
#[derive(Debug, Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                current: RwLock::new(None),
                events,
            }),
        }
    }

    /// Current session, `None` when signed out or expired
    pub async fn current(&self) -> Option<Session> {
        self.inner
            .current
            .read()
            .await
            .as_ref()
            .filter(|s| !s.is_expired())
            .cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current().await.is_some()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.current().await.map(|s| s.access_token)
    }

    pub(crate) async fn set(&self, session: Session) {
        *self.inner.current.write().await = Some(session.clone());
        let _ = self.inner.events.send(AuthEvent::SignedIn(session));
    }

    /// Adopt a persisted session. Expired sessions are rejected.
    pub async fn restore(&self, session: Session) -> bool {
        if session.is_expired() {
            tracing::debug!("Persisted session expired, not restored");
            return false;
        }
        *self.inner.current.write().await = Some(session.clone());
        let _ = self.inner.events.send(AuthEvent::Restored(session));
        true
    }

    /// Drop the session; subscribers hear about it only if one existed
    pub async fn clear(&self) {
        let previous = self.inner.current.write().await.take();
        if previous.is_some() {
            let _ = self.inner.events.send(AuthEvent::SignedOut);
        }
    }

    /// Start listening for auth state changes
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.inner.events.subscribe(),
        }
    }
}

/// Live subscription to auth state changes; ends when dropped
#[derive(Debug)]
pub struct AuthSubscription {
    rx: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    /// Next event. Returns `None` once the session object is gone.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next event if one is already queued
    pub fn try_recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

// ========== Auth API ==========

impl RestClient {
    /// Sign in with email and password; the session becomes current.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = self
            .http()
            .post(self.url("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config().api_key)
            .json(&PasswordGrant { email, password });

        let response = request.send().await?;
        let session: Session = Self::handle_response(response)
            .await
            .map_err(|e| match e {
                ClientError::Api { message, .. } => ClientError::Auth(message),
                ClientError::Unauthorized(message) => ClientError::Auth(message),
                other => other,
            })?;
        let session = session.stamp_expiry(chrono::Utc::now().timestamp());

        tracing::info!(email, "Signed in");
        self.session().set(session.clone()).await;
        Ok(session)
    }

    /// Revoke the session remotely and forget it locally.
    ///
    /// The local session is cleared even when the remote call fails.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let Some(token) = self.session().access_token().await else {
            self.session().clear().await;
            return Ok(());
        };

        let result = async {
            let response = self
                .http()
                .post(self.url("auth/v1/logout"))
                .header("apikey", &self.config().api_key)
                .bearer_auth(&token)
                .send()
                .await?;
            Self::handle_empty(response).await
        }
        .await;

        self.session().clear().await;
        match &result {
            Ok(()) => tracing::info!("Signed out"),
            Err(e) => tracing::warn!("Remote sign-out failed: {}", e),
        }
        result
    }

    pub async fn get_session(&self) -> Option<Session> {
        self.session().current().await
    }

    pub fn on_auth_state_change(&self) -> AuthSubscription {
        self.session().subscribe()
    }
}
