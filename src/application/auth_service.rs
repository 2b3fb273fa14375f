// Auth service - Opaque bearer tokens with expiry
use chrono::{DateTime, TimeDelta, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

const TOKEN_LEN: usize = 48;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    Expired,
    #[error("token expiry out of range")]
    ExpiryOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Whole seconds until expiry, measured from `now`.
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Account {
    username: String,
    password: String,
    role: String,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    account: Account,
    ttl: TimeDelta,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl AuthService {
    pub fn new(username: &str, password: &str, role: &str, ttl: TimeDelta) -> Self {
        Self {
            account: Account {
                username: username.to_string(),
                password: password.to_string(),
                role: role.to_string(),
            },
            ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        self.login_at(username, password, Utc::now())
    }

    fn login_at(&self, username: &str, password: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        if username != self.account.username || password != self.account.password {
            tracing::warn!("Rejected login for {:?}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let principal = Principal {
            username: self.account.username.clone(),
            role: self.account.role.clone(),
        };
        let issued = self.issue(principal, now)?;
        tracing::info!("User logged in: {}", username);
        Ok(issued)
    }

    /// Swap a live token for a fresh one. The presented token is revoked.
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, AuthError> {
        self.refresh_at(token, Utc::now())
    }

    fn refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let principal = self.verify_at(token, now)?;
        tracing::info!("Token refreshed for {}", principal.username);
        let issued = self.issue(principal, now)?;
        self.sessions().remove(token);
        Ok(issued)
    }

    fn issue(&self, principal: Principal, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::ExpiryOutOfRange)?;
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut sessions = self.sessions();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(token.clone(), Session { principal, expires_at });

        Ok(IssuedToken {
            access_token: token,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let mut sessions = self.sessions();
        let session = sessions.get(token).ok_or(AuthError::InvalidToken)?;
        if session.expires_at <= now {
            sessions.remove(token);
            return Err(AuthError::Expired);
        }
        Ok(session.principal.clone())
    }

    /// Revoke `token`. Returns whether it was known.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions().remove(token).is_some()
    }
}
