//! Sign-in boundary.
//!
//! Identity verification happens behind the [`IdentityProvider`] trait; the
//! rest of the application only ever sees the resulting [`SessionContext`]
//! persisted in the store. Swapping in a real provider is a matter of
//! implementing the trait.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{JsonStore, StoreError, KEY_IS_LOGGED_IN, KEY_USERNAME};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("identity provider unavailable")]
    ProviderUnavailable,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// Types
// ============================================================================

/// What a user types at the prompt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(())
    }
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    pub username: String,
}

/// The signed-in state as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub username: String,
    pub logged_in: bool,
}

impl SessionContext {
    /// Loads the session from the store. Absent keys mean signed out.
    pub fn load(store: &JsonStore) -> Self {
        let logged_in: bool = store.get(KEY_IS_LOGGED_IN).unwrap_or(false);
        let username: String = store.get(KEY_USERNAME).unwrap_or_default();
        Self {
            username,
            logged_in,
        }
    }

    /// Persists a signed-in session.
    pub fn save(store: &JsonStore, username: &str) -> Result<(), StoreError> {
        store.set(KEY_IS_LOGGED_IN, &true)?;
        store.set(KEY_USERNAME, &username)
    }

    /// Removes the session keys, signing the user out.
    pub fn clear(store: &JsonStore) -> Result<(), StoreError> {
        store.remove(KEY_IS_LOGGED_IN)?;
        store.remove(KEY_USERNAME)
    }
}

/// Derives the name shown in greetings: the explicit display name when given,
/// otherwise the local part of the email address.
pub fn display_name(email: &str, name: Option<&str>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => email
            .split('@')
            .next()
            .unwrap_or(email)
            .to_string(),
    }
}

// ============================================================================
// IdentityProvider
// ============================================================================

/// Verifies credentials against some identity backend.
pub trait IdentityProvider {
    /// Signs an existing user in.
    fn sign_in(&self, credentials: &Credentials) -> Result<AuthEvent, AuthError>;

    /// Registers a new user and signs them in.
    fn sign_up(
        &self,
        credentials: &Credentials,
        name: Option<&str>,
    ) -> Result<AuthEvent, AuthError>;
}

/// Provider that accepts any well-formed credentials.
///
/// Stands in until a real backend is wired up; also used by tests.
pub struct MockIdentityProvider {
    should_fail: AtomicBool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            should_fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with `InvalidCredentials`.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn sign_in(&self, credentials: &Credentials) -> Result<AuthEvent, AuthError> {
        credentials.validate()?;
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthEvent {
            username: display_name(&credentials.email, None),
        })
    }

    fn sign_up(
        &self,
        credentials: &Credentials,
        name: Option<&str>,
    ) -> Result<AuthEvent, AuthError> {
        credentials.validate()?;
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthEvent {
            username: display_name(&credentials.email, name),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
