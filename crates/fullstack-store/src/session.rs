//! # Session
//!
//! Who is signed in. Checkout only needs to ask one question of the session,
//! so that question is the [`SessionProvider`] trait; [`SessionState`] is
//! the in-memory answer used by the storefront.
//!
//! ## Sign-in Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sign-in Page                                         │
//! │                                                                         │
//! │  register(name, email, password, confirm)                               │
//! │     │ validate ──► email taken? ──► AccountExists                       │
//! │     ▼                                                                   │
//! │  argon2 hash ──► accounts[email] ──► signed in                          │
//! │                                                                         │
//! │  login(email, password)                                                 │
//! │     │ validate ──► unknown email / bad password ──► InvalidCredentials  │
//! │     ▼                                                                   │
//! │  argon2 verify ──► signed in                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Accounts live in memory only and vanish with the process.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

use fullstack_core::validation::{
    validate_customer_name, validate_email, validate_password, validate_password_confirmation,
};

use crate::error::{StoreError, StoreResult};

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub name: String,
    #[ts(as = "String")]
    pub signed_in_at: DateTime<Utc>,
}

/// Answers "who is signed in right now?".
pub trait SessionProvider {
    fn current_customer(&self) -> Option<Customer>;

    fn is_signed_in(&self) -> bool {
        self.current_customer().is_some()
    }
}

/// A registered account, keyed by lowercased email.
#[derive(Clone)]
struct Account {
    customer_id: String,
    name: String,
    email: String,
    password_hash: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("customer_id", &self.customer_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// In-memory session and account registry shared by every view.
///
/// Cloning yields another handle to the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    customer: Arc<RwLock<Option<Customer>>>,
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account and signs it in.
    ///
    /// ## Errors
    /// - Validation error for a missing name, a malformed email, a password
    ///   shorter than 6 characters, or a missing / mismatched confirmation
    /// - [`StoreError::AccountExists`] if the email is already registered
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> StoreResult<Customer> {
        let name = name.trim();
        let email = email.trim();
        validate_customer_name(name)?;
        validate_email(email)?;
        validate_password(password)?;
        validate_password_confirmation(password, confirm)?;

        let email = email.to_lowercase();
        if self.read_accounts().contains_key(&email) {
            return Err(StoreError::AccountExists { email });
        }

        let account = Account {
            customer_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.clone(),
            password_hash: hash_password(password)?,
        };

        // Re-checked under the write lock: another handle may have registered
        // the same email while we were hashing
        match self.write_accounts().entry(email) {
            Entry::Occupied(taken) => {
                return Err(StoreError::AccountExists {
                    email: taken.key().clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
            }
        }

        info!(customer_id = %account.customer_id, "Customer registered");
        Ok(self.start_session(&account))
    }

    /// Signs an existing account in.
    ///
    /// ## Errors
    /// - Validation error for a malformed email or a too-short password
    /// - [`StoreError::InvalidCredentials`] for an unknown email or a wrong
    ///   password
    pub fn login(&self, email: &str, password: &str) -> StoreResult<Customer> {
        let email = email.trim();
        validate_email(email)?;
        validate_password(password)?;

        let account = self.read_accounts().get(&email.to_lowercase()).cloned();
        let Some(account) = account else {
            warn!("Login attempted for an unknown email");
            return Err(StoreError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!(customer_id = %account.customer_id, "Login failed: wrong password");
            return Err(StoreError::InvalidCredentials);
        }

        Ok(self.start_session(&account))
    }

    /// Signs out. Returns the customer that was signed in, if any.
    pub fn sign_out(&self) -> Option<Customer> {
        let previous = self.write_customer().take();
        if let Some(customer) = &previous {
            info!(customer_id = %customer.id, "Customer signed out");
        }
        previous
    }

    /// Makes `account` the signed-in customer, replacing whoever was before.
    fn start_session(&self, account: &Account) -> Customer {
        let customer = Customer {
            id: account.customer_id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            signed_in_at: Utc::now(),
        };

        info!(customer_id = %customer.id, "Customer signed in");
        *self.write_customer() = Some(customer.clone());
        customer
    }

    // A poisoned lock still holds valid data; recover it

    fn write_customer(&self) -> RwLockWriteGuard<'_, Option<Customer>> {
        self.customer.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_accounts(&self) -> RwLockReadGuard<'_, HashMap<String, Account>> {
        self.accounts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_accounts(&self) -> RwLockWriteGuard<'_, HashMap<String, Account>> {
        self.accounts.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionProvider for SessionState {
    fn current_customer(&self) -> Option<Customer> {
        self.customer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> StoreResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fullstack_core::ValidationError;

    fn validation_message(result: StoreResult<Customer>) -> String {
        match result {
            Err(StoreError::Validation(err)) => err.to_string(),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_register_login_and_sign_out() {
        let session = SessionState::new();
        assert!(!session.is_signed_in());

        let registered = session
            .register(" Jane ", " Jane@Fullstack.rw ", "secret1", "secret1")
            .unwrap();
        assert_eq!(registered.email, "jane@fullstack.rw");
        assert_eq!(registered.name, "Jane");
        assert_eq!(session.current_customer(), Some(registered.clone()));

        // Another handle sees the same session
        let other_view = session.clone();
        assert!(other_view.is_signed_in());

        assert_eq!(session.sign_out(), Some(registered.clone()));
        assert!(!other_view.is_signed_in());
        assert_eq!(session.sign_out(), None);

        let logged_in = other_view.login("JANE@fullstack.rw", "secret1").unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert!(session.is_signed_in());
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let session = SessionState::new();
        session
            .register("Jane", "jane@fullstack.rw", "secret1", "secret1")
            .unwrap();
        session.sign_out();

        assert!(matches!(
            session.login("jane@fullstack.rw", "secret2"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            session.login("nobody@fullstack.rw", "secret1"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let session = SessionState::new();
        session
            .register("Jane", "jane@fullstack.rw", "secret1", "secret1")
            .unwrap();

        assert!(matches!(
            session.register("Other Jane", "JANE@fullstack.rw", "another1", "another1"),
            Err(StoreError::AccountExists { email }) if email == "jane@fullstack.rw"
        ));
    }

    #[test]
    fn test_register_form_messages() {
        let session = SessionState::new();

        assert_eq!(
            validation_message(session.register("", "jane@fullstack.rw", "secret1", "secret1")),
            "Name is required"
        );
        assert_eq!(
            validation_message(session.register("Jane", "", "secret1", "secret1")),
            "Email is required"
        );
        assert_eq!(
            validation_message(session.register("Jane", "jane", "secret1", "secret1")),
            "Email is invalid"
        );
        assert_eq!(
            validation_message(session.register("Jane", "jane@fullstack.rw", "", "")),
            "Password is required"
        );
        assert_eq!(
            validation_message(session.register("Jane", "jane@fullstack.rw", "abc", "abc")),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            validation_message(session.register("Jane", "jane@fullstack.rw", "secret1", "")),
            "Please confirm your password"
        );
        assert!(matches!(
            session.register("Jane", "jane@fullstack.rw", "secret1", "secret2"),
            Err(StoreError::Validation(ValidationError::PasswordMismatch))
        ));

        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_login_form_messages() {
        let session = SessionState::new();

        assert_eq!(
            validation_message(session.login("jane@fullstack.rw", "")),
            "Password is required"
        );
        assert_eq!(
            validation_message(session.login("jane@fullstack.rw", "12345")),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            validation_message(session.login("not-an-email", "secret1")),
            "Email is invalid"
        );
    }

    #[test]
    fn test_password_hash_is_not_the_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(!hash.contains("secret1"));
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(StoreError::PasswordHash(_))
        ));
    }
}
