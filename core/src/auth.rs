//! User registration and credential verification.
//!
//! Users live in the `users` collection as a JSON array; email is the
//! unique key (case-sensitive exact match). The signup read-modify-write
//! runs under a per-collection mutex held for the whole load-mutate-save
//! cycle so concurrent signups cannot lose records.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::password;
use crate::store::{RecordStore, StoreError};

/// Collection name for user records.
const USERS_COLLECTION: &str = "users";

/// Errors from signup and login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required signup field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Another user already registered this email.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Store write failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A registered user record. Immutable once created; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// The authenticated identity attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Registration and login over the `users` collection.
#[derive(Debug)]
pub struct CredentialManager {
    store: RecordStore,
    // Held across the whole load-mutate-save cycle of a signup.
    write_lock: Mutex<()>,
}

impl CredentialManager {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new user.
    ///
    /// Fails with [`AuthError::MissingField`] if any field is empty after
    /// trimming, and [`AuthError::DuplicateEmail`] if the email is already
    /// registered.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.trim().is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut users: Vec<User> = self.store.load(USERS_COLLECTION);
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        users.push(User {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password::hash(password),
        });
        self.store.save(USERS_COLLECTION, &users)?;
        tracing::info!("registered user {email}");
        Ok(())
    }

    /// Verify credentials and return the identity to attach to a session.
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let users: Vec<User> = self.store.load(USERS_COLLECTION);
        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity {
            name: user.name.clone(),
            email: user.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manager() -> (tempfile::TempDir, CredentialManager) {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().to_path_buf()).unwrap();
        (tmp, CredentialManager::new(store))
    }

    #[test]
    fn signup_then_login_returns_identity() {
        let (_tmp, manager) = manager();
        manager.signup("Asha", "a@x.com", "pw123").unwrap();

        let identity = manager.login("a@x.com", "pw123").unwrap();
        assert_eq!(
            identity,
            Identity {
                name: "Asha".to_string(),
                email: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (_tmp, manager) = manager();
        manager.signup("Asha", "a@x.com", "pw123").unwrap();

        let err = manager.signup("Asha2", "a@x.com", "pw456").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let (_tmp, manager) = manager();
        assert!(matches!(
            manager.signup("", "a@x.com", "pw"),
            Err(AuthError::MissingField("name"))
        ));
        assert!(matches!(
            manager.signup("Asha", "  ", "pw"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            manager.signup("Asha", "a@x.com", ""),
            Err(AuthError::MissingField("password"))
        ));
        assert!(matches!(
            manager.signup("Asha", "a@x.com", "   "),
            Err(AuthError::MissingField("password"))
        ));
    }

    #[test]
    fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (_tmp, manager) = manager();
        manager.signup("Asha", "a@x.com", "pw123").unwrap();

        let wrong_password = manager.login("a@x.com", "pw456").unwrap_err();
        let unknown_email = manager.login("b@x.com", "pw123").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[test]
    fn email_match_is_case_sensitive() {
        let (_tmp, manager) = manager();
        manager.signup("Asha", "a@x.com", "pw123").unwrap();

        // A differently-cased email is a different key.
        manager.signup("Asha", "A@x.com", "pw123").unwrap();
        assert!(matches!(
            manager.login("A@X.COM", "pw123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn users_survive_manager_restart() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().to_path_buf()).unwrap();
        CredentialManager::new(store.clone())
            .signup("Asha", "a@x.com", "pw123")
            .unwrap();

        let manager = CredentialManager::new(store);
        assert!(manager.login("a@x.com", "pw123").is_ok());
    }

    #[test]
    fn password_is_not_stored_in_clear() {
        let (tmp, manager) = manager();
        manager.signup("Asha", "a@x.com", "pw123").unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("users.json")).unwrap();
        assert!(raw.contains("passwordHash"));
        assert!(!raw.contains("pw123"));
    }
}
