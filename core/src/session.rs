//! Session gate: opaque token → authenticated identity.
//!
//! Sessions are process-local and never persisted. Each token is a UUID
//! v4; an entry is dropped on explicit destroy or when its TTL elapses
//! (checked lazily on lookup).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::auth::Identity;

/// How long a session stays valid after login.
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct Session {
    identity: Identity,
    expires_at: Instant,
}

/// In-memory session store keyed by opaque client tokens.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a custom TTL (used by tests).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Attach an identity to a fresh session and return its token.
    pub fn insert(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            identity,
            expires_at: Instant::now() + self.ttl,
        };
        self.lock().insert(token.clone(), session);
        token
    }

    /// Look up the identity for a token, dropping it if expired.
    pub fn identity(&self, token: &str) -> Option<Identity> {
        let mut sessions = self.lock();
        match sessions.get(token) {
            Some(session) if session.expires_at > Instant::now() => {
                Some(session.identity.clone())
            }
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Clear a session. Idempotent; unknown tokens are a no-op.
    pub fn destroy(&self, token: &str) {
        self.lock().remove(token);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity() -> Identity {
        Identity {
            name: "Asha".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn insert_then_lookup() {
        let sessions = SessionStore::new();
        let token = sessions.insert(identity());
        assert_eq!(sessions.identity(&token), Some(identity()));
    }

    #[test]
    fn unknown_token_is_anonymous() {
        let sessions = SessionStore::new();
        assert_eq!(sessions.identity("nope"), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let sessions = SessionStore::new();
        let token = sessions.insert(identity());

        sessions.destroy(&token);
        assert_eq!(sessions.identity(&token), None);
        sessions.destroy(&token);
        sessions.destroy("never-existed");
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let sessions = SessionStore::new();
        let a = sessions.insert(identity());
        let b = sessions.insert(identity());
        assert_ne!(a, b);
    }

    #[test]
    fn expired_sessions_are_dropped_on_lookup() {
        let sessions = SessionStore::with_ttl(Duration::from_millis(0));
        let token = sessions.insert(identity());
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(sessions.identity(&token), None);
    }
}
