use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

const TOKEN_BYTES: usize = 32;
const SESSION_TTL_HOURS: i64 = 8;

/// In-memory login sessions keyed by opaque token.
///
/// Sessions do not survive a restart. Expired entries are dropped the first
/// time they are looked up; there is no background sweep.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(SESSION_TTL_HOURS))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a new random token valid for the session TTL.
    pub fn create(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.write().insert(token.clone(), Utc::now() + self.ttl);
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        let Some(expires_at) = self.read().get(token).copied() else {
            return false;
        };

        if Utc::now() < expires_at {
            return true;
        }

        let mut sessions = self.write();
        if sessions.get(token).is_some_and(|exp| *exp <= Utc::now()) {
            sessions.remove(token);
        }
        false
    }

    pub fn delete(&self, token: &str) {
        self.write().remove(token);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_valid() {
        let sessions = SessionStore::new();
        let token = sessions.create();
        assert!(sessions.is_valid(&token));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_token_is_url_safe_and_unique() {
        let sessions = SessionStore::new();
        let a = sessions.create();
        let b = sessions.create();

        assert_ne!(a, b);
        assert_eq!(URL_SAFE_NO_PAD.decode(&a).unwrap().len(), TOKEN_BYTES);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        let sessions = SessionStore::new();
        assert!(!sessions.is_valid("nope"));
        assert!(!sessions.is_valid(""));
    }

    #[test]
    fn test_expired_session_is_evicted() {
        let sessions = SessionStore::with_ttl(Duration::zero());
        let token = sessions.create();

        assert!(!sessions.is_valid(&token));
        assert!(sessions.is_empty());
        assert!(!sessions.is_valid(&token));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let sessions = SessionStore::new();
        let token = sessions.create();

        sessions.delete(&token);
        assert!(!sessions.is_valid(&token));
        sessions.delete(&token);
        sessions.delete("never-existed");
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_concurrent_create_and_validate() {
        let sessions = std::sync::Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sessions = sessions.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let token = sessions.create();
                        assert!(sessions.is_valid(&token));
                        sessions.delete(&token);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(sessions.is_empty());
    }
}
