use std::fmt;

use subtle::ConstantTimeEq;

/// Environment variable holding the admin password.
pub const ADMIN_PASSWORD_ENV: &str = "ACCESSDESK_ADMIN_PASSWORD";

/// The single admin password. When unset, authentication is disabled.
#[derive(Clone, Default)]
pub struct AdminPassword(Option<String>);

impl AdminPassword {
    #[must_use]
    pub fn new(password: Option<String>) -> Self {
        Self(password.filter(|p| !p.is_empty()))
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(ADMIN_PASSWORD_ENV).ok())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Checks a login attempt in constant time. Always succeeds when no
    /// password is configured.
    #[must_use]
    pub fn verify(&self, supplied: &str) -> bool {
        match &self.0 {
            Some(expected) => supplied.as_bytes().ct_eq(expected.as_bytes()).into(),
            None => true,
        }
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminPassword")
            .field(&if self.is_enabled() { "set" } else { "unset" })
            .finish()
    }
}
