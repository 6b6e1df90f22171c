use std::fmt;

use zeroize::Zeroize;

use crate::error::{Error, Result};

pub const KEY_LEN: usize = 32;

/// Environment variable holding the master key.
pub const MASTER_KEY_ENV: &str = "ACCESSDESK_MASTER_KEY";

/// Master key for the settings file. Wiped from memory on drop.
#[derive(Clone)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| Error::InvalidKey)?;
        Ok(Self(key))
    }

    /// Reads the raw key from `var`. Unset, empty or wrongly sized values
    /// disable encryption rather than failing.
    #[must_use]
    pub fn from_env(var: &str) -> Option<Self> {
        let value = std::env::var(var).ok().filter(|v| !v.is_empty())?;
        match Self::from_bytes(value.as_bytes()) {
            Ok(key) => Some(key),
            Err(_) => {
                tracing::warn!("{var} is set but is not {KEY_LEN} bytes; encryption disabled");
                None
            }
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_requires_exact_length() {
        assert!(MasterKey::from_bytes(&[1u8; 32]).is_ok());
        assert!(matches!(
            MasterKey::from_bytes(&[1u8; 31]),
            Err(Error::InvalidKey)
        ));
        assert!(matches!(
            MasterKey::from_bytes(&[1u8; 33]),
            Err(Error::InvalidKey)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = MasterKey::from_bytes(b"0123456789abcdef0123456789abcdef").unwrap();
        assert_eq!(format!("{key:?}"), "MasterKey(..)");
    }
}
