use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::rngs::OsRng;

use super::KEY_LEN;
use crate::error::{Error, Result};

const NONCE_LEN: usize = 12;

fn cipher(key: &[u8]) -> Result<ChaCha20Poly1305> {
    if key.len() != KEY_LEN {
        return Err(Error::InvalidKey);
    }
    ChaCha20Poly1305::new_from_slice(key).map_err(|_| Error::InvalidKey)
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(plaintext: &str, key: &[u8]) -> Result<String> {
    let cipher = cipher(key)?;
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| Error::Config(format!("encryption failed: {e}")))?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(envelope))
}

/// Decrypts an envelope produced by [`encrypt`].
///
/// Malformed input, a wrong key and tampered data all surface as
/// [`Error::DecryptionFailed`].
pub fn decrypt(envelope: &str, key: &[u8]) -> Result<String> {
    let cipher = cipher(key)?;

    let data = STANDARD
        .decode(envelope)
        .map_err(|_| Error::DecryptionFailed)?;
    if data.len() < NONCE_LEN {
        return Err(Error::DecryptionFailed);
    }

    let (nonce, ciphertext) = data.split_at(NONCE_LEN);
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| Error::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_round_trip() {
        for plaintext in ["", "sa", "p@ss w0rd!", "ünïcødé 🔑"] {
            let envelope = encrypt(plaintext, KEY).unwrap();
            assert_eq!(decrypt(&envelope, KEY).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let a = encrypt("same", KEY).unwrap();
        let b = encrypt("same", KEY).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_flipping_any_byte_fails() {
        let envelope = encrypt("secret-password", KEY).unwrap();
        let raw = STANDARD.decode(&envelope).unwrap();

        for i in 0..raw.len() {
            let mut tampered = raw.clone();
            tampered[i] ^= 0x01;
            let result = decrypt(&STANDARD.encode(&tampered), KEY);
            assert!(
                matches!(result, Err(Error::DecryptionFailed)),
                "byte {i} flip was not detected"
            );
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let envelope = encrypt("secret", KEY).unwrap();
        let other = [7u8; 32];
        assert!(matches!(
            decrypt(&envelope, &other),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_malformed_envelope_fails() {
        assert!(matches!(
            decrypt("not base64 at all!", KEY),
            Err(Error::DecryptionFailed)
        ));
        assert!(matches!(
            decrypt(&STANDARD.encode([1u8; 5]), KEY),
            Err(Error::DecryptionFailed)
        ));
        assert!(matches!(decrypt("", KEY), Err(Error::DecryptionFailed)));
    }

    #[test]
    fn test_key_length_checked_first() {
        for len in [0, 16, 31, 33, 64] {
            let key = vec![0u8; len];
            assert!(matches!(encrypt("x", &key), Err(Error::InvalidKey)));
            assert!(matches!(decrypt("garbage", &key), Err(Error::InvalidKey)));
        }
    }
}
