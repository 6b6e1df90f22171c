//! Authenticated encryption for the sensitive settings fields.
//!
//! Envelopes are standard base64 of `nonce || ciphertext || tag` so they can be
//! embedded directly in the JSON settings file.

mod cipher;
mod key;

pub use cipher::{decrypt, encrypt};
pub use key::{KEY_LEN, MASTER_KEY_ENV, MasterKey};
