//! Reversible password encryption for admin-assisted credential recovery.
//!
//! Generated member passwords are stored twice: as an Argon2id hash for
//! login verification, and as an AES-256-GCM ciphertext an admin can decrypt
//! back to plaintext. The ciphertext is encoded as `base64(nonce || body)`
//! with a fresh random 12-byte nonce per encryption.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::CoreError;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Decode a base64-encoded 256-bit key (e.g. from `PASSWORD_ENCRYPTION_KEY`).
pub fn key_from_base64(encoded: &str) -> Result<[u8; 32], CoreError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| CoreError::Internal(format!("Invalid encryption key encoding: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| CoreError::Internal("Encryption key must be 32 bytes".into()))
}

/// Encrypt a plaintext password, returning `base64(nonce || ciphertext)`.
pub fn encrypt_password(key: &[u8; 32], plaintext: &str) -> Result<String, CoreError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CoreError::Internal(format!("Password encryption failed: {e}")))?;

    let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Decrypt a `base64(nonce || ciphertext)` password back to plaintext.
pub fn decrypt_password(key: &[u8; 32], encoded: &str) -> Result<String, CoreError> {
    let combined = BASE64
        .decode(encoded)
        .map_err(|e| CoreError::Internal(format!("Invalid ciphertext encoding: {e}")))?;

    if combined.len() < NONCE_LEN {
        return Err(CoreError::Internal("Ciphertext too short".into()));
    }
    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|e| CoreError::Internal(format!("Password decryption failed: {e}")))?;

    String::from_utf8(plaintext)
        .map_err(|e| CoreError::Internal(format!("Decrypted password is not UTF-8: {e}")))
}
