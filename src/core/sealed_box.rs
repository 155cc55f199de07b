//! Sealed-box encryption for secret values.
//!
//! The remote store requires values to arrive pre-encrypted against its
//! published X25519 public key using the libsodium sealed-box construction
//! (anonymous sender, fresh ephemeral keypair per message). Plaintext never
//! transits in a form the transport layer could log, and sealing the same
//! value twice yields unrelated ciphertexts.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crypto_box::PublicKey;
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::error::{CryptoError, Result};

/// X25519 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Parse the store's base64-encoded public key.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPublicKey` if the input is not base64 or
/// does not decode to exactly 32 bytes.
pub fn parse_public_key(key_b64: &str) -> Result<PublicKey> {
    let bytes = BASE64
        .decode(key_b64.trim())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("invalid base64: {}", e)))?;

    let bytes: [u8; PUBLIC_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        CryptoError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LEN,
            bytes.len()
        ))
    })?;

    Ok(PublicKey::from(bytes))
}

/// Seal a plaintext value for the store's public key.
///
/// Generates a fresh ephemeral keypair per call, so the output is
/// intentionally non-deterministic. The returned ciphertext is base64
/// encoded for transport.
///
/// # Errors
///
/// Returns `CryptoError` if the public key is malformed or the primitive
/// rejects the input. Never falls back to plaintext.
pub fn seal(plaintext: &str, public_key_b64: &str) -> Result<String> {
    let public_key = parse_public_key(public_key_b64)?;

    let buffer = Zeroizing::new(plaintext.as_bytes().to_vec());
    let sealed = public_key
        .seal(&mut OsRng, &buffer)
        .map_err(|_| CryptoError::EncryptionFailed("sealed box rejected the input".to_string()))?;

    Ok(BASE64.encode(sealed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_box::SecretKey;

    fn test_keypair() -> (SecretKey, String) {
        let secret = SecretKey::generate(&mut OsRng);
        let public_b64 = BASE64.encode(secret.public_key().as_bytes());
        (secret, public_b64)
    }

    #[test]
    fn test_seal_round_trip() {
        let (secret, public_b64) = test_keypair();

        let ciphertext = seal("123456:ABC-telegram-token", &public_b64).unwrap();
        let sealed = BASE64.decode(ciphertext).unwrap();
        let opened = secret.unseal(&sealed).unwrap();

        assert_eq!(opened, b"123456:ABC-telegram-token");
    }

    #[test]
    fn test_sealing_twice_differs_but_both_decrypt() {
        let (secret, public_b64) = test_keypair();

        let first = seal("same plaintext", &public_b64).unwrap();
        let second = seal("same plaintext", &public_b64).unwrap();
        assert_ne!(first, second);

        for ciphertext in [first, second] {
            let sealed = BASE64.decode(ciphertext).unwrap();
            let opened = secret.unseal(&sealed).unwrap();
            assert_eq!(opened, b"same plaintext");
        }
    }

    #[test]
    fn test_multiline_plaintext() {
        let (secret, public_b64) = test_keypair();
        let key_material = "-----BEGIN KEY-----\nline1\nline2\n-----END KEY-----";

        let ciphertext = seal(key_material, &public_b64).unwrap();
        let sealed = BASE64.decode(ciphertext).unwrap();
        let opened = secret.unseal(&sealed).unwrap();

        assert_eq!(opened, key_material.as_bytes());
    }

    #[test]
    fn test_rejects_malformed_base64() {
        let err = seal("value", "!!not base64!!").unwrap_err();
        assert!(err.to_string().contains("invalid store public key"));
    }

    #[test]
    fn test_rejects_wrong_key_length() {
        let short = BASE64.encode([0u8; 16]);
        let err = seal("value", &short).unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }
}
