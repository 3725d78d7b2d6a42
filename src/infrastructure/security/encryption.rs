//! Symmetric encryption for clipboard entry content.
//!
//! Keys are derived from a user password with scrypt over a fixed salt, so
//! the same password always yields the same key. Each entry gets a fresh
//! random nonce, stored hex-encoded alongside the base64 ciphertext.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use scrypt::Params;

// Fixed KDF salt; changing it invalidates every stored ciphertext.
const KEY_SALT: &[u8] = b"salt";

// scrypt cost parameters: N = 2^14, r = 8, p = 1
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Ciphertext plus the per-entry nonce, both in storable text form.
#[derive(Debug, Clone)]
pub struct EncryptedText {
    /// Base64-encoded ciphertext (including the GCM tag)
    pub ciphertext: String,
    /// Hex-encoded nonce
    pub iv: String,
}

/// Derive a 32-byte AES key from a password.
///
/// Deterministic: the same password always produces the same key.
pub fn derive_key(password: &str) -> Result<[u8; 32]> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 32)
        .map_err(|e| anyhow!("Invalid scrypt parameters: {}", e))?;
    let mut key = [0u8; 32];
    scrypt::scrypt(password.as_bytes(), KEY_SALT, &params, &mut key)
        .map_err(|e| anyhow!("Key derivation failed: {}", e))?;
    Ok(key)
}

struct Encryptor {
    cipher: Aes256Gcm,
}

impl Encryptor {
    fn from_key(key: &[u8; 32]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key);
        let cipher = Aes256Gcm::new(key);
        Self { cipher }
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| anyhow!("Failed to encrypt: {}", e))?;
        Ok((ciphertext, nonce.to_vec()))
    }

    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != NONCE_LEN {
            return Err(anyhow!("Invalid nonce length"));
        }
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| anyhow!("Failed to decrypt: invalid password or corrupt data"))
    }
}

/// Encrypt text with a password-derived key and a fresh random nonce.
pub fn encrypt_text(plaintext: &str, password: &str) -> Result<EncryptedText> {
    let key = derive_key(password)?;
    let encryptor = Encryptor::from_key(&key);
    let (ciphertext, nonce) = encryptor.encrypt(plaintext.as_bytes())?;
    Ok(EncryptedText {
        ciphertext: BASE64.encode(ciphertext),
        iv: hex::encode(nonce),
    })
}

/// Decrypt stored ciphertext with the given password.
///
/// Fails (without panicking) on a wrong password, a corrupt ciphertext or a
/// malformed nonce.
pub fn decrypt_text(ciphertext_b64: &str, iv_hex: &str, password: &str) -> Result<String> {
    let nonce = hex::decode(iv_hex).map_err(|e| anyhow!("Invalid nonce encoding: {}", e))?;
    let ciphertext = BASE64
        .decode(ciphertext_b64)
        .map_err(|e| anyhow!("Invalid ciphertext encoding: {}", e))?;

    let key = derive_key(password)?;
    let encryptor = Encryptor::from_key(&key);
    let plaintext = encryptor.decrypt(&ciphertext, &nonce)?;

    String::from_utf8(plaintext).map_err(|e| anyhow!("Decrypted content is not UTF-8: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_determinism() {
        let key1 = derive_key("test_password").unwrap();
        let key2 = derive_key("test_password").unwrap();
        assert_eq!(key1, key2);

        let other = derive_key("other_password").unwrap();
        assert_ne!(key1, other);
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let encrypted = encrypt_text("Hello, World!", "s3cr3t").unwrap();
        assert_ne!(encrypted.ciphertext, "Hello, World!");
        assert_eq!(encrypted.iv.len(), NONCE_LEN * 2);

        let decrypted = decrypt_text(&encrypted.ciphertext, &encrypted.iv, "s3cr3t").unwrap();
        assert_eq!(decrypted, "Hello, World!");
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = encrypt_text("top secret", "right").unwrap();
        let result = decrypt_text(&encrypted.ciphertext, &encrypted.iv, "wrong");
        assert!(result.is_err());
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let a = encrypt_text("same input", "pw").unwrap();
        let b = encrypt_text("same input", "pw").unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_corrupt_ciphertext_fails() {
        let encrypted = encrypt_text("payload", "pw").unwrap();
        let result = decrypt_text("bm90IHJlYWwgY2lwaGVydGV4dA==", &encrypted.iv, "pw");
        assert!(result.is_err());

        let result = decrypt_text(&encrypted.ciphertext, "zz-not-hex", "pw");
        assert!(result.is_err());
    }
}
