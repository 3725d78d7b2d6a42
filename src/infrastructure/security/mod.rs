pub mod encryption;

pub use encryption::{decrypt_text, derive_key, encrypt_text, EncryptedText};
