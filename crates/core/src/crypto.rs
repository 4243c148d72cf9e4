//! Credential codec for user-supplied GLHF API keys at rest.
//!
//! Stored keys use the two-part format `hex(iv):hex(ciphertext)` where the
//! IV is 16 random bytes and the ciphertext is AES-256-CBC with PKCS#7
//! padding. The format is recognizable, which makes `encode` idempotent:
//! a value that already looks encoded is never re-encrypted on a repeated
//! save. Decode failures (corrupt value, wrong key) are indistinguishable
//! from "no key stored" -- the codec returns an empty string and logs
//! rather than erroring, so a bad row degrades to offline mode instead of
//! breaking the owning user's requests.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// IV length in bytes; hex-encoded it forms the 32-char first segment.
const IV_LENGTH: usize = 16;

/// Returns true iff `text` matches the stored-credential format:
/// exactly one `:`, a 32-hex-char IV segment, and a non-empty hex
/// ciphertext segment.
pub fn looks_encoded(text: &str) -> bool {
    let mut parts = text.split(':');
    let (Some(iv), Some(ct), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    iv.len() == 2 * IV_LENGTH
        && !ct.is_empty()
        && iv.chars().all(|c| c.is_ascii_hexdigit())
        && ct.chars().all(|c| c.is_ascii_hexdigit())
}

/// Symmetric cipher for the stored `api_key` field.
///
/// Process-wide and read-only after startup: construct once from the
/// configured passphrase and share by reference.
#[derive(Clone)]
pub struct ApiKeyCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for ApiKeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCipher").finish_non_exhaustive()
    }
}

impl ApiKeyCipher {
    /// Build a cipher from a passphrase of any length.
    ///
    /// The passphrase is padded with spaces to 32 bytes, or truncated
    /// when longer, matching the legacy key-derivation of stored rows.
    pub fn new(passphrase: &str) -> Self {
        let mut key = [b' '; 32];
        let bytes = passphrase.as_bytes();
        let n = bytes.len().min(32);
        key[..n].copy_from_slice(&bytes[..n]);
        Self { key }
    }

    /// Encrypt a plaintext credential for storage.
    ///
    /// Empty input encodes to empty. Input that already matches the
    /// encoded format is returned unchanged, so repeated saves never
    /// double-encrypt.
    pub fn encode(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        if looks_encoded(plaintext) {
            return plaintext.to_string();
        }

        let mut iv = [0u8; IV_LENGTH];
        rand::rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        format!("{}:{}", hex::encode(iv), hex::encode(ciphertext))
    }

    /// Decrypt a stored credential.
    ///
    /// Empty input decodes to empty. Input that does not match the
    /// encoded format is returned unchanged (legacy plaintext rows pass
    /// through). Any decryption failure returns an empty string.
    pub fn decode(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        if !looks_encoded(text) {
            return text.to_string();
        }

        let Some((iv_hex, ct_hex)) = text.split_once(':') else {
            return text.to_string();
        };

        let (Ok(iv_bytes), Ok(ciphertext)) = (hex::decode(iv_hex), hex::decode(ct_hex)) else {
            tracing::warn!("Stored credential has invalid hex; treating as absent");
            return String::new();
        };

        let iv: [u8; IV_LENGTH] = match iv_bytes.try_into() {
            Ok(iv) => iv,
            Err(_) => {
                tracing::warn!("Stored credential has wrong IV length; treating as absent");
                return String::new();
            }
        };

        let plaintext = match Aes256CbcDec::new(&self.key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        {
            Ok(bytes) => bytes,
            Err(_) => {
                tracing::warn!("Failed to decrypt stored credential; treating as absent");
                return String::new();
            }
        };

        match String::from_utf8(plaintext) {
            Ok(s) => s,
            Err(_) => {
                tracing::warn!("Decrypted credential is not valid UTF-8; treating as absent");
                String::new()
            }
        }
    }
}
