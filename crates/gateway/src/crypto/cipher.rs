//! Symmetric encryption and decryption for the four platform algorithms.
//!
//! This module is intentionally free of HTTP and serde dependencies. It
//! operates on raw bytes; hex rendering of IVs, ciphertext, and auth tags
//! happens in the codec layer above.
//!
//! Algorithm notes:
//! - `aes-256-ctr` and the CBC variants carry no integrity protection; a
//!   wrong key usually yields garbage rather than an error (CTR always
//!   "succeeds", CBC fails only when the padding happens to be invalid).
//! - `aes-256-gcm` is authenticated: decryption requires the auth tag and
//!   fails on any tampering.

use aes::cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher,
};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

use super::kdf::KEY_LEN;
use super::platform::Algorithm;

/// Byte length of an AES-GCM authentication tag.
pub const GCM_TAG_LEN: usize = 16;

type Aes256CtrBe = ctr::Ctr128BE<aes::Aes256>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type Camellia256CbcEnc = cbc::Encryptor<camellia::Camellia256>;
type Camellia256CbcDec = cbc::Decryptor<camellia::Camellia256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The IV has the wrong length for the selected algorithm.
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// Required IV byte length.
        expected: usize,
        /// Supplied IV byte length.
        actual: usize,
    },

    /// GCM decryption was attempted without an authentication tag.
    #[error("aes-256-gcm requires an authentication tag")]
    MissingAuthTag,

    /// Encryption or decryption failed (bad padding, tag mismatch, ...).
    #[error("cipher operation failed")]
    OperationFailed,
}

/// Raw output of an encryption call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// Ciphertext bytes, excluding any authentication tag.
    pub content: Vec<u8>,
    /// Authentication tag bytes; `Some` for GCM, `None` otherwise.
    pub auth_tag: Option<Vec<u8>>,
}

/// Generate a cryptographically random IV of `len` bytes via the OS CSPRNG.
pub fn random_iv(len: usize) -> Vec<u8> {
    let mut iv = vec![0u8; len];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypt `plaintext` under `algorithm` with the given key and IV.
///
/// # Errors
///
/// Returns [`CipherError::InvalidIvLength`] if `iv` does not match the
/// algorithm's required length, or [`CipherError::OperationFailed`] on an
/// internal cipher error.
pub fn encrypt(
    algorithm: Algorithm,
    key: &[u8; KEY_LEN],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Ciphertext, CipherError> {
    match algorithm {
        Algorithm::Aes256Ctr => {
            let mut cipher = Aes256CtrBe::new_from_slices(key, iv)
                .map_err(|_| invalid_iv(16, iv.len()))?;
            let mut content = plaintext.to_vec();
            cipher.apply_keystream(&mut content);
            Ok(Ciphertext {
                content,
                auth_tag: None,
            })
        }
        Algorithm::Aes256Cbc => {
            let content = Aes256CbcEnc::new_from_slices(key, iv)
                .map_err(|_| invalid_iv(16, iv.len()))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
            Ok(Ciphertext {
                content,
                auth_tag: None,
            })
        }
        Algorithm::Camellia256Cbc => {
            let content = Camellia256CbcEnc::new_from_slices(key, iv)
                .map_err(|_| invalid_iv(16, iv.len()))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
            Ok(Ciphertext {
                content,
                auth_tag: None,
            })
        }
        Algorithm::Aes256Gcm => {
            if iv.len() != 12 {
                return Err(invalid_iv(12, iv.len()));
            }
            let cipher =
                Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::OperationFailed)?;
            let nonce = Nonce::from_slice(iv);
            // The aead API appends the tag to the ciphertext; split it off so
            // the wire format carries them in separate fields.
            let mut content = cipher
                .encrypt(nonce, plaintext)
                .map_err(|_| CipherError::OperationFailed)?;
            let auth_tag = content.split_off(content.len() - GCM_TAG_LEN);
            Ok(Ciphertext {
                content,
                auth_tag: Some(auth_tag),
            })
        }
    }
}

/// Decrypt `content` under `algorithm` with the given key, IV, and (for GCM)
/// authentication tag.
///
/// # Errors
///
/// Returns [`CipherError::InvalidIvLength`] on a wrong-length IV,
/// [`CipherError::MissingAuthTag`] when GCM is invoked without a tag, and
/// [`CipherError::OperationFailed`] on bad padding or tag mismatch.
pub fn decrypt(
    algorithm: Algorithm,
    key: &[u8; KEY_LEN],
    iv: &[u8],
    content: &[u8],
    auth_tag: Option<&[u8]>,
) -> Result<Vec<u8>, CipherError> {
    match algorithm {
        Algorithm::Aes256Ctr => {
            let mut cipher = Aes256CtrBe::new_from_slices(key, iv)
                .map_err(|_| invalid_iv(16, iv.len()))?;
            let mut plaintext = content.to_vec();
            cipher.apply_keystream(&mut plaintext);
            Ok(plaintext)
        }
        Algorithm::Aes256Cbc => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|_| invalid_iv(16, iv.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(content)
            .map_err(|_| CipherError::OperationFailed),
        Algorithm::Camellia256Cbc => Camellia256CbcDec::new_from_slices(key, iv)
            .map_err(|_| invalid_iv(16, iv.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(content)
            .map_err(|_| CipherError::OperationFailed),
        Algorithm::Aes256Gcm => {
            if iv.len() != 12 {
                return Err(invalid_iv(12, iv.len()));
            }
            let tag = auth_tag.ok_or(CipherError::MissingAuthTag)?;
            let cipher =
                Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::OperationFailed)?;
            let nonce = Nonce::from_slice(iv);
            let mut buf = Vec::with_capacity(content.len() + tag.len());
            buf.extend_from_slice(content);
            buf.extend_from_slice(tag);
            cipher
                .decrypt(nonce, buf.as_ref())
                .map_err(|_| CipherError::OperationFailed)
        }
    }
}

fn invalid_iv(expected: usize, actual: usize) -> CipherError {
    CipherError::InvalidIvLength { expected, actual }
}
