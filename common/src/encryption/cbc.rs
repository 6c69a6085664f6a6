//! AES-128-CBC without PKCS padding
//!
//! Devices NUL-pad the plaintext to the block boundary and the gateway
//! strips trailing NULs after decryption. A payload that legitimately
//! ends in NUL bytes loses them.

use aes::Aes128;
use cipher::{
    BlockDecryptMut, BlockEncryptMut, KeyIvInit,
    generic_array::GenericArray,
};
use super::error::EncryptionError;
use super::kdf::SymmetricKey;

pub const BLOCK_SIZE: usize = 16;
pub const IV_LEN: usize = 16;

type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// Decrypted telemetry text with the NUL padding removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext(String);

impl Plaintext {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn decrypt(
    ciphertext: &[u8],
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
) -> Result<Plaintext, EncryptionError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(EncryptionError::DecryptionError(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(), BLOCK_SIZE
        )));
    }

    let mut decryptor = Aes128CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| EncryptionError::DecryptionError(e.to_string()))?;

    let mut buffer = ciphertext.to_vec();
    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        decryptor.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }

    let end = buffer.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    buffer.truncate(end);

    Ok(Plaintext(String::from_utf8_lossy(&buffer).into_owned()))
}

/// Device side of the protocol: NUL-pad to the block size and encrypt.
pub fn encrypt_zero_padded(
    plaintext: &[u8],
    key: &SymmetricKey,
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, EncryptionError> {
    let mut encryptor = Aes128CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| EncryptionError::EncryptionError(e.to_string()))?;

    let padded_len = plaintext.len().div_ceil(BLOCK_SIZE).max(1) * BLOCK_SIZE;
    let mut buffer = plaintext.to_vec();
    buffer.resize(padded_len, 0);

    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        encryptor.encrypt_block_mut(GenericArray::from_mut_slice(block));
    }

    Ok(buffer)
}
