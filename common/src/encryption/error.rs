use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),
}
