pub mod error;
pub mod keys;
pub mod kdf;
pub mod cbc;

pub use self::error::EncryptionError;
pub use self::keys::{ServerKey, SharedSecret, PUBLIC_KEY_LEN};
pub use self::kdf::SymmetricKey;
pub use self::cbc::{decrypt, encrypt_zero_padded, Plaintext, IV_LEN};
