use std::fmt;
use super::keys::SharedSecret;

pub const AES128_KEY_LEN: usize = 16;

/// AES-128 key taken from the leading bytes of the shared secret.
///
/// This is a plain truncation, not a KDF. Devices in the field derive the
/// key the same way, so switching to HKDF would break them.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; AES128_KEY_LEN]);

impl SymmetricKey {
    pub fn derive(secret: &SharedSecret) -> Self {
        let mut key = [0u8; AES128_KEY_LEN];
        key.copy_from_slice(&secret.as_bytes()[..AES128_KEY_LEN]);
        Self(key)
    }

    pub fn from_bytes(key: [u8; AES128_KEY_LEN]) -> Self {
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; AES128_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SymmetricKey").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::keys::ServerKey;

    #[test]
    fn test_key_is_leading_half_of_secret() {
        let server = ServerKey::generate();
        let device = ServerKey::generate();
        let secret = server.derive_shared_secret(&device.public_key_bytes()).unwrap();

        let key = SymmetricKey::derive(&secret);
        assert_eq!(&key.as_bytes()[..], &secret.as_bytes()[..16]);
    }
}
