//! P-256 key agreement
//!
//! Holds the gateway's static private scalar and turns a device's raw
//! `X || Y` public key into the ECDH shared secret.

use std::fmt;
use p256::{
    ecdh::diffie_hellman,
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    EncodedPoint, FieldBytes, PublicKey, SecretKey,
};
use rand::rngs::OsRng;
use super::error::EncryptionError;

/// Length of a raw public key on the wire: 32-byte X followed by 32-byte Y.
pub const PUBLIC_KEY_LEN: usize = 64;
/// Length of a P-256 scalar or coordinate.
pub const SCALAR_LEN: usize = 32;

/// X coordinate of the ECDH result, big-endian.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret([u8; SCALAR_LEN]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; SCALAR_LEN] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSecret").field(&"[REDACTED]").finish()
    }
}

/// The gateway's static key. Loaded once at startup and never mutated.
#[derive(Clone)]
pub struct ServerKey {
    secret: SecretKey,
    public: PublicKey,
}

impl ServerKey {
    pub fn new(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn generate() -> Self {
        Self::new(SecretKey::random(&mut OsRng))
    }

    /// Parses a hex scalar. Short input is left-padded with zero bytes,
    /// since some generators drop leading zeros.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, EncryptionError> {
        let raw = hex::decode(private_key_hex.trim())
            .map_err(|e| EncryptionError::InvalidKey(format!("private key is not valid hex: {}", e)))?;

        if raw.is_empty() || raw.len() > SCALAR_LEN {
            return Err(EncryptionError::InvalidKey(format!(
                "private key must be 1 to {} bytes, got {}", SCALAR_LEN, raw.len()
            )));
        }

        let mut padded = [0u8; SCALAR_LEN];
        padded[SCALAR_LEN - raw.len()..].copy_from_slice(&raw);

        let secret = SecretKey::from_bytes(FieldBytes::from_slice(&padded))
            .map_err(|_| EncryptionError::InvalidKey("private key is not a valid P-256 scalar".to_string()))?;

        Ok(Self::new(secret))
    }

    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret.to_bytes())
    }

    /// Public key as the 64-byte `X || Y` form devices send and expect.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        encode_public_key(&self.public)
    }

    /// Public key as uncompressed SEC1 hex (`04 || X || Y`).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.to_encoded_point(false).as_bytes())
    }

    /// ECDH with a device's raw public key.
    pub fn derive_shared_secret(
        &self,
        caller_public_key: &[u8; PUBLIC_KEY_LEN],
    ) -> Result<SharedSecret, EncryptionError> {
        let caller = decode_public_key(caller_public_key)?;
        let shared = diffie_hellman(self.secret.to_nonzero_scalar(), caller.as_affine());

        let mut out = [0u8; SCALAR_LEN];
        out.copy_from_slice(shared.raw_secret_bytes());
        Ok(SharedSecret(out))
    }
}

impl fmt::Debug for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerKey")
            .field("public", &self.public_key_hex())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Rebuilds a curve point from raw `X || Y`. Rejects coordinates outside
/// the field and points that do not satisfy the curve equation; the point
/// at infinity has no affine encoding and cannot be expressed here.
pub fn decode_public_key(raw: &[u8; PUBLIC_KEY_LEN]) -> Result<PublicKey, EncryptionError> {
    let (x, y) = raw.split_at(SCALAR_LEN);
    let point = EncodedPoint::from_affine_coordinates(
        FieldBytes::from_slice(x),
        FieldBytes::from_slice(y),
        false,
    );

    Option::<PublicKey>::from(PublicKey::from_encoded_point(&point))
        .ok_or_else(|| EncryptionError::InvalidPublicKey("point is not on curve P-256".to_string()))
}

pub fn encode_public_key(public: &PublicKey) -> [u8; PUBLIC_KEY_LEN] {
    let point = public.to_encoded_point(false);
    // Uncompressed SEC1: tag byte, then X, then Y.
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(&point.as_bytes()[1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 5903, section 8.1 (256-bit random ECP group).
    const I_SECRET: &str = "c88f01f510d9ac3f70a292daa2316de544e9aab8afe84049c62a9c57862d1433";
    const R_SECRET: &str = "c6ef9c5d78ae012a011164acb397ce2088685d8f06bf9be0b283ab46476bee53";
    const SHARED_X: &str = "d6840f6b42f6edafd13116e0e12565202fef8e9ece7dce03812464d04b9442de";

    #[test]
    fn test_known_answer_vector() {
        let initiator = ServerKey::from_hex(I_SECRET).unwrap();
        let responder = ServerKey::from_hex(R_SECRET).unwrap();

        let secret = initiator.derive_shared_secret(&responder.public_key_bytes()).unwrap();
        assert_eq!(hex::encode(secret.as_bytes()), SHARED_X);
    }

    #[test]
    fn test_ecdh_symmetry() {
        for _ in 0..8 {
            let server = ServerKey::generate();
            let device = ServerKey::generate();

            let server_side = server.derive_shared_secret(&device.public_key_bytes()).unwrap();
            let device_side = device.derive_shared_secret(&server.public_key_bytes()).unwrap();
            assert_eq!(server_side, device_side);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let server = ServerKey::generate();
        let device = ServerKey::generate().public_key_bytes();

        let first = server.derive_shared_secret(&device).unwrap();
        let second = server.derive_shared_secret(&device).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_point_off_curve() {
        let server = ServerKey::generate();
        let mut raw = ServerKey::generate().public_key_bytes();
        raw[63] ^= 0x01;

        let err = server.derive_shared_secret(&raw).unwrap_err();
        assert!(matches!(err, EncryptionError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_rejects_all_zero_point() {
        let server = ServerKey::generate();
        let err = server.derive_shared_secret(&[0u8; PUBLIC_KEY_LEN]).unwrap_err();
        assert!(matches!(err, EncryptionError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_rejects_coordinates_outside_field() {
        let server = ServerKey::generate();
        let err = server.derive_shared_secret(&[0xff; PUBLIC_KEY_LEN]).unwrap_err();
        assert!(matches!(err, EncryptionError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_short_hex_is_left_padded() {
        let key = ServerKey::from_hex("01").unwrap();
        assert_eq!(key.private_key_hex(), format!("{}01", "0".repeat(62)));
    }

    #[test]
    fn test_rejects_bad_private_keys() {
        assert!(ServerKey::from_hex("").is_err());
        assert!(ServerKey::from_hex("zz").is_err());
        assert!(ServerKey::from_hex(&"00".repeat(32)).is_err());
        assert!(ServerKey::from_hex(&"ff".repeat(32)).is_err());
        assert!(ServerKey::from_hex(&"11".repeat(33)).is_err());
    }

    #[test]
    fn test_hex_round_trip_keeps_public_key() {
        let key = ServerKey::generate();
        let reloaded = ServerKey::from_hex(&key.private_key_hex()).unwrap();
        assert_eq!(key.public_key_bytes(), reloaded.public_key_bytes());
        assert!(key.public_key_hex().starts_with("04"));
        assert_eq!(key.public_key_hex().len(), 130);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = ServerKey::from_hex(I_SECRET).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(I_SECRET));
    }
}
