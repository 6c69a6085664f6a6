use serde::{Deserialize, Serialize};
use crate::encryption::{IV_LEN, PUBLIC_KEY_LEN};

/// Body of `POST /upload` as it arrives on the wire. Every field is
/// optional here so validation can name the one that is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Base64 ciphertext.
    #[serde(default)]
    pub data: Option<String>,
    /// Raw `X || Y` public key of the device.
    #[serde(default)]
    pub pubkey: Option<Vec<u8>>,
    #[serde(default)]
    pub iv: Option<Vec<u8>>,
}

/// An upload whose fields have been decoded and length-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub ciphertext: Vec<u8>,
    pub public_key: [u8; PUBLIC_KEY_LEN],
    pub iv: [u8; IV_LEN],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}
