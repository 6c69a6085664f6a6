use common::encryption::{IV_LEN, PUBLIC_KEY_LEN};
use common::{GatewayError, Result, UploadRequest, ValidatedUpload};

/// Sensors send a handful of readings; anything bigger is not ours.
pub const DEFAULT_MAX_CIPHERTEXT_LEN: usize = 4096;

/// Structural checks on an upload, run before any cryptographic work.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    max_ciphertext_len: usize,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CIPHERTEXT_LEN)
    }
}

impl RequestValidator {
    pub fn new(max_ciphertext_len: usize) -> Self {
        Self { max_ciphertext_len }
    }

    pub fn validate(&self, request: &UploadRequest) -> Result<ValidatedUpload> {
        let data = request.data.as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| invalid("data is missing"))?;

        let ciphertext = base64::decode(data.trim())
            .map_err(|e| invalid(&format!("data is not valid base64: {}", e)))?;
        if ciphertext.is_empty() {
            return Err(invalid("data decodes to zero bytes"));
        }
        if ciphertext.len() > self.max_ciphertext_len {
            return Err(invalid(&format!(
                "data is {} bytes, limit is {}", ciphertext.len(), self.max_ciphertext_len
            )));
        }

        let public_key = fixed_len::<PUBLIC_KEY_LEN>("pubkey", request.pubkey.as_deref())?;
        let iv = fixed_len::<IV_LEN>("iv", request.iv.as_deref())?;

        Ok(ValidatedUpload { ciphertext, public_key, iv })
    }
}

fn fixed_len<const N: usize>(field: &str, value: Option<&[u8]>) -> Result<[u8; N]> {
    let bytes = value.ok_or_else(|| invalid(&format!("{} is missing", field)))?;
    bytes.try_into()
        .map_err(|_| invalid(&format!("{} must be {} bytes, got {}", field, N, bytes.len())))
}

fn invalid(reason: &str) -> GatewayError {
    GatewayError::InvalidPayload(reason.to_string())
}
