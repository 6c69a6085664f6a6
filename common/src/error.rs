use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use crate::encryption::error::EncryptionError;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Body returned for every failure that is not the caller's fault.
pub const GENERIC_ERROR_BODY: &str = "Error processing the request";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Decryption error: {0}")]
    DecryptionError(String),
    #[error("Invalid readings: {0}")]
    InvalidReadings(String),
    #[error("Forwarding rejected: {0}")]
    ForwardingRejected(String),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Server error: {0}")]
    ServerError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl GatewayError {
    /// Stable label used in server-side logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "invalid_payload",
            Self::InvalidPublicKey(_) => "invalid_public_key",
            Self::DecryptionError(_) => "decryption_error",
            Self::InvalidReadings(_) => "invalid_readings",
            Self::ForwardingRejected(_) => "forwarding_rejected",
            Self::TransportError(_) => "transport_error",
            Self::ConfigError(_) => "config_error",
            Self::ServerError(_) => "server_error",
            Self::InternalError(_) => "internal_error",
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::ServerError(err.to_string())
    }
}

impl From<EncryptionError> for GatewayError {
    fn from(err: EncryptionError) -> Self {
        match err {
            EncryptionError::InvalidPublicKey(msg) => GatewayError::InvalidPublicKey(msg),
            EncryptionError::DecryptionError(msg) => GatewayError::DecryptionError(msg),
            EncryptionError::InvalidKey(msg) => GatewayError::ConfigError(msg),
            EncryptionError::EncryptionError(msg) => GatewayError::InternalError(msg),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Only client errors carry detail; crypto and downstream failures stay opaque.
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::InvalidPayload(_) => HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string()),
            Self::InvalidPublicKey(_) |
            Self::DecryptionError(_) |
            Self::InvalidReadings(_) |
            Self::ForwardingRejected(_) |
            Self::TransportError(_) |
            Self::ConfigError(_) |
            Self::ServerError(_) |
            Self::InternalError(_) => {
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body(GENERIC_ERROR_BODY)
            }
        }
    }
}
