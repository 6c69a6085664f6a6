//! HTTP request handlers for the gateway

use actix_web::{web, HttpResponse, Responder};
use common::{GatewayError, PublicKeyResponse, Result, UploadRequest};
use log::{error, info, warn};
use uuid::Uuid;
use super::GatewayServer;

pub const WELCOME_BODY: &str = "Welcome to the ECC Gateway server!";
pub const UPLOAD_OK_BODY: &str = "Data decrypted and forwarded to ThingSpeak";

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_BODY)
}

/// Decrypts a sensor upload and relays its readings.
///
/// Only `InvalidPayload` reaches the caller with detail; everything else is
/// logged here and answered with the generic 500 body.
pub async fn upload(
    body: web::Json<UploadRequest>,
    server: web::Data<GatewayServer>,
) -> Result<HttpResponse> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Upload received: data={} chars, pubkey={} bytes, iv={} bytes",
        request_id,
        body.data.as_ref().map_or(0, String::len),
        body.pubkey.as_ref().map_or(0, Vec::len),
        body.iv.as_ref().map_or(0, Vec::len),
    );

    match server.process_upload(&body).await {
        Ok(fields) => {
            info!("[{}] Forwarded readings: {:?}", request_id, fields);
            Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(UPLOAD_OK_BODY))
        }
        Err(e) => {
            match &e {
                GatewayError::InvalidPayload(_) => {
                    warn!("[{}] Upload rejected ({}): {}", request_id, e.kind(), e);
                }
                _ => {
                    error!("[{}] Upload failed ({}): {}", request_id, e.kind(), e);
                }
            }
            Err(e)
        }
    }
}

pub async fn public_key(server: web::Data<GatewayServer>) -> impl Responder {
    let key = server.server_key();
    let raw = key.public_key_bytes();

    HttpResponse::Ok().json(PublicKeyResponse {
        public_key: key.public_key_hex(),
        x: raw[..32].to_vec(),
        y: raw[32..].to_vec(),
    })
}
