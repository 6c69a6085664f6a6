//! Server module implementing the gateway
//!
//! Owns the long-lived state (server key, forwarder) and runs the
//! per-request decrypt-and-forward pipeline.

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use common::encryption::{cbc, ServerKey, SymmetricKey};
use common::{Config, GatewayError, Result, SensorReadings, TelemetryFields, UploadRequest};
use log::{debug, info, warn};
use crate::forwarder::{TelemetryForwarder, ThingSpeakForwarder};
use crate::validator::RequestValidator;

pub mod handlers;

/// Upper bound on an upload body before JSON parsing.
const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Shared, read-only gateway state handed to every request.
#[derive(Clone)]
pub struct GatewayServer {
    server_key: Arc<ServerKey>,
    forwarder: Arc<dyn TelemetryForwarder>,
    validator: RequestValidator,
    bind_address: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(
        server_key: ServerKey,
        forwarder: Arc<dyn TelemetryForwarder>,
        bind_address: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            server_key: Arc::new(server_key),
            forwarder,
            validator: RequestValidator::default(),
            bind_address: bind_address.into(),
            port,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let server_key = ServerKey::from_hex(&config.server_private_key)?;
        info!("Server public key: {}", server_key.public_key_hex());

        let forwarder = ThingSpeakForwarder::from_config(config)?;
        info!("Forwarding readings to {} (timeout {:?})", forwarder.endpoint(), config.forward_timeout);

        Ok(Self::new(server_key, Arc::new(forwarder), config.bind_address.clone(), config.port))
    }

    pub fn server_key(&self) -> &ServerKey {
        &self.server_key
    }

    pub async fn start(self) -> Result<()> {
        let address = format!("{}:{}", self.bind_address, self.port);
        let server = web::Data::new(self);

        info!("Starting HTTP server on {}", address);
        HttpServer::new(move || {
            App::new()
                .app_data(server.clone())
                .configure(configure_routes)
        })
        .bind(&address)?
        .run()
        .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Validate, agree on a key, decrypt, parse and forward one upload.
    pub async fn process_upload(&self, request: &UploadRequest) -> Result<TelemetryFields> {
        let upload = self.validator.validate(request)?;

        // Key material is dropped before the network call.
        let plaintext = {
            let secret = self.server_key.derive_shared_secret(&upload.public_key)?;
            let key = SymmetricKey::derive(&secret);
            cbc::decrypt(&upload.ciphertext, &key, &upload.iv)?
        };
        debug!("Decrypted payload: {:?}", plaintext.as_str());

        let readings = SensorReadings::parse(plaintext.as_str());
        let fields = readings.telemetry();
        debug!("Parsed {} reading(s): {:?}", readings.len(), fields);

        if !fields.has_any_valid() {
            return Err(GatewayError::InvalidReadings(format!(
                "none of T, P, A is numeric in {} parsed field(s)", readings.len()
            )));
        }

        self.forwarder.forward(&fields).await?;
        Ok(fields)
    }
}

/// Registers the gateway routes. The app must carry `web::Data<GatewayServer>`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(|err, _req| {
                warn!("Rejected malformed upload body: {}", err);
                GatewayError::InvalidPayload(err.to_string()).into()
            }),
    )
    .service(web::resource("/").route(web::get().to(handlers::index)))
    .service(web::resource("/upload").route(web::post().to(handlers::upload)))
    .service(web::resource("/pubkey").route(web::get().to(handlers::public_key)));
}
