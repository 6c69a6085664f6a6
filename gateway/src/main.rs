//! Main entry point for the ECC gateway

use actix_web::main as actix_main;
use chrono::Local;
use common::{Config, Result};
use ecc_gateway::GatewayServer;
use env_logger::fmt::Color;
use env_logger::{Builder, Env};
use log::{error, info};
use std::io::Write;

const BANNER: &str = r#"
╔═══════════════════════════════════════════════════════════════════╗
║                                                                   ║
║   ███████╗ ██████╗ ██████╗                                        ║
║   ██╔════╝██╔════╝██╔════╝                                        ║
║   █████╗  ██║     ██║                                             ║
║   ██╔══╝  ██║     ██║                                             ║
║   ███████╗╚██████╗╚██████╗                                        ║
║   ╚══════╝ ╚═════╝ ╚═════╝                                        ║
║                                                                   ║
║   ECC Telemetry Gateway v0.1.0                                    ║
║                                                                   ║
╚═══════════════════════════════════════════════════════════════════╝
"#;

fn level_color(level: log::Level) -> Color {
    match level {
        log::Level::Error => Color::Red,
        log::Level::Warn => Color::Yellow,
        log::Level::Info => Color::Green,
        log::Level::Debug | log::Level::Trace => Color::Cyan,
    }
}

/// `RUST_LOG` overrides the default `info` filter.
fn setup_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let mut level = buf.style();
            level.set_color(level_color(record.level())).set_bold(true);

            writeln!(
                buf,
                "{} {} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                level.value(record.level()),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[actix_main]
async fn main() -> Result<()> {
    setup_logger();

    println!("{}", BANNER);

    info!("Starting ECC gateway...");

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    info!("Configuration loaded: {:?}", config);

    let server = GatewayServer::from_config(&config).map_err(|e| {
        error!("Failed to initialize gateway: {}", e);
        e
    })?;
    info!("✓ Server key and forwarder initialized");

    info!("ECC gateway listening on port {}", config.port);
    server.start().await
}
