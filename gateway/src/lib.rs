pub mod server;
pub mod validator;
pub mod forwarder;

pub use server::{configure_routes, GatewayServer};
pub use forwarder::{TelemetryForwarder, ThingSpeakForwarder};
pub use validator::RequestValidator;
