pub mod error;
pub mod types;
pub mod config;
pub mod encryption;
pub mod readings;

pub use error::{GatewayError, Result, GENERIC_ERROR_BODY};
pub use types::*;
pub use config::*;
pub use readings::{Reading, SensorReadings, TelemetryFields};
