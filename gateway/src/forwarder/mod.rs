//! Relays parsed readings to the downstream telemetry store.

pub mod thingspeak;

use async_trait::async_trait;
use common::{Result, TelemetryFields};

pub use thingspeak::ThingSpeakForwarder;

/// Submits one set of readings. Implementations must return
/// `ForwardingRejected` when the store refuses the data and
/// `TransportError` when it cannot be reached.
#[async_trait]
pub trait TelemetryForwarder: Send + Sync {
    async fn forward(&self, fields: &TelemetryFields) -> Result<()>;
}
