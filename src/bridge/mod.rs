//! Bridge: wire protocol, transports, and identifier-based dispatch.
//!
//! - [`protocol`]: outbound/inbound event types and their JSON frames
//! - [`transport`]: the [`Transport`] seam, a tokio channel and an in-memory recorder
//! - [`registry`]: widgets by identifier, and inbound dispatch onto them

pub mod protocol;
pub mod registry;
pub mod transport;

use thiserror::Error;

pub use protocol::{Inbound, Outbound};
pub use registry::{Dispatch, RegistryError, WidgetRegistry};
pub use transport::{Bridge, ChannelTransport, RecordingTransport, Transport};

/// Errors from encoding, decoding, or sending frames.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("transport closed")]
    Closed,
}
