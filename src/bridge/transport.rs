//! Transports: where encoded frames go.
//!
//! [`Transport`] is the seam between the panel and whatever carries frames to
//! the hub. [`ChannelTransport`] hands frames to a tokio channel; the other
//! end is typically a socket writer task. [`RecordingTransport`] keeps frames
//! in memory for headless runs. [`Bridge`] encodes and sends.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::protocol::Outbound;
use super::BridgeError;

/// A sink for encoded outbound frames. Fire-and-forget: no acknowledgement.
pub trait Transport {
    /// Send one text frame.
    fn send(&mut self, frame: String) -> Result<(), BridgeError>;
}

/// Transport backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Create a transport and the receiver its frames arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wrap an existing sender.
    pub fn from_sender(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, frame: String) -> Result<(), BridgeError> {
        self.tx.send(frame).map_err(|_| BridgeError::Closed)
    }
}

/// Transport that appends frames to a shared list.
///
/// Clones share the list, so a test can keep one handle and give the other
/// to a panel.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    frames: Arc<Mutex<Vec<String>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames sent so far, oldest first.
    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Remove and return every recorded frame.
    pub fn take(&self) -> Vec<String> {
        self.frames
            .lock()
            .map(|mut f| std::mem::take(&mut *f))
            .unwrap_or_default()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, frame: String) -> Result<(), BridgeError> {
        let mut frames = self.frames.lock().map_err(|_| BridgeError::Closed)?;
        frames.push(frame);
        Ok(())
    }
}

/// Encodes outbound events and pushes them through a transport.
pub struct Bridge {
    transport: Box<dyn Transport>,
    sent: u64,
}

impl Bridge {
    /// Create a bridge over `transport`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            sent: 0,
        }
    }

    /// Encode and send one event.
    pub fn emit(&mut self, event: &Outbound) -> Result<(), BridgeError> {
        let frame = event.encode()?;
        tracing::debug!(%frame, "emit");
        self.transport.send(frame)?;
        self.sent += 1;
        Ok(())
    }

    /// Number of frames sent so far.
    pub fn sent_count(&self) -> u64 {
        self.sent
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge").field("sent", &self.sent).finish()
    }
}
