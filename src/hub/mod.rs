//! Hub: the server side of the bridge.
//!
//! [`Hub`] keeps slider values and meeting state, reacts to frames from
//! panels, and queues [`Inbound`] updates. [`HubPump`] drains that queue to
//! every subscribed panel, but only while at least one panel is connected;
//! until then updates wait in the queue.
//!
//! - [`store`]: slider values with their defaults
//! - [`meeting`]: meeting state, actions, and the meeting client

pub mod meeting;
pub mod store;

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

use crate::bridge::protocol::{Inbound, Outbound};
use crate::bridge::BridgeError;

pub use meeting::{
    MeetingAction, MeetingClient, MeetingControl, MeetingMessage, MeetingState, MeetingUpdate,
    Reaction,
};
pub use store::SliderStore;

#[derive(Debug, Error)]
pub enum HubError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("malformed meeting message: {0}")]
    Meeting(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// HubConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Known sliders and their starting values.
    pub sliders: BTreeMap<String, f64>,
    /// Frames a slow subscriber may lag behind before it starts losing them.
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            sliders: BTreeMap::from([("vol".to_owned(), 50.0), ("bright".to_owned(), 50.0)]),
            broadcast_capacity: 64,
        }
    }
}

impl HubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a slider (builder).
    pub fn with_slider(mut self, id: impl Into<String>, value: f64) -> Self {
        self.sliders.insert(id.into(), value);
        self
    }

    /// Set the broadcast capacity (builder).
    pub fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// Hardware that mirrors button states on lights.
pub trait Indicator {
    fn set_led(&mut self, name: &str, on: bool);
}

// ---------------------------------------------------------------------------
// Hub
// ---------------------------------------------------------------------------

/// Relay state and the producer side of the update queue.
#[derive(Debug)]
pub struct Hub<C> {
    store: SliderStore,
    meeting: MeetingState,
    control: C,
    queue: mpsc::UnboundedSender<Inbound>,
    clients: watch::Sender<usize>,
    frames: broadcast::Sender<String>,
}

/// Consumer side of the update queue.
#[derive(Debug)]
pub struct HubPump {
    queue: mpsc::UnboundedReceiver<Inbound>,
    clients: watch::Receiver<usize>,
    frames: broadcast::Sender<String>,
}

impl<C: MeetingControl> Hub<C> {
    /// Create a hub and the pump that delivers its updates.
    pub fn new(config: &HubConfig, control: C) -> (Self, HubPump) {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (clients_tx, clients_rx) = watch::channel(0);
        let (frames, _) = broadcast::channel(config.broadcast_capacity.max(1));
        let hub = Self {
            store: SliderStore::new(config.sliders.clone()),
            meeting: MeetingState::default(),
            control,
            queue: queue_tx,
            clients: clients_tx,
            frames: frames.clone(),
        };
        let pump = HubPump {
            queue: queue_rx,
            clients: clients_rx,
            frames,
        };
        (hub, pump)
    }

    /// Receive frames the pump delivers.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.frames.subscribe()
    }

    /// A panel connected: count it and replay the full state to everyone.
    pub fn connect(&mut self) {
        self.clients.send_modify(|n| *n += 1);
        tracing::info!(clients = self.client_count(), "client connected");
        for update in self.meeting.updates() {
            self.enqueue(update);
        }
        let replay: Vec<Inbound> = self.store.replay().collect();
        for update in replay {
            self.enqueue(update);
        }
    }

    pub fn disconnect(&mut self) {
        self.clients.send_modify(|n| *n = n.saturating_sub(1));
        tracing::info!(clients = self.client_count(), "client disconnected");
    }

    pub fn client_count(&self) -> usize {
        *self.clients.borrow()
    }

    pub fn sliders(&self) -> &SliderStore {
        &self.store
    }

    pub fn meeting(&self) -> MeetingState {
        self.meeting
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Decode and handle a frame from a panel.
    pub fn handle_frame(&mut self, frame: &str) -> Result<(), HubError> {
        let event = Outbound::decode(frame)?;
        self.handle_event(event)
    }

    /// Handle a panel event. A `mic` toggle mutes or unmutes, a `cam` toggle
    /// switches video. A change to a known slider is stored and rebroadcast.
    pub fn handle_event(&mut self, event: Outbound) -> Result<(), HubError> {
        match event {
            Outbound::ButtonToggle { id } => match id.as_str() {
                "mic" => self.control.toggle_mute()?,
                "cam" => self.control.toggle_video()?,
                other => tracing::debug!(id = other, "toggle for unmapped button"),
            },
            Outbound::SliderChange { id, value } => {
                if self.store.set(&id, value) {
                    self.enqueue(Inbound::SetSliderValue { id, value });
                } else {
                    tracing::debug!(%id, "change for unknown slider");
                }
            }
        }
        Ok(())
    }

    /// The meeting reported a new state: queue updates for what changed.
    pub fn update_meeting(&mut self, next: MeetingState) {
        for update in self.meeting.diff(&next) {
            self.enqueue(update);
        }
        self.meeting = next;
    }

    /// A hardware control moved: `mic` and `cam` switches drive the meeting.
    pub fn controller_changed(&mut self, control: &str, value: i64) -> Result<(), HubError> {
        match control {
            "mic" => self.control.set_microphone(value != 0)?,
            "cam" => self.control.set_camera(value != 0)?,
            other => tracing::debug!(control = other, value, "unmapped controller input"),
        }
        Ok(())
    }

    fn enqueue(&self, update: Inbound) {
        if self.queue.send(update).is_err() {
            tracing::warn!("update queue closed");
        }
    }
}

impl HubPump {
    /// Deliver queued updates until the hub is dropped and the queue is empty.
    ///
    /// Waits while no panel is connected. A `set-button-state` update also
    /// drives `indicator`.
    pub async fn run(mut self, indicator: &mut impl Indicator) -> Result<(), HubError> {
        loop {
            let ready = self.clients.wait_for(|n| *n > 0).await.is_ok();
            if !ready {
                break;
            }
            let Some(update) = self.queue.recv().await else {
                break;
            };
            let frame = update.encode()?;
            if self.frames.send(frame).is_err() {
                tracing::debug!("no subscribers for update");
            }
            if let Inbound::SetButtonState { id, state } = &update {
                indicator.set_led(id, *state);
            }
        }
        tracing::info!("hub pump stopped");
        Ok(())
    }
}
