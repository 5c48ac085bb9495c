//! Meeting client: state, actions, and the mapping onto panel updates.
//!
//! The meeting application speaks its own JSON dialect. Actions go out as
//! `{"action": ..., "parameters": {...}, "requestId": n}`; the application
//! pushes `meetingUpdate` objects, action responses and token refreshes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bridge::protocol::Inbound;
use crate::bridge::transport::Transport;
use crate::bridge::BridgeError;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the hub knows about the meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingState {
    /// The meeting client holds a live connection to the application.
    pub is_ws_connected: bool,
    pub is_in_meeting: bool,
    pub is_video_on: bool,
    pub is_muted: bool,
}

impl MeetingState {
    /// Panel updates describing the whole state.
    ///
    /// The mic button is "on" when the microphone is live, so its state is
    /// the inverse of `is_muted`.
    pub fn updates(&self) -> Vec<Inbound> {
        vec![
            led("connected", self.is_ws_connected),
            led("meeting", self.is_in_meeting),
            button("cam", self.is_video_on),
            button("mic", !self.is_muted),
        ]
    }

    /// Panel updates for the fields that differ in `next`.
    pub fn diff(&self, next: &MeetingState) -> Vec<Inbound> {
        let mut out = Vec::new();
        if self.is_ws_connected != next.is_ws_connected {
            out.push(led("connected", next.is_ws_connected));
        }
        if self.is_in_meeting != next.is_in_meeting {
            out.push(led("meeting", next.is_in_meeting));
        }
        if self.is_video_on != next.is_video_on {
            out.push(button("cam", next.is_video_on));
        }
        if self.is_muted != next.is_muted {
            out.push(button("mic", !next.is_muted));
        }
        out
    }
}

fn led(id: &str, state: bool) -> Inbound {
    Inbound::SetLedState { id: id.to_owned(), state }
}

fn button(id: &str, state: bool) -> Inbound {
    Inbound::SetButtonState { id: id.to_owned(), state }
}

// ---------------------------------------------------------------------------
// Incoming messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingPermissions {
    pub can_pair: bool,
    pub can_toggle_mute: bool,
    pub can_toggle_video: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeetingUpdate {
    pub meeting_state: MeetingState,
    pub meeting_permissions: MeetingPermissions,
}

/// A message pushed by the meeting application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MeetingMessage {
    Update {
        #[serde(rename = "meetingUpdate")]
        update: MeetingUpdate,
    },
    Response {
        #[serde(rename = "requestId")]
        request_id: u64,
        response: String,
    },
    TokenRefresh {
        #[serde(rename = "tokenRefresh")]
        token: String,
    },
}

impl MeetingMessage {
    pub fn decode(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}

// ---------------------------------------------------------------------------
// Outgoing actions
// ---------------------------------------------------------------------------

/// Reactions the meeting application accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Love,
    Applause,
    Wow,
    Laugh,
}

impl Reaction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Love => "love",
            Reaction::Applause => "applause",
            Reaction::Wow => "wow",
            Reaction::Laugh => "laugh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingAction {
    ToggleMute,
    ToggleVideo,
    ToggleHand,
    ToggleBackgroundBlur,
    LeaveCall,
    SendReaction(Reaction),
}

#[derive(Serialize)]
struct ActionFrame<'a> {
    action: &'a str,
    parameters: Map<String, Value>,
    #[serde(rename = "requestId")]
    request_id: u64,
}

impl MeetingAction {
    pub fn name(self) -> &'static str {
        match self {
            MeetingAction::ToggleMute => "toggle-mute",
            MeetingAction::ToggleVideo => "toggle-video",
            MeetingAction::ToggleHand => "toggle-hand",
            MeetingAction::ToggleBackgroundBlur => "toggle-background-blur",
            MeetingAction::LeaveCall => "leave-call",
            MeetingAction::SendReaction(_) => "send-reaction",
        }
    }

    /// Encode with the given request id.
    pub fn encode(self, request_id: u64) -> Result<String, serde_json::Error> {
        let mut parameters = Map::new();
        if let MeetingAction::SendReaction(reaction) = self {
            parameters.insert("type".to_owned(), Value::from(reaction.as_str()));
        }
        serde_json::to_string(&ActionFrame {
            action: self.name(),
            parameters,
            request_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

/// What the hub asks of the meeting.
pub trait MeetingControl {
    fn toggle_mute(&mut self) -> Result<(), BridgeError>;
    fn toggle_video(&mut self) -> Result<(), BridgeError>;
    /// Make the microphone live (`true`) or muted (`false`).
    fn set_microphone(&mut self, on: bool) -> Result<(), BridgeError>;
    fn set_camera(&mut self, on: bool) -> Result<(), BridgeError>;
}

/// Meeting client that writes action frames to a transport and tracks the
/// state the application reports.
pub struct MeetingClient {
    transport: Box<dyn Transport + Send>,
    next_request_id: u64,
    state: MeetingState,
    token: Option<String>,
}

impl MeetingClient {
    pub fn new(transport: impl Transport + Send + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            next_request_id: 1,
            state: MeetingState::default(),
            token: None,
        }
    }

    /// Send an action; returns the request id it was sent with.
    pub fn send(&mut self, action: MeetingAction) -> Result<u64, BridgeError> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.transport.send(action.encode(request_id)?)?;
        tracing::debug!(action = action.name(), request_id, "meeting action");
        Ok(request_id)
    }

    pub fn state(&self) -> MeetingState {
        self.state
    }

    /// Latest token pushed by the application.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Record whether the connection to the application is up.
    pub fn set_connected(&mut self, connected: bool) -> MeetingState {
        self.state.is_ws_connected = connected;
        self.state
    }

    /// Apply a pushed message. Returns the new state for meeting updates.
    pub fn receive(&mut self, message: MeetingMessage) -> Option<MeetingState> {
        match message {
            MeetingMessage::Update { update } => {
                let connected = self.state.is_ws_connected;
                self.state = MeetingState {
                    is_ws_connected: connected,
                    ..update.meeting_state
                };
                Some(self.state)
            }
            MeetingMessage::Response { request_id, response } => {
                tracing::debug!(request_id, %response, "meeting response");
                None
            }
            MeetingMessage::TokenRefresh { token } => {
                tracing::info!("meeting token refreshed");
                self.token = Some(token);
                None
            }
        }
    }
}

impl std::fmt::Debug for MeetingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeetingClient")
            .field("next_request_id", &self.next_request_id)
            .field("state", &self.state)
            .finish()
    }
}

impl MeetingControl for MeetingClient {
    fn toggle_mute(&mut self) -> Result<(), BridgeError> {
        self.send(MeetingAction::ToggleMute).map(drop)
    }

    fn toggle_video(&mut self) -> Result<(), BridgeError> {
        self.send(MeetingAction::ToggleVideo).map(drop)
    }

    fn set_microphone(&mut self, on: bool) -> Result<(), BridgeError> {
        if self.state.is_muted == on {
            self.toggle_mute()?;
        }
        Ok(())
    }

    fn set_camera(&mut self, on: bool) -> Result<(), BridgeError> {
        if self.state.is_video_on != on {
            self.toggle_video()?;
        }
        Ok(())
    }
}
