//! Wire protocol: event names and payload shapes.
//!
//! Every frame is a JSON object `{"event": <name>, "data": {...}}`.
//! [`Outbound`] frames travel from the page to the hub, [`Inbound`] frames
//! from the hub to the page.

use serde::{Deserialize, Serialize};

use super::BridgeError;

/// Events the page sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Outbound {
    /// `button-toggle {id}`: the user clicked a button.
    ButtonToggle { id: String },
    /// `slider-change {id, value}`: the user dragged a slider.
    SliderChange { id: String, value: f64 },
}

/// Events the page receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Inbound {
    /// `set-button-state {id, state}`.
    SetButtonState { id: String, state: bool },
    /// `set-slider-value {id, value}`.
    SetSliderValue { id: String, value: f64 },
    /// `set-led-state {id, state}`: status indicators.
    SetLedState { id: String, state: bool },
}

impl Outbound {
    /// Identifier of the widget this event is about.
    pub fn id(&self) -> &str {
        match self {
            Outbound::ButtonToggle { id } | Outbound::SliderChange { id, .. } => id,
        }
    }

    /// Encode as a JSON text frame.
    pub fn encode(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON text frame.
    pub fn decode(frame: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(frame)?)
    }
}

impl Inbound {
    /// Identifier of the widget this event targets.
    pub fn id(&self) -> &str {
        match self {
            Inbound::SetButtonState { id, .. }
            | Inbound::SetSliderValue { id, .. }
            | Inbound::SetLedState { id, .. } => id,
        }
    }

    /// Encode as a JSON text frame.
    pub fn encode(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON text frame.
    pub fn decode(frame: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn button_toggle_frame_shape() {
        let frame = Outbound::ButtonToggle { id: "mic".into() }.encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value, json!({"event": "button-toggle", "data": {"id": "mic"}}));
    }

    #[test]
    fn slider_change_frame_shape() {
        let frame = Outbound::SliderChange { id: "vol".into(), value: 75.0 }
            .encode()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value, json!({"event": "slider-change", "data": {"id": "vol", "value": 75.0}}));
    }

    #[test]
    fn decodes_server_pushes() {
        assert_eq!(
            Inbound::decode(r#"{"event":"set-button-state","data":{"id":"cam","state":true}}"#)
                .unwrap(),
            Inbound::SetButtonState { id: "cam".into(), state: true }
        );
        // Integer values from the hub decode as percentages.
        assert_eq!(
            Inbound::decode(r#"{"event":"set-slider-value","data":{"id":"vol","value":50}}"#)
                .unwrap(),
            Inbound::SetSliderValue { id: "vol".into(), value: 50.0 }
        );
        assert_eq!(
            Inbound::decode(r#"{"event":"set-led-state","data":{"id":"meeting","state":false}}"#)
                .unwrap(),
            Inbound::SetLedState { id: "meeting".into(), state: false }
        );
    }

    #[test]
    fn rejects_unknown_event() {
        let err = Inbound::decode(r#"{"event":"reboot","data":{}}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Malformed(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(Inbound::decode(r#"{"event":"set-button-state","data":{"id":"mic"}}"#).is_err());
        assert!(Outbound::decode("not json").is_err());
    }

    #[test]
    fn id_accessors() {
        assert_eq!(Outbound::SliderChange { id: "bright".into(), value: 1.0 }.id(), "bright");
        assert_eq!(Inbound::SetLedState { id: "connected".into(), state: true }.id(), "connected");
    }
}
