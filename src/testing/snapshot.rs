//! Snapshot rendering helpers.
//!
//! Functions for converting panel state and outbound traffic into plain-text
//! strings suitable for snapshot testing and assertions.

use crate::bridge::protocol::Outbound;
use crate::panel::Panel;

/// One line per widget: lights, then sliders, then buttons.
///
/// Lines are separated by `'\n'`. The final line does not have a trailing
/// newline.
pub fn panel_to_string(panel: &Panel) -> String {
    panel.describe().join("\n")
}

/// One line per outbound event, e.g. `button-toggle mic` or
/// `slider-change vol 75`.
pub fn outbound_to_string(events: &[Outbound]) -> String {
    events
        .iter()
        .map(|event| match event {
            Outbound::ButtonToggle { id } => format!("button-toggle {id}"),
            Outbound::SliderChange { id, value } => format!("slider-change {id} {value}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
