//! Maps controller inputs onto panel control names.
//!
//! `SW1` is the microphone switch, `SW2` the camera switch and `POT` the
//! volume knob. The LED beside each switch mirrors the matching button.

use super::command::Command;
use super::state::{DeviceState, Input};
use super::DeviceError;

/// Panel control name for an input.
pub fn control_name(input: Input) -> &'static str {
    match input {
        Input::Switch1 => "mic",
        Input::Switch2 => "cam",
        Input::Pot => "vol",
    }
}

/// Input tracking plus name mapping in both directions.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    state: DeviceState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Apply a status line; returns changed controls by panel name.
    pub fn receive_line(&mut self, line: &str) -> Result<Vec<(&'static str, i64)>, DeviceError> {
        let changed = self.state.apply_line(line)?;
        Ok(changed
            .into_iter()
            .map(|(input, value)| (control_name(input), value))
            .collect())
    }

    /// LED command for the switch mapped to `name`. `None` when no switch
    /// maps to it.
    pub fn led(&self, name: &str, on: bool) -> Option<Command> {
        let index = Input::ALL
            .into_iter()
            .filter(|input| control_name(*input) == name)
            .find_map(Input::led_index)?;
        Some(Command::Led { index, on })
    }
}
