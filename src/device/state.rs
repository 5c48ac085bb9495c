//! Last known controller readings.

use std::collections::BTreeMap;
use std::fmt;

use super::lexer::parse_line;
use super::DeviceError;

/// A physical input on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    Switch1,
    Switch2,
    Pot,
}

impl Input {
    pub const ALL: [Input; 3] = [Input::Switch1, Input::Switch2, Input::Pot];

    /// Key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Input::Switch1 => "SW1",
            Input::Switch2 => "SW2",
            Input::Pot => "POT",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|input| input.key() == key)
    }

    /// LED number next to a switch.
    pub fn led_index(self) -> Option<u8> {
        match self {
            Input::Switch1 => Some(1),
            Input::Switch2 => Some(2),
            Input::Pot => None,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Readings seen so far. Inputs start unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    values: BTreeMap<Input, i64>,
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, input: Input) -> Option<i64> {
        self.values.get(&input).copied()
    }

    /// Apply a status line and return the readings that changed, in line
    /// order. Unknown keys are ignored. A malformed line changes nothing.
    pub fn apply_line(&mut self, line: &str) -> Result<Vec<(Input, i64)>, DeviceError> {
        let readings = parse_line(line)?;
        let mut changed = Vec::new();
        for reading in readings {
            let Some(input) = Input::from_key(&reading.key) else {
                tracing::trace!(key = %reading.key, "ignoring unknown key");
                continue;
            };
            if self.values.insert(input, reading.value) != Some(reading.value) {
                changed.push((input, reading.value));
            }
        }
        Ok(changed)
    }
}
