//! Commands the controller firmware accepts. One per line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `LED{n}={0|1}`
    Led { index: u8, on: bool },
    /// `GET`: report every input now.
    Get,
    /// `CONT={0|1}`: report inputs whenever they change.
    Continuous(bool),
    /// `TEST={0|1}`: firmware self-test mode.
    Test(bool),
}

impl Command {
    /// The command with its line terminator.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }

    /// Commands that open a session: continuous reporting, then a snapshot.
    pub fn session_start() -> [Command; 2] {
        [Command::Continuous(true), Command::Get]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Led { index, on } => write!(f, "LED{index}={}", u8::from(*on)),
            Command::Get => f.write_str("GET"),
            Command::Continuous(on) => write!(f, "CONT={}", u8::from(*on)),
            Command::Test(on) => write!(f, "TEST={}", u8::from(*on)),
        }
    }
}
