//! Hardware controller: a serial device with two switches, a knob and two
//! LEDs, speaking a line protocol.
//!
//! Opening the serial port is left to the host. [`DeviceLink`] takes status
//! lines in and writes command lines out through a [`Transport`].

pub mod command;
pub mod controller;
pub mod lexer;
pub mod state;

use thiserror::Error;

use crate::bridge::transport::Transport;
use crate::bridge::BridgeError;
use crate::hub::Indicator;

pub use command::Command;
pub use controller::{control_name, Controller};
pub use lexer::{parse_line, Reading};
pub use state::{DeviceState, Input};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("malformed status token '{token}'")]
    Malformed { token: String },
    #[error(transparent)]
    Link(#[from] BridgeError),
}

/// A controller session over a line transport.
pub struct DeviceLink {
    controller: Controller,
    port: Box<dyn Transport + Send>,
}

impl DeviceLink {
    pub fn new(port: impl Transport + Send + 'static) -> Self {
        Self {
            controller: Controller::new(),
            port: Box::new(port),
        }
    }

    /// Ask for continuous reports and an immediate snapshot.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        for command in Command::session_start() {
            self.send(command)?;
        }
        tracing::info!("controller session started");
        Ok(())
    }

    pub fn send(&mut self, command: Command) -> Result<(), DeviceError> {
        tracing::debug!(%command, "controller command");
        self.port.send(command.to_line())?;
        Ok(())
    }

    /// Apply a status line; returns changed controls by panel name.
    pub fn receive_line(&mut self, line: &str) -> Result<Vec<(&'static str, i64)>, DeviceError> {
        self.controller.receive_line(line)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

impl std::fmt::Debug for DeviceLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceLink")
            .field("controller", &self.controller)
            .finish()
    }
}

impl Indicator for DeviceLink {
    fn set_led(&mut self, name: &str, on: bool) {
        let Some(command) = self.controller.led(name, on) else {
            tracing::debug!(name, "no LED for control");
            return;
        };
        if let Err(err) = self.send(command) {
            tracing::warn!(error = %err, name, "LED command failed");
        }
    }
}
