//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Panel`](crate::panel::Panel) the way a user
//! and a hub would, without a browser or a socket. Use [`panel_to_string`]
//! and [`outbound_to_string`] to capture state as plain text for snapshot
//! assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{standard_page, Pilot};
pub use snapshot::{outbound_to_string, panel_to_string};
