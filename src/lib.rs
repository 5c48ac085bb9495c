//! # desk-panel
//!
//! Slider and toggle-button widgets for a desk controller, bound to a headless
//! host document and wired to a hub over a JSON event bridge.
//!
//! A user drags a slider or clicks a button; the widget posts a message; the
//! [`panel`] turns it into an outbound frame. The hub pushes state back; the
//! bridge registry routes it to the widget's programmatic setter, which never
//! echoes it outward.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed element tree, id/class queries, hit testing, page builder
//! - **[`layout`]**: Taffy-powered flex layout writing bounding rects back into the tree
//! - **[`event`]**: Pointer input, widget messages, dispatch queue, bubbling
//! - **[`widget`]**: Widget trait, binding errors, lifecycle tracking
//! - **[`widgets`]**: Slider, Button, Led
//! - **[`bridge`]**: Wire protocol, transports, identifier registry
//! - **[`panel`]**: Composition root and async run loop
//! - **[`hub`]**: Server-side relay with meeting integration and a delivery pump
//! - **[`device`]**: Hardware controller line protocol
//! - **[`config`]**: TOML configuration
//! - **[`telemetry`]**: `tracing` subscriber setup
//! - **[`testing`]**: Headless pilot and snapshot helpers
//! - **[`geometry`]**: Point and Rect primitives

// Foundation
pub mod geometry;

// Document
pub mod dom;
pub mod layout;

// Widget system
pub mod event;
pub mod widget;
pub mod widgets;

// Bridge and composition
pub mod bridge;
pub mod panel;

// Server side
pub mod device;
pub mod hub;

// Ambient
pub mod config;
pub mod telemetry;
pub mod testing;

pub use panel::{Panel, PanelConfig, PanelError, PanelState, ToggleAuthority};
