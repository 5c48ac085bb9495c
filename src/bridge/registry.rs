//! Widget registry: widgets by identifier, and inbound dispatch.
//!
//! Sliders, buttons and status lights live in separate namespaces, so a
//! slider and a button may share an identifier. Registering a widget is all
//! it takes for inbound events to reach it.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::dom::tree::Document;
use crate::event::handler::EventDispatcher;
use crate::widget::traits::Widget;
use crate::widgets::{Button, Led, Slider};

use super::protocol::Inbound;

/// Errors from registering widgets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{kind} '{name}' is already registered")]
    Duplicate { kind: &'static str, name: String },
}

/// Outcome of dispatching one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered widget took the update.
    Applied,
    /// No widget of the right kind has that identifier.
    Unknown,
}

/// Widgets keyed by identifier.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    sliders: BTreeMap<String, Slider>,
    buttons: BTreeMap<String, Button>,
    leds: BTreeMap<String, Led>,
}

fn insert_unique<W: Widget>(
    map: &mut BTreeMap<String, W>,
    widget: W,
) -> Result<(), RegistryError> {
    if map.contains_key(widget.name()) {
        return Err(RegistryError::Duplicate {
            kind: widget.widget_type(),
            name: widget.name().to_owned(),
        });
    }
    map.insert(widget.name().to_owned(), widget);
    Ok(())
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_slider(&mut self, slider: Slider) -> Result<(), RegistryError> {
        insert_unique(&mut self.sliders, slider)
    }

    pub fn register_button(&mut self, button: Button) -> Result<(), RegistryError> {
        insert_unique(&mut self.buttons, button)
    }

    pub fn register_led(&mut self, led: Led) -> Result<(), RegistryError> {
        insert_unique(&mut self.leds, led)
    }

    pub fn slider(&self, name: &str) -> Option<&Slider> {
        self.sliders.get(name)
    }

    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.get(name)
    }

    pub fn led(&self, name: &str) -> Option<&Led> {
        self.leds.get(name)
    }

    pub fn slider_mut(&mut self, name: &str) -> Option<&mut Slider> {
        self.sliders.get_mut(name)
    }

    pub fn button_mut(&mut self, name: &str) -> Option<&mut Button> {
        self.buttons.get_mut(name)
    }

    pub fn sliders_mut(&mut self) -> impl Iterator<Item = &mut Slider> {
        self.sliders.values_mut()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.values()
    }

    /// Every registered widget in page order (lights, sliders, buttons), each
    /// group sorted by identifier.
    pub fn widgets(&self) -> Vec<&dyn Widget> {
        let mut all: Vec<&dyn Widget> = Vec::new();
        all.extend(self.leds.values().map(|w| w as &dyn Widget));
        all.extend(self.sliders.values().map(|w| w as &dyn Widget));
        all.extend(self.buttons.values().map(|w| w as &dyn Widget));
        all
    }

    /// Total number of registered widgets.
    pub fn len(&self) -> usize {
        self.sliders.len() + self.buttons.len() + self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every widget.
    pub fn clear(&mut self) {
        self.sliders.clear();
        self.buttons.clear();
        self.leds.clear();
    }

    /// Route an inbound event to the widget it names, through that widget's
    /// programmatic setter.
    pub fn dispatch(
        &mut self,
        doc: &mut Document,
        event: &Inbound,
        out: &mut EventDispatcher,
    ) -> Dispatch {
        let outcome = match event {
            Inbound::SetButtonState { id, state } => match self.buttons.get_mut(id) {
                Some(button) => {
                    button.set_state(doc, *state);
                    Dispatch::Applied
                }
                None => Dispatch::Unknown,
            },
            Inbound::SetSliderValue { id, value } => match self.sliders.get_mut(id) {
                Some(slider) => {
                    slider.set_position(doc, *value, out);
                    Dispatch::Applied
                }
                None => Dispatch::Unknown,
            },
            Inbound::SetLedState { id, state } => match self.leds.get_mut(id) {
                Some(led) => {
                    led.set_state(doc, *state);
                    Dispatch::Applied
                }
                None => Dispatch::Unknown,
            },
        };
        match outcome {
            Dispatch::Applied => tracing::debug!(?event, "applied inbound event"),
            Dispatch::Unknown => tracing::warn!(id = event.id(), "no widget for inbound event"),
        }
        outcome
    }
}
