//! Button widget: a click target with an on/off visual state.
//!
//! The `on` class on the element mirrors the logical state. Clicking never
//! changes the state by itself; it only posts a [`ButtonPressed`].

use crate::dom::node::NodeId;
use crate::dom::page::button_element_id;
use crate::dom::tree::Document;
use crate::event::handler::EventDispatcher;
use crate::event::input::PointerEvent;
use crate::event::message::ButtonPressed;
use crate::widget::traits::{require_element, Widget, WidgetError};

/// Class that marks a button as on.
pub const ON_CLASS: &str = "on";

/// A toggle button bound to `{name}-button`.
#[derive(Debug, Clone)]
pub struct Button {
    name: String,
    element: NodeId,
    on: bool,
}

impl Button {
    /// Bind a button to its element. The initial state is read from the
    /// element's class list.
    pub fn bind(doc: &Document, name: impl Into<String>) -> Result<Self, WidgetError> {
        let name = name.into();
        let element = require_element(doc, "Button", &name, &button_element_id(&name))?;
        let on = doc.get(element).is_some_and(|data| data.has_class(ON_CLASS));
        Ok(Self { name, element, on })
    }

    /// Logical state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Visual state as shown by the element's class list.
    pub fn visual_on(&self, doc: &Document) -> bool {
        doc.get(self.element).is_some_and(|data| data.has_class(ON_CLASS))
    }

    /// Handle a click whose target is this button or one of its descendants.
    ///
    /// Posts a [`ButtonPressed`]; returns whether the click was for this button.
    pub fn click(&self, doc: &Document, event: &PointerEvent, out: &mut EventDispatcher) -> bool {
        let Some(target) = event.target else {
            return false;
        };
        if !EventDispatcher::bubble_path(doc, target).contains(&self.element) {
            return false;
        }
        out.post(ButtonPressed { button: self.name.clone() }, self.element);
        true
    }

    /// Set the state; the `on` class is forced to match. Posts nothing.
    pub fn set_state(&mut self, doc: &mut Document, on: bool) {
        self.on = on;
        if let Some(data) = doc.get_mut(self.element) {
            data.set_class(ON_CLASS, on);
        }
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &'static str {
        "Button"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn describe(&self, _doc: &Document) -> String {
        format!("button {}: {}", self.name, if self.on { "on" } else { "off" })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
