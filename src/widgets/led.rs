//! Led widget: a read-only status light driven by the hub.

use crate::dom::node::NodeId;
use crate::dom::page::led_element_id;
use crate::dom::tree::Document;
use crate::widget::traits::{require_element, Widget, WidgetError};

use super::button::ON_CLASS;

/// A status light bound to `{name}-led`. It has no input handling.
#[derive(Debug, Clone)]
pub struct Led {
    name: String,
    element: NodeId,
    lit: bool,
}

impl Led {
    /// Bind a light to its element.
    pub fn bind(doc: &Document, name: impl Into<String>) -> Result<Self, WidgetError> {
        let name = name.into();
        let element = require_element(doc, "Led", &name, &led_element_id(&name))?;
        let lit = doc.get(element).is_some_and(|data| data.has_class(ON_CLASS));
        Ok(Self { name, element, lit })
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Light or clear the indicator.
    pub fn set_state(&mut self, doc: &mut Document, lit: bool) {
        self.lit = lit;
        if let Some(data) = doc.get_mut(self.element) {
            data.set_class(ON_CLASS, lit);
        }
    }
}

impl Widget for Led {
    fn widget_type(&self) -> &'static str {
        "Led"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> NodeId {
        self.element
    }

    fn describe(&self, _doc: &Document) -> String {
        format!("led {}: {}", self.name, if self.lit { "lit" } else { "dark" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::page::PageBuilder;

    #[test]
    fn bind_and_light() {
        let mut doc = PageBuilder::new().led("meeting").build(200.0, 200.0);
        let mut led = Led::bind(&doc, "meeting").unwrap();
        assert!(!led.is_lit());
        led.set_state(&mut doc, true);
        assert!(led.is_lit());
        assert!(doc.get(led.element()).unwrap().has_class(ON_CLASS));
        assert_eq!(led.describe(&doc), "led meeting: lit");
    }

    #[test]
    fn bind_missing() {
        let doc = PageBuilder::new().build(200.0, 200.0);
        assert!(Led::bind(&doc, "connected").is_err());
    }
}
