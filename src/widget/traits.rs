//! Widget trait and element binding.
//!
//! Widgets do not own elements. They bind to elements that already exist in
//! the host [`Document`] and fail construction when one is missing, so a
//! widget value always refers to a complete set of elements.

use thiserror::Error;

use crate::dom::node::NodeId;
use crate::dom::tree::Document;

/// Errors from binding a widget to its elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("{widget} '{name}': element '{element}' not found")]
    MissingElement {
        widget: &'static str,
        name: String,
        element: String,
    },
}

/// Look up `element_id` for a widget, failing with [`WidgetError::MissingElement`].
pub fn require_element(
    doc: &Document,
    widget: &'static str,
    name: &str,
    element_id: &str,
) -> Result<NodeId, WidgetError> {
    doc.get_element_by_id(element_id)
        .ok_or_else(|| WidgetError::MissingElement {
            widget,
            name: name.to_owned(),
            element: element_id.to_owned(),
        })
}

/// Core trait implemented by the built-in widgets.
pub trait Widget {
    /// Widget type name (e.g. "Slider", "Button").
    fn widget_type(&self) -> &'static str;

    /// Identifier the widget was bound with; also its bridge identifier.
    fn name(&self) -> &str;

    /// The outermost element the widget is bound to.
    fn element(&self) -> NodeId;

    /// One-line summary of the widget's current state.
    fn describe(&self, doc: &Document) -> String;
}
