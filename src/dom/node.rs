//! Element identity and per-element data.

use slotmap::new_key_type;

use crate::geometry::Rect;
use crate::layout::BoxStyle;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single element.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element tag name (e.g. "div", "button").
    pub tag: String,
    /// Optional element id, unique within a document by convention.
    pub id: Option<String>,
    /// Class list, never holding duplicates.
    pub classes: Vec<String>,
    /// Box style consumed by the layout pass.
    pub style: BoxStyle,
    /// Bounding client rect computed by the most recent layout pass.
    pub rect: Rect,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and default style.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            style: BoxStyle::default(),
            rect: Rect::ZERO,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.set_class(&class.into(), true);
        self
    }

    /// Replace the box style (builder).
    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Force `class` on or off, like `classList.toggle(class, force)`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        match (on, self.has_class(class)) {
            (true, false) => self.classes.push(class.to_owned()),
            (false, true) => self.classes.retain(|c| c != class),
            _ => {}
        }
    }
}
