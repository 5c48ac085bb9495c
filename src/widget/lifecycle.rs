//! Widget lifecycle: which elements have a live widget.
//!
//! A panel mounts a widget when it binds one and unmounts every widget on
//! dispose. The tracker keeps the widget name per element and queues events
//! for the owner to drain.

use std::collections::HashMap;

use crate::dom::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget was bound to its element.
    Mounted { name: String, element: NodeId },
    /// A widget was detached from its element.
    Unmounted { name: String, element: NodeId },
}

/// Mounted widgets by element, plus pending events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    mounted: HashMap<NodeId, String>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that widget `name` was bound to `element`.
    ///
    /// Mounting an element that already has a widget changes nothing.
    pub fn on_mount(&mut self, element: NodeId, name: &str) {
        if self.mounted.contains_key(&element) {
            return;
        }
        self.mounted.insert(element, name.to_owned());
        self.pending.push(LifecycleEvent::Mounted {
            name: name.to_owned(),
            element,
        });
    }

    /// Record that the widget on `element` was detached. Unknown elements are
    /// ignored.
    pub fn on_unmount(&mut self, element: NodeId) {
        if let Some(name) = self.mounted.remove(&element) {
            self.pending.push(LifecycleEvent::Unmounted { name, element });
        }
    }

    pub fn is_mounted(&self, element: NodeId) -> bool {
        self.mounted.contains_key(&element)
    }

    /// Name of the widget on `element`.
    pub fn widget_on(&self, element: NodeId) -> Option<&str> {
        self.mounted.get(&element).map(String::as_str)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain pending events, oldest first.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
