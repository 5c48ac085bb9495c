//! Input event types: pointer (mouse or touch) and viewport resize.
//!
//! A host forwards its native mouse/touch events as [`PointerEvent`]s. Touch
//! events carry the first touch point, so widgets never distinguish the two
//! beyond [`PointerSource`].

use crate::dom::node::NodeId;
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// PointerKind / PointerSource
// ---------------------------------------------------------------------------

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `mousedown` / `touchstart`.
    Down,
    /// `mousemove` / `touchmove`.
    Move,
    /// `mouseup` / `touchend`.
    Up,
    /// `click`.
    Click,
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

// ---------------------------------------------------------------------------
// PointerEvent
// ---------------------------------------------------------------------------

/// A pointer event delivered to the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub source: PointerSource,
    /// Element the event was dispatched to, if the host resolved one.
    pub target: Option<NodeId>,
    /// Pointer position in viewport coordinates.
    pub client: Point,
    default_prevented: bool,
}

impl PointerEvent {
    /// Create a mouse event of the given kind at `client`.
    pub fn new(kind: PointerKind, client: Point) -> Self {
        Self {
            kind,
            source: PointerSource::Mouse,
            target: None,
            client,
            default_prevented: false,
        }
    }

    /// Set the target element (builder).
    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the source device (builder).
    pub fn with_source(mut self, source: PointerSource) -> Self {
        self.source = source;
        self
    }

    /// Suppress the host's default action (page scrolling on touch devices).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler called [`prevent_default`](Self::prevent_default).
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Resize { width: f32, height: f32 },
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}
