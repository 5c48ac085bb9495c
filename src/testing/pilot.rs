//! Pilot: programmatic interaction with a headless panel.
//!
//! The `Pilot` builds a page, binds a [`Panel`] to it with a
//! [`RecordingTransport`], and provides methods to simulate pointer input,
//! push hub frames, process messages, and read back what was sent.

use crate::bridge::protocol::{Inbound, Outbound};
use crate::bridge::registry::Dispatch;
use crate::bridge::transport::RecordingTransport;
use crate::dom::node::NodeId;
use crate::dom::page::{button_element_id, slider_container_id, slider_handle_id, PageBuilder};
use crate::event::input::{InputEvent, PointerEvent, PointerKind, PointerSource};
use crate::geometry::Point;
use crate::panel::{Panel, PanelConfig, PanelError};

/// Viewport used for every pilot page.
pub const VIEWPORT: (f32, f32) = (800.0, 600.0);

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// The standard page: `vol` and `bright` sliders, `mic` and `cam` buttons,
/// `connected` and `meeting` lights.
pub fn standard_page() -> PageBuilder {
    PageBuilder::new()
        .slider("vol")
        .slider("bright")
        .button("mic")
        .button("cam")
        .led("connected")
        .led("meeting")
}

/// A headless panel driver for testing.
///
/// # Examples
///
/// ```ignore
/// use desk_panel::testing::Pilot;
///
/// let mut pilot = Pilot::standard()?;
/// pilot.click_button("mic");
/// pilot.process().unwrap();
/// assert_eq!(pilot.sent().len(), 1);
/// ```
pub struct Pilot {
    panel: Panel,
    transport: RecordingTransport,
}

impl Pilot {
    /// Build `page` and bind every widget on it.
    pub fn new(page: &PageBuilder, config: PanelConfig) -> Result<Self, PanelError> {
        let transport = RecordingTransport::new();
        let document = page.build(VIEWPORT.0, VIEWPORT.1);
        let mut panel = Panel::new(document, config, transport.clone());
        for name in page.slider_names() {
            panel.add_slider(name)?;
        }
        for name in page.button_names() {
            panel.add_button(name)?;
        }
        for name in page.led_names() {
            panel.add_led(name)?;
        }
        Ok(Self { panel, transport })
    }

    /// The standard page with default config.
    pub fn standard() -> Result<Self, PanelError> {
        Self::standard_with(PanelConfig::default())
    }

    /// The standard page driven with `config`.
    pub fn standard_with(config: PanelConfig) -> Result<Self, PanelError> {
        Self::new(&standard_page(), config)
    }

    fn element(&self, id: &str) -> Option<NodeId> {
        self.panel.document().get_element_by_id(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Drag a slider's handle to `offset` pixels below the top of its track,
    /// with a mouse. Returns `false` if the slider is not on the page.
    pub fn drag_slider(&mut self, name: &str, offset: f32) -> bool {
        self.drag_slider_with(name, offset, PointerSource::Mouse)
    }

    /// Drag as [`drag_slider`](Self::drag_slider) does, from the given device.
    pub fn drag_slider_with(&mut self, name: &str, offset: f32, source: PointerSource) -> bool {
        let (Some(track), Some(handle)) = (
            self.element(&slider_container_id(name)),
            self.element(&slider_handle_id(name)),
        ) else {
            return false;
        };
        let Some(rect) = self.panel.document().bounding_client_rect(track) else {
            return false;
        };
        let at = Point::new(rect.x + rect.width / 2.0, rect.top() + offset);
        let pointer = |kind| PointerEvent::new(kind, at).with_source(source);

        self.panel.handle_input(pointer(PointerKind::Down).with_target(handle).into());
        self.panel.handle_input(pointer(PointerKind::Move).into());
        self.panel.handle_input(pointer(PointerKind::Up).into());
        true
    }

    /// Click a button. Returns `false` if the button is not on the page.
    pub fn click_button(&mut self, name: &str) -> bool {
        let Some(element) = self.element(&button_element_id(name)) else {
            return false;
        };
        let click = PointerEvent::new(PointerKind::Click, Point::default()).with_target(element);
        self.panel.handle_input(click.into());
        true
    }

    /// Click whatever is at `point`.
    pub fn click_at(&mut self, point: Point) {
        self.panel
            .handle_input(PointerEvent::new(PointerKind::Click, point).into());
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.panel.handle_input(InputEvent::Resize { width, height });
    }

    // ── Hub simulation ───────────────────────────────────────────────

    /// Deliver a raw frame from the hub.
    pub fn push_frame(&mut self, frame: &str) -> Result<Dispatch, PanelError> {
        self.panel.receive_frame(frame)
    }

    /// Deliver an event from the hub.
    pub fn push_inbound(&mut self, event: Inbound) -> Result<Dispatch, PanelError> {
        self.panel.apply_inbound(&event)
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Process all pending widget messages.
    pub fn process(&mut self) -> Result<usize, PanelError> {
        self.panel.handle_messages()
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Outbound events sent so far, oldest first.
    pub fn sent(&self) -> Vec<Outbound> {
        self.transport
            .frames()
            .iter()
            .filter_map(|frame| Outbound::decode(frame).ok())
            .collect()
    }

    /// Raw frames sent so far.
    pub fn sent_frames(&self) -> Vec<String> {
        self.transport.frames()
    }

    /// Forget everything sent so far.
    pub fn clear_sent(&mut self) {
        self.transport.take();
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Plain-text state of every widget.
    pub fn snapshot(&self) -> String {
        super::snapshot::panel_to_string(&self.panel)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
