//! Panel: the composition root.
//!
//! [`Panel`] owns the document, the widget registry, the message dispatcher
//! and the bridge. Input goes in through [`Panel::handle_input`], widgets post
//! messages, and [`Panel::handle_messages`] turns user changes into outbound
//! frames. Inbound frames go the other way through the registry and never
//! produce outbound traffic.

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::bridge::protocol::{Inbound, Outbound};
use crate::bridge::registry::{Dispatch, RegistryError, WidgetRegistry};
use crate::bridge::transport::{Bridge, Transport};
use crate::bridge::BridgeError;
use crate::dom::tree::Document;
use crate::event::handler::EventDispatcher;
use crate::event::input::{InputEvent, PointerEvent, PointerKind};
use crate::event::message::{ButtonPressed, ChangeOrigin, SliderChanged};
use crate::widget::lifecycle::LifecycleTracker;
use crate::widget::traits::{Widget, WidgetError};
use crate::widgets::{Button, Led, ProgrammaticNotify, Slider};

// ---------------------------------------------------------------------------
// PanelConfig
// ---------------------------------------------------------------------------

/// Who decides a button's next state after a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleAuthority {
    /// Flip locally right after sending the toggle request.
    #[default]
    Optimistic,
    /// Leave the state alone until the hub pushes `set-button-state`.
    ServerAuthoritative,
}

/// Panel behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Send `slider-change` frames for user drags.
    pub forward_slider_changes: bool,
    pub toggle_authority: ToggleAuthority,
    /// Policy applied to every slider added after construction.
    pub programmatic_notify: ProgrammaticNotify,
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward user slider drags to the hub (builder).
    pub fn with_forward_slider_changes(mut self, forward: bool) -> Self {
        self.forward_slider_changes = forward;
        self
    }

    /// Set the toggle authority (builder).
    pub fn with_toggle_authority(mut self, authority: ToggleAuthority) -> Self {
        self.toggle_authority = authority;
        self
    }

    /// Set the slider notification policy (builder).
    pub fn with_programmatic_notify(mut self, notify: ProgrammaticNotify) -> Self {
        self.programmatic_notify = notify;
        self
    }
}

// ---------------------------------------------------------------------------
// Errors and state
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("panel is disposed")]
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Running,
    Disposed,
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// A control panel: widgets bound to a document, wired to a bridge.
#[derive(Debug)]
pub struct Panel {
    document: Document,
    registry: WidgetRegistry,
    dispatcher: EventDispatcher,
    bridge: Bridge,
    lifecycle: LifecycleTracker,
    config: PanelConfig,
    changes: Vec<SliderChanged>,
    state: PanelState,
}

impl Panel {
    /// Create a running panel with no widgets.
    pub fn new(document: Document, config: PanelConfig, transport: impl Transport + 'static) -> Self {
        tracing::info!(?config, "panel created");
        Self {
            document,
            registry: WidgetRegistry::new(),
            dispatcher: EventDispatcher::new(),
            bridge: Bridge::new(transport),
            lifecycle: LifecycleTracker::new(),
            config,
            changes: Vec::new(),
            state: PanelState::Running,
        }
    }

    fn ensure_running(&self) -> Result<(), PanelError> {
        match self.state {
            PanelState::Running => Ok(()),
            PanelState::Disposed => Err(PanelError::Disposed),
        }
    }

    /// Bind and register the slider `name`.
    pub fn add_slider(&mut self, name: &str) -> Result<(), PanelError> {
        self.ensure_running()?;
        let slider = Slider::bind(&self.document, name)?.with_notify(self.config.programmatic_notify);
        let element = slider.element();
        self.registry.register_slider(slider)?;
        self.lifecycle.on_mount(element, name);
        Ok(())
    }

    /// Bind and register the button `name`.
    pub fn add_button(&mut self, name: &str) -> Result<(), PanelError> {
        self.ensure_running()?;
        let button = Button::bind(&self.document, name)?;
        let element = button.element();
        self.registry.register_button(button)?;
        self.lifecycle.on_mount(element, name);
        Ok(())
    }

    /// Bind and register the status light `name`.
    pub fn add_led(&mut self, name: &str) -> Result<(), PanelError> {
        self.ensure_running()?;
        let led = Led::bind(&self.document, name)?;
        let element = led.element();
        self.registry.register_led(led)?;
        self.lifecycle.on_mount(element, name);
        Ok(())
    }

    /// Route one input event to the widgets.
    ///
    /// Pointer down goes to the slider whose handle is the target. Move and up
    /// go to every slider, the way document-level listeners would. Click goes
    /// to the button on the target's bubble path. A pointer event without a
    /// target is hit-tested against the page as currently drawn, so a moved
    /// handle is found where it now sits. Returns whether a widget prevented
    /// the default action.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if self.state == PanelState::Disposed {
            return false;
        }
        match event {
            InputEvent::Pointer(mut pointer) => {
                if pointer.target.is_none() {
                    self.document.refresh_layout();
                    pointer.target = self.document.hit_test(pointer.client);
                }
                self.handle_pointer(&mut pointer);
                pointer.default_prevented()
            }
            InputEvent::Resize { width, height } => {
                self.document.layout(width, height);
                false
            }
        }
    }

    fn handle_pointer(&mut self, pointer: &mut PointerEvent) {
        match pointer.kind {
            PointerKind::Down => {
                let target = pointer.target;
                if let Some(slider) = self.registry.sliders_mut().find(|s| Some(s.handle()) == target) {
                    slider.pointer_down(&self.document, pointer);
                }
            }
            PointerKind::Move => {
                for slider in self.registry.sliders_mut() {
                    slider.pointer_move(&mut self.document, pointer, &mut self.dispatcher);
                }
            }
            PointerKind::Up => {
                for slider in self.registry.sliders_mut() {
                    slider.pointer_up();
                }
            }
            PointerKind::Click => {
                for button in self.registry.buttons() {
                    if button.click(&self.document, pointer, &mut self.dispatcher) {
                        break;
                    }
                }
            }
        }
    }

    /// Process every pending widget message.
    ///
    /// A pressed button sends `button-toggle` and, under
    /// [`ToggleAuthority::Optimistic`], flips locally. User slider changes are
    /// sent only when `forward_slider_changes` is set. Every slider change is
    /// recorded for [`take_changes`](Self::take_changes). All messages are
    /// processed even if a send fails; the first failure is returned.
    pub fn handle_messages(&mut self) -> Result<usize, PanelError> {
        let messages = self.dispatcher.drain();
        let count = messages.len();
        let mut first_error = None;

        for envelope in messages {
            let sent = if let Some(pressed) = envelope.downcast_ref::<ButtonPressed>() {
                self.button_pressed(&pressed.button)
            } else if let Some(changed) = envelope.downcast_ref::<SliderChanged>() {
                self.slider_changed(changed.clone())
            } else {
                Ok(())
            };
            if let Err(err) = sent {
                tracing::warn!(error = %err, "outbound send failed");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(count),
        }
    }

    fn button_pressed(&mut self, name: &str) -> Result<(), BridgeError> {
        let sent = self.bridge.emit(&Outbound::ButtonToggle { id: name.to_owned() });
        if self.config.toggle_authority == ToggleAuthority::Optimistic {
            if let Some(button) = self.registry.button_mut(name) {
                let next = !button.is_on();
                button.set_state(&mut self.document, next);
            }
        }
        sent
    }

    fn slider_changed(&mut self, changed: SliderChanged) -> Result<(), BridgeError> {
        let forward = changed.origin == ChangeOrigin::User && self.config.forward_slider_changes;
        let outbound = forward.then(|| Outbound::SliderChange {
            id: changed.slider.clone(),
            value: changed.value,
        });
        self.changes.push(changed);
        match outbound {
            Some(event) => self.bridge.emit(&event),
            None => Ok(()),
        }
    }

    /// Apply a server push to the widget it names.
    pub fn apply_inbound(&mut self, event: &Inbound) -> Result<Dispatch, PanelError> {
        self.ensure_running()?;
        Ok(self.registry.dispatch(&mut self.document, event, &mut self.dispatcher))
    }

    /// Decode a text frame and apply it.
    pub fn receive_frame(&mut self, frame: &str) -> Result<Dispatch, PanelError> {
        self.ensure_running()?;
        let event = Inbound::decode(frame)?;
        self.apply_inbound(&event)
    }

    /// Slider changes recorded since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<SliderChanged> {
        std::mem::take(&mut self.changes)
    }

    /// Detach every widget and stop accepting input. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == PanelState::Disposed {
            return;
        }
        for element in self.registry.widgets().iter().map(|w| w.element()) {
            self.lifecycle.on_unmount(element);
        }
        self.registry.clear();
        self.dispatcher.drain();
        self.state = PanelState::Disposed;
        tracing::info!(frames_sent = self.bridge.sent_count(), "panel disposed");
    }

    /// Drive the panel from input and frame channels until both close or the
    /// panel is disposed.
    ///
    /// Malformed frames are logged and dropped. A transport failure ends the
    /// loop with an error.
    pub async fn run(
        &mut self,
        mut inputs: mpsc::Receiver<InputEvent>,
        mut frames: mpsc::Receiver<String>,
    ) -> Result<(), PanelError> {
        let mut inputs_open = true;
        let mut frames_open = true;

        while self.state == PanelState::Running && (inputs_open || frames_open) {
            tokio::select! {
                event = inputs.recv(), if inputs_open => match event {
                    Some(event) => {
                        self.handle_input(event);
                    }
                    None => inputs_open = false,
                },
                frame = frames.recv(), if frames_open => match frame {
                    Some(frame) => match self.receive_frame(&frame) {
                        Ok(_) => {}
                        Err(PanelError::Bridge(err)) => {
                            tracing::warn!(error = %err, %frame, "dropping inbound frame");
                        }
                        Err(err) => return Err(err),
                    },
                    None => frames_open = false,
                },
            }
            self.handle_messages()?;
        }
        Ok(())
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    /// Messages waiting for [`handle_messages`](Self::handle_messages).
    pub fn pending_messages(&self) -> usize {
        self.dispatcher.pending_count()
    }

    /// Frames sent through the bridge so far.
    pub fn frames_sent(&self) -> u64 {
        self.bridge.sent_count()
    }

    /// One line per widget describing its current state.
    pub fn describe(&self) -> Vec<String> {
        self.registry
            .widgets()
            .iter()
            .map(|w| w.describe(&self.document))
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::transport::RecordingTransport;
    use crate::dom::page::PageBuilder;
    use crate::geometry::Point;
    use pretty_assertions::assert_eq;

    const TRACK_TOP: f32 = 16.0;

    fn panel_with(config: PanelConfig) -> (Panel, RecordingTransport) {
        let doc = PageBuilder::new()
            .slider("vol")
            .slider("bright")
            .button("mic")
            .button("cam")
            .build(800.0, 600.0);
        let recorder = RecordingTransport::new();
        let mut panel = Panel::new(doc, config, recorder.clone());
        for name in ["vol", "bright"] {
            panel.add_slider(name).unwrap();
        }
        for name in ["mic", "cam"] {
            panel.add_button(name).unwrap();
        }
        (panel, recorder)
    }

    fn element(panel: &Panel, id: &str) -> crate::dom::node::NodeId {
        panel.document().get_element_by_id(id).unwrap()
    }

    fn drag(panel: &mut Panel, slider: &str, to_y: f32) {
        let handle = element(panel, &format!("{slider}_sliderHandle"));
        let down = PointerEvent::new(PointerKind::Down, Point::new(0.0, 0.0)).with_target(handle);
        assert!(panel.handle_input(down.into()));
        panel.handle_input(PointerEvent::new(PointerKind::Move, Point::new(0.0, to_y)).into());
        panel.handle_input(PointerEvent::new(PointerKind::Up, Point::new(0.0, to_y)).into());
    }

    fn sent(recorder: &RecordingTransport) -> Vec<Outbound> {
        recorder
            .frames()
            .iter()
            .map(|f| Outbound::decode(f).unwrap())
            .collect()
    }

    #[test]
    fn config_defaults() {
        let config = PanelConfig::default();
        assert!(!config.forward_slider_changes);
        assert_eq!(config.toggle_authority, ToggleAuthority::Optimistic);
        assert_eq!(config.programmatic_notify, ProgrammaticNotify::Once);
    }

    #[test]
    fn add_missing_widget_fails() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        assert!(matches!(panel.add_slider("treble"), Err(PanelError::Widget(_))));
        assert!(matches!(panel.add_button("mic"), Err(PanelError::Registry(_))));
        assert_eq!(panel.lifecycle().mounted_count(), 4);
    }

    #[test]
    fn drag_is_recorded_but_not_sent_by_default() {
        let (mut panel, recorder) = panel_with(PanelConfig::default());
        drag(&mut panel, "vol", TRACK_TOP + 50.0);
        assert_eq!(panel.handle_messages().unwrap(), 1);

        let changes = panel.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].value, 75.0);
        assert_eq!(changes[0].origin, ChangeOrigin::User);
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn drag_is_sent_when_forwarding() {
        let config = PanelConfig::new().with_forward_slider_changes(true);
        let (mut panel, recorder) = panel_with(config);
        drag(&mut panel, "vol", TRACK_TOP + 50.0);
        panel.handle_messages().unwrap();
        assert_eq!(
            sent(&recorder),
            vec![Outbound::SliderChange { id: "vol".into(), value: 75.0 }]
        );
    }

    #[test]
    fn move_without_drag_does_nothing() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        let consumed =
            panel.handle_input(PointerEvent::new(PointerKind::Move, Point::new(0.0, 100.0)).into());
        assert!(!consumed);
        assert_eq!(panel.pending_messages(), 0);
    }

    #[test]
    fn pointer_down_is_hit_tested_when_untargeted() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        let handle = element(&panel, "vol_sliderHandle");
        let rect = panel.document().bounding_client_rect(handle).unwrap();
        let at = Point::new(rect.x + 1.0, rect.y + 1.0);
        assert!(panel.handle_input(PointerEvent::new(PointerKind::Down, at).into()));
        assert!(panel.registry().slider("vol").unwrap().is_dragging());
        assert!(!panel.registry().slider("bright").unwrap().is_dragging());
    }

    #[test]
    fn untargeted_press_finds_the_handle_where_it_was_moved() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        let track = element(&panel, "vol_sliderContainer");
        let rect = panel.document().bounding_client_rect(track).unwrap();
        let x = rect.x + rect.width / 2.0;
        drag(&mut panel, "vol", rect.top() + 100.0);
        assert!(!panel.registry().slider("vol").unwrap().is_dragging());

        let old_spot = PointerEvent::new(PointerKind::Down, Point::new(x, rect.top() + 1.0));
        assert!(!panel.handle_input(old_spot.into()));
        assert!(!panel.registry().slider("vol").unwrap().is_dragging());

        let on_handle = PointerEvent::new(PointerKind::Down, Point::new(x, rect.top() + 101.0));
        assert!(panel.handle_input(on_handle.into()));
        assert!(panel.registry().slider("vol").unwrap().is_dragging());
    }

    #[test]
    fn untargeted_press_follows_a_server_push() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        let track = element(&panel, "bright_sliderContainer");
        let rect = panel.document().bounding_client_rect(track).unwrap();
        panel
            .apply_inbound(&Inbound::SetSliderValue { id: "bright".into(), value: 0.0 })
            .unwrap();

        let at = Point::new(rect.x + rect.width / 2.0, rect.top() + 205.0);
        assert!(panel.handle_input(PointerEvent::new(PointerKind::Down, at).into()));
        assert!(panel.registry().slider("bright").unwrap().is_dragging());
    }

    #[test]
    fn click_sends_toggle_and_flips_optimistically() {
        let (mut panel, recorder) = panel_with(PanelConfig::default());
        let mic = element(&panel, "mic-button");
        panel.handle_input(PointerEvent::new(PointerKind::Click, Point::default()).with_target(mic).into());
        panel.handle_messages().unwrap();

        assert_eq!(sent(&recorder), vec![Outbound::ButtonToggle { id: "mic".into() }]);
        assert!(panel.registry().button("mic").unwrap().is_on());
        assert!(!panel.registry().button("cam").unwrap().is_on());
    }

    #[test]
    fn server_authoritative_click_waits_for_push() {
        let config = PanelConfig::new().with_toggle_authority(ToggleAuthority::ServerAuthoritative);
        let (mut panel, recorder) = panel_with(config);
        let cam = element(&panel, "cam-button");
        panel.handle_input(PointerEvent::new(PointerKind::Click, Point::default()).with_target(cam).into());
        panel.handle_messages().unwrap();
        assert_eq!(recorder.frames().len(), 1);
        assert!(!panel.registry().button("cam").unwrap().is_on());

        panel
            .receive_frame(r#"{"event":"set-button-state","data":{"id":"cam","state":true}}"#)
            .unwrap();
        assert!(panel.registry().button("cam").unwrap().is_on());
        assert_eq!(recorder.frames().len(), 1);
    }

    #[test]
    fn inbound_slider_value_is_never_forwarded() {
        let config = PanelConfig::new().with_forward_slider_changes(true);
        let (mut panel, recorder) = panel_with(config);
        let outcome = panel
            .receive_frame(r#"{"event":"set-slider-value","data":{"id":"vol","value":150}}"#)
            .unwrap();
        assert_eq!(outcome, Dispatch::Applied);
        panel.handle_messages().unwrap();

        let changes = panel.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].value, 100.0);
        assert_eq!(changes[0].origin, ChangeOrigin::Programmatic);
        assert!(recorder.frames().is_empty());

        let vol = panel.registry().slider("vol").unwrap();
        assert_eq!(vol.offset(panel.document()), 0.0);
    }

    #[test]
    fn silent_policy_records_nothing() {
        let config = PanelConfig::new().with_programmatic_notify(ProgrammaticNotify::Silent);
        let (mut panel, _) = panel_with(config);
        panel
            .apply_inbound(&Inbound::SetSliderValue { id: "bright".into(), value: 30.0 })
            .unwrap();
        assert_eq!(panel.handle_messages().unwrap(), 0);
        assert!(panel.take_changes().is_empty());
        assert_eq!(panel.registry().slider("bright").unwrap().percentage(), 30.0);
    }

    #[test]
    fn unknown_and_malformed_frames() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        let outcome = panel
            .receive_frame(r#"{"event":"set-button-state","data":{"id":"hand","state":true}}"#)
            .unwrap();
        assert_eq!(outcome, Dispatch::Unknown);
        assert!(matches!(panel.receive_frame("{oops"), Err(PanelError::Bridge(_))));
    }

    #[test]
    fn resize_relayouts_document() {
        let (mut panel, _) = panel_with(PanelConfig::default());
        panel.handle_input(InputEvent::Resize { width: 320.0, height: 240.0 });
        assert_eq!(panel.document().viewport(), (320.0, 240.0));
    }

    #[test]
    fn dispose_detaches_everything() {
        let (mut panel, recorder) = panel_with(PanelConfig::default());
        panel.dispose();
        panel.dispose();
        assert_eq!(panel.state(), PanelState::Disposed);
        assert_eq!(panel.lifecycle().mounted_count(), 0);
        assert!(panel.registry().is_empty());

        let mic = element(&panel, "mic-button");
        let click = PointerEvent::new(PointerKind::Click, Point::default()).with_target(mic);
        assert!(!panel.handle_input(click.into()));
        assert!(matches!(
            panel.receive_frame(r#"{"event":"set-button-state","data":{"id":"mic","state":true}}"#),
            Err(PanelError::Disposed)
        ));
        assert!(matches!(panel.add_button("mic"), Err(PanelError::Disposed)));
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn describe_lists_widgets() {
        let (panel, _) = panel_with(PanelConfig::default());
        assert_eq!(
            panel.describe(),
            vec![
                "slider bright: 0% (offset 0.0px)",
                "slider vol: 0% (offset 0.0px)",
                "button cam: off",
                "button mic: off",
            ]
        );
    }

    #[tokio::test]
    async fn run_processes_inputs_and_frames_until_closed() {
        let (mut panel, recorder) = panel_with(PanelConfig::default());
        let mic = element(&panel, "mic-button");
        let (input_tx, input_rx) = mpsc::channel(8);
        let (frame_tx, frame_rx) = mpsc::channel(8);

        input_tx
            .send(PointerEvent::new(PointerKind::Click, Point::default()).with_target(mic).into())
            .await
            .unwrap();
        frame_tx.send("garbage".to_owned()).await.unwrap();
        frame_tx
            .send(r#"{"event":"set-slider-value","data":{"id":"vol","value":40}}"#.to_owned())
            .await
            .unwrap();
        drop(input_tx);
        drop(frame_tx);

        panel.run(input_rx, frame_rx).await.unwrap();

        assert_eq!(sent(&recorder), vec![Outbound::ButtonToggle { id: "mic".into() }]);
        assert_eq!(panel.registry().slider("vol").unwrap().percentage(), 40.0);
        assert_eq!(panel.take_changes().len(), 1);
    }
}
