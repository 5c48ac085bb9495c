//! Slider widget: a draggable handle inside a vertical track.
//!
//! The handle's `top` offset runs from 0 (value 100) to the track height
//! (value 0). Values are percentages in `[0, 100]`.

use serde::Deserialize;

use crate::dom::node::NodeId;
use crate::dom::page::{slider_container_id, slider_handle_id};
use crate::dom::tree::Document;
use crate::event::handler::EventDispatcher;
use crate::event::input::PointerEvent;
use crate::event::message::{ChangeOrigin, SliderChanged};
use crate::geometry::Rect;
use crate::widget::traits::{require_element, Widget, WidgetError};

/// Whether a programmatic [`Slider::set_position`] notifies listeners.
///
/// Never more than one notification per call either way. Programmatic
/// notifications are tagged [`ChangeOrigin::Programmatic`], which the panel
/// never forwards to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgrammaticNotify {
    /// Post exactly one change message carrying the clamped value.
    #[default]
    Once,
    /// Post nothing.
    Silent,
}

/// Clamp a requested percentage into `[0, 100]`. NaN becomes 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Percentage for a handle offset: `round(100 * (height - offset) / height)`.
///
/// `None` for a track without height.
pub fn percentage_for_offset(offset: f32, height: f32) -> Option<f64> {
    if height <= 0.0 {
        return None;
    }
    let (offset, height) = (f64::from(offset), f64::from(height));
    Some((100.0 * (height - offset) / height).round())
}

/// Handle offset for a percentage: `height * (1 - percentage / 100)`.
pub fn offset_for_percentage(percentage: f64, height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    (f64::from(height) * (1.0 - percentage / 100.0)) as f32
}

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// A vertical slider bound to `{name}_sliderContainer` and `{name}_sliderHandle`.
#[derive(Debug, Clone)]
pub struct Slider {
    name: String,
    container: NodeId,
    handle: NodeId,
    percentage: f64,
    dragging: bool,
    track: Option<Rect>,
    notify: ProgrammaticNotify,
}

impl Slider {
    /// Bind a slider to its track and handle elements.
    pub fn bind(doc: &Document, name: impl Into<String>) -> Result<Self, WidgetError> {
        let name = name.into();
        let container = require_element(doc, "Slider", &name, &slider_container_id(&name))?;
        let handle = require_element(doc, "Slider", &name, &slider_handle_id(&name))?;
        Ok(Self {
            name,
            container,
            handle,
            percentage: 0.0,
            dragging: false,
            track: None,
            notify: ProgrammaticNotify::default(),
        })
    }

    /// Set the programmatic notification policy (builder).
    pub fn with_notify(mut self, notify: ProgrammaticNotify) -> Self {
        self.notify = notify;
        self
    }

    /// Last value written by a drag or by [`set_position`](Self::set_position).
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The handle element.
    pub fn handle(&self) -> NodeId {
        self.handle
    }

    /// The track rect captured at drag start or first programmatic write.
    pub fn cached_track(&self) -> Option<Rect> {
        self.track
    }

    /// The handle's current `top` offset.
    pub fn offset(&self, doc: &Document) -> f32 {
        doc.style_top(self.handle).unwrap_or(0.0)
    }

    /// Start a drag if the pointer went down exactly on the handle.
    ///
    /// Captures the track's current bounding box. Calling this again without a
    /// pointer up simply re-captures the box.
    pub fn pointer_down(&mut self, doc: &Document, event: &mut PointerEvent) -> bool {
        if event.target != Some(self.handle) {
            return false;
        }
        self.dragging = true;
        self.track = doc.bounding_client_rect(self.container);
        event.prevent_default();
        tracing::debug!(slider = %self.name, track = ?self.track, "drag start");
        true
    }

    /// Follow the pointer while dragging: move the handle and post a
    /// [`SliderChanged`] with [`ChangeOrigin::User`].
    ///
    /// On a track with no height the handle is pinned to 0 and nothing is posted.
    pub fn pointer_move(
        &mut self,
        doc: &mut Document,
        event: &mut PointerEvent,
        out: &mut EventDispatcher,
    ) -> bool {
        if !self.dragging {
            return false;
        }
        let track = self.track.unwrap_or(Rect::ZERO);
        let height = track.height.max(0.0);
        let offset = (event.client.y - track.top()).clamp(0.0, height);
        doc.set_style_top(self.handle, offset);

        if let Some(value) = percentage_for_offset(offset, height) {
            self.percentage = value;
            out.post(
                SliderChanged {
                    slider: self.name.clone(),
                    value,
                    origin: ChangeOrigin::User,
                },
                self.handle,
            );
        }
        event.prevent_default();
        true
    }

    /// End any drag in progress.
    pub fn pointer_up(&mut self) {
        if self.dragging {
            tracing::debug!(slider = %self.name, value = self.percentage, "drag end");
        }
        self.dragging = false;
    }

    /// Move the handle to `percentage`, clamped to `[0, 100]`.
    ///
    /// Uses the cached track box, measuring it only if it was never captured,
    /// so a stale box is reused until the next drag start. Returns the clamped
    /// value; posts at most one [`ChangeOrigin::Programmatic`] message,
    /// depending on the [`ProgrammaticNotify`] policy.
    pub fn set_position(
        &mut self,
        doc: &mut Document,
        percentage: f64,
        out: &mut EventDispatcher,
    ) -> f64 {
        let value = clamp_percentage(percentage);
        if self.track.is_none() {
            self.track = doc.bounding_client_rect(self.container);
        }
        let height = self.track.map_or(0.0, |t| t.height);
        doc.set_style_top(self.handle, offset_for_percentage(value, height));
        self.percentage = value;

        if self.notify == ProgrammaticNotify::Once {
            out.post(
                SliderChanged {
                    slider: self.name.clone(),
                    value,
                    origin: ChangeOrigin::Programmatic,
                },
                self.handle,
            );
        }
        value
    }
}

impl Widget for Slider {
    fn widget_type(&self) -> &'static str {
        "Slider"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn element(&self) -> NodeId {
        self.container
    }

    fn describe(&self, doc: &Document) -> String {
        format!(
            "slider {}: {}% (offset {:.1}px{})",
            self.name,
            self.percentage,
            self.offset(doc),
            if self.dragging { ", dragging" } else { "" }
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::dom::page::PageBuilder;
    use crate::event::input::PointerKind;
    use crate::event::message::Envelope;
    use crate::geometry::Point;
    use crate::layout::BoxStyle;

    const TRACK_TOP: f32 = 16.0;

    fn page(track_height: f32) -> Document {
        PageBuilder::new()
            .slider("vol")
            .track_height(track_height)
            .build(400.0, 600.0)
    }

    fn changes(envelopes: &[Envelope]) -> Vec<SliderChanged> {
        envelopes
            .iter()
            .filter_map(|env| env.downcast_ref::<SliderChanged>().cloned())
            .collect()
    }

    fn down_on(target: NodeId) -> PointerEvent {
        PointerEvent::new(PointerKind::Down, Point::new(0.0, 0.0)).with_target(target)
    }

    fn move_to(y: f32) -> PointerEvent {
        PointerEvent::new(PointerKind::Move, Point::new(0.0, y))
    }

    #[test]
    fn bind_fails_without_container() {
        let mut doc = Document::new();
        doc.insert(NodeData::new("div").with_id("vol_sliderHandle"));
        let err = Slider::bind(&doc, "vol").unwrap_err();
        assert!(err.to_string().contains("vol_sliderContainer"));
    }

    #[test]
    fn bind_fails_without_handle() {
        let mut doc = Document::new();
        doc.insert(NodeData::new("div").with_id("vol_sliderContainer"));
        let err = Slider::bind(&doc, "vol").unwrap_err();
        assert!(err.to_string().contains("vol_sliderHandle"));
    }

    #[test]
    fn bind_fails_for_unknown_name() {
        let doc = page(200.0);
        assert!(Slider::bind(&doc, "bright").is_err());
    }

    #[test]
    fn percentage_formula() {
        assert_eq!(percentage_for_offset(50.0, 200.0), Some(75.0));
        assert_eq!(percentage_for_offset(0.0, 200.0), Some(100.0));
        assert_eq!(percentage_for_offset(200.0, 200.0), Some(0.0));
        assert_eq!(percentage_for_offset(1.0, 200.0), Some(100.0));
        assert_eq!(percentage_for_offset(3.0, 200.0), Some(99.0));
        assert_eq!(percentage_for_offset(10.0, 0.0), None);
    }

    #[test]
    fn clamp_handles_out_of_range_and_nan() {
        assert_eq!(clamp_percentage(150.0), 100.0);
        assert_eq!(clamp_percentage(-3.0), 0.0);
        assert_eq!(clamp_percentage(42.5), 42.5);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
    }

    #[test]
    fn drag_requires_handle_target() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let track = doc.get_element_by_id("vol_sliderContainer").unwrap();

        let mut ev = down_on(track);
        assert!(!slider.pointer_down(&doc, &mut ev));
        assert!(!slider.is_dragging());
        assert!(!ev.default_prevented());

        let mut out = EventDispatcher::new();
        let mut mv = move_to(TRACK_TOP + 50.0);
        assert!(!slider.pointer_move(&mut doc, &mut mv, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn drag_to_offset_50_of_200_gives_75() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();

        let mut down = down_on(slider.handle());
        assert!(slider.pointer_down(&doc, &mut down));
        assert!(down.default_prevented());
        assert_eq!(slider.cached_track().unwrap().height, 200.0);

        let mut mv = move_to(TRACK_TOP + 50.0);
        assert!(slider.pointer_move(&mut doc, &mut mv, &mut out));
        assert!(mv.default_prevented());
        assert_eq!(slider.offset(&doc), 50.0);
        assert_eq!(slider.percentage(), 75.0);

        let posted = changes(&out.drain());
        assert_eq!(
            posted,
            vec![SliderChanged {
                slider: "vol".into(),
                value: 75.0,
                origin: ChangeOrigin::User,
            }]
        );
    }

    #[test]
    fn drag_clamps_to_track() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        slider.pointer_down(&doc, &mut down_on(slider.handle()));

        slider.pointer_move(&mut doc, &mut move_to(-500.0), &mut out);
        assert_eq!(slider.offset(&doc), 0.0);
        assert_eq!(slider.percentage(), 100.0);

        slider.pointer_move(&mut doc, &mut move_to(10_000.0), &mut out);
        assert_eq!(slider.offset(&doc), 200.0);
        assert_eq!(slider.percentage(), 0.0);
    }

    #[test]
    fn moves_after_pointer_up_are_ignored() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        slider.pointer_down(&doc, &mut down_on(slider.handle()));
        slider.pointer_move(&mut doc, &mut move_to(TRACK_TOP + 100.0), &mut out);
        slider.pointer_up();
        let _ = out.drain();

        assert!(!slider.pointer_move(&mut doc, &mut move_to(TRACK_TOP + 10.0), &mut out));
        assert_eq!(slider.offset(&doc), 100.0);
        assert!(out.is_empty());
    }

    #[test]
    fn repeated_drag_start_recaptures_track() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        slider.pointer_down(&doc, &mut down_on(slider.handle()));

        let track = doc.get_element_by_id("vol_sliderContainer").unwrap();
        doc.get_mut(track).unwrap().style = BoxStyle::sized(40.0, 100.0);
        doc.relayout();

        slider.pointer_down(&doc, &mut down_on(slider.handle()));
        assert!(slider.is_dragging());
        assert_eq!(slider.cached_track().unwrap().height, 100.0);
    }

    #[test]
    fn zero_height_track_posts_nothing() {
        let mut doc = page(0.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        slider.pointer_down(&doc, &mut down_on(slider.handle()));
        slider.pointer_move(&mut doc, &mut move_to(TRACK_TOP + 30.0), &mut out);
        assert_eq!(slider.offset(&doc), 0.0);
        assert!(out.is_empty());

        let value = slider.set_position(&mut doc, 40.0, &mut out);
        assert_eq!(value, 40.0);
        assert_eq!(slider.offset(&doc), 0.0);
    }

    #[test]
    fn set_position_clamps_high() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        assert_eq!(slider.set_position(&mut doc, 150.0, &mut out), 100.0);
        assert_eq!(slider.percentage(), 100.0);
        assert_eq!(slider.offset(&doc), 0.0);
    }

    #[test]
    fn set_position_clamps_low() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        assert_eq!(slider.set_position(&mut doc, -20.0, &mut out), 0.0);
        assert_eq!(slider.offset(&doc), 200.0);
    }

    #[test]
    fn set_position_notifies_once_with_clamped_value() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        slider.set_position(&mut doc, 250.0, &mut out);
        let posted = changes(&out.drain());
        assert_eq!(
            posted,
            vec![SliderChanged {
                slider: "vol".into(),
                value: 100.0,
                origin: ChangeOrigin::Programmatic,
            }]
        );
    }

    #[test]
    fn silent_policy_posts_nothing() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol")
            .unwrap()
            .with_notify(ProgrammaticNotify::Silent);
        let mut out = EventDispatcher::new();
        slider.set_position(&mut doc, 30.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(slider.percentage(), 30.0);
    }

    #[test]
    fn set_position_measures_track_lazily_and_keeps_it() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        assert!(slider.cached_track().is_none());
        slider.set_position(&mut doc, 50.0, &mut out);
        assert_eq!(slider.offset(&doc), 100.0);

        let track = doc.get_element_by_id("vol_sliderContainer").unwrap();
        doc.get_mut(track).unwrap().style = BoxStyle::sized(40.0, 100.0);
        doc.relayout();

        // Stale cache: still computed against 200px.
        slider.set_position(&mut doc, 50.0, &mut out);
        assert_eq!(slider.offset(&doc), 100.0);
    }

    #[test]
    fn round_trip_within_one_pixel() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        for o in 0..=200 {
            let o = o as f32;
            let p = percentage_for_offset(o, 200.0).unwrap();
            slider.set_position(&mut doc, p, &mut out);
            assert!(
                (slider.offset(&doc) - o).abs() <= 1.0,
                "offset {o} came back as {}",
                slider.offset(&doc)
            );
        }
    }

    #[test]
    fn round_trip_within_half_a_step_on_tall_track() {
        let mut doc = page(600.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        for o in 0..=600 {
            let o = o as f32;
            let p = percentage_for_offset(o, 600.0).unwrap();
            slider.set_position(&mut doc, p, &mut out);
            let error = (slider.offset(&doc) - o).abs();
            assert!(error <= 3.0 + 1e-3, "offset {o} came back off by {error}");
        }
    }

    #[test]
    fn describe_reports_state() {
        let mut doc = page(200.0);
        let mut slider = Slider::bind(&doc, "vol").unwrap();
        let mut out = EventDispatcher::new();
        slider.set_position(&mut doc, 75.0, &mut out);
        assert_eq!(slider.describe(&doc), "slider vol: 75% (offset 50.0px)");
    }
}
