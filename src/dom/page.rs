//! Host page construction and the element naming contract.
//!
//! Widgets find their elements by id: a slider named `vol` needs
//! `vol_sliderContainer` (the track) with `vol_sliderHandle` inside it, and a
//! button named `mic` needs `mic-button`, and a status light named `meeting`
//! needs `meeting-led`. [`PageBuilder`] lays out a page that satisfies that
//! contract.

use super::node::NodeData;
use super::tree::Document;
use crate::layout::{BoxStyle, FlowDirection};

const TRACK_WIDTH: f32 = 40.0;
const HANDLE_HEIGHT: f32 = 20.0;
const BUTTON_WIDTH: f32 = 80.0;
const BUTTON_HEIGHT: f32 = 40.0;
const LED_SIZE: f32 = 12.0;
const PAGE_PADDING: f32 = 16.0;
const PAGE_GAP: f32 = 16.0;

/// Element id of a slider's track.
pub fn slider_container_id(name: &str) -> String {
    format!("{name}_sliderContainer")
}

/// Element id of a slider's draggable handle.
pub fn slider_handle_id(name: &str) -> String {
    format!("{name}_sliderHandle")
}

/// Element id of a toggle button.
pub fn button_element_id(name: &str) -> String {
    format!("{name}-button")
}

/// Element id of a status light.
pub fn led_element_id(name: &str) -> String {
    format!("{name}-led")
}

/// Builds a laid-out control page: a row of status lights, a row of slider
/// tracks, then a row of buttons.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    sliders: Vec<String>,
    buttons: Vec<String>,
    leds: Vec<String>,
    track_height: f32,
}

impl PageBuilder {
    /// An empty page with 200px tracks.
    pub fn new() -> Self {
        Self {
            sliders: Vec::new(),
            buttons: Vec::new(),
            leds: Vec::new(),
            track_height: 200.0,
        }
    }

    /// Add a slider's track and handle (builder).
    pub fn slider(mut self, name: impl Into<String>) -> Self {
        self.sliders.push(name.into());
        self
    }

    /// Add a toggle button (builder).
    pub fn button(mut self, name: impl Into<String>) -> Self {
        self.buttons.push(name.into());
        self
    }

    /// Add a status light (builder).
    pub fn led(mut self, name: impl Into<String>) -> Self {
        self.leds.push(name.into());
        self
    }

    /// Set the height of every slider track in pixels (builder).
    pub fn track_height(mut self, height: f32) -> Self {
        self.track_height = height;
        self
    }

    pub fn slider_names(&self) -> &[String] {
        &self.sliders
    }

    pub fn button_names(&self) -> &[String] {
        &self.buttons
    }

    pub fn led_names(&self) -> &[String] {
        &self.leds
    }

    /// Build the document and run a first layout pass for the given viewport.
    pub fn build(&self, width: f32, height: f32) -> Document {
        let mut doc = Document::new();
        let body = doc.insert(
            NodeData::new("body")
                .with_style(BoxStyle::flow(FlowDirection::Column, PAGE_GAP, PAGE_PADDING)),
        );

        let row_style = BoxStyle::flow(FlowDirection::Row, PAGE_GAP, 0.0);

        if !self.leds.is_empty() {
            if let Some(leds) =
                doc.insert_child(body, NodeData::new("div").with_class("leds").with_style(row_style))
            {
                for name in &self.leds {
                    doc.insert_child(
                        leds,
                        NodeData::new("span")
                            .with_id(led_element_id(name))
                            .with_class("led")
                            .with_style(BoxStyle::sized(LED_SIZE, LED_SIZE)),
                    );
                }
            }
        }

        if let Some(sliders) =
            doc.insert_child(body, NodeData::new("div").with_class("sliders").with_style(row_style))
        {
            for name in &self.sliders {
                let track = doc.insert_child(
                    sliders,
                    NodeData::new("div")
                        .with_id(slider_container_id(name))
                        .with_class("slider-container")
                        .with_style(BoxStyle::sized(TRACK_WIDTH, self.track_height)),
                );
                if let Some(track) = track {
                    doc.insert_child(
                        track,
                        NodeData::new("div")
                            .with_id(slider_handle_id(name))
                            .with_class("slider-handle")
                            .with_style(BoxStyle::sized(TRACK_WIDTH, HANDLE_HEIGHT).absolute_at(0.0)),
                    );
                }
            }
        }

        if let Some(buttons) =
            doc.insert_child(body, NodeData::new("div").with_class("buttons").with_style(row_style))
        {
            for name in &self.buttons {
                doc.insert_child(
                    buttons,
                    NodeData::new("button")
                        .with_id(button_element_id(name))
                        .with_class("toggle")
                        .with_style(BoxStyle::sized(BUTTON_WIDTH, BUTTON_HEIGHT)),
                );
            }
        }

        doc.layout(width, height);
        doc
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
