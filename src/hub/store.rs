//! Server-side slider values.

use std::collections::BTreeMap;

use crate::bridge::protocol::Inbound;

/// Named slider values. The set of names is fixed at construction; updates
/// to other names are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderStore {
    values: BTreeMap<String, f64>,
}

impl SliderStore {
    /// A store holding `initial` values.
    pub fn new(initial: BTreeMap<String, f64>) -> Self {
        Self { values: initial }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    /// Store `value` under `id` if `id` is a known slider.
    pub fn set(&mut self, id: &str, value: f64) -> bool {
        match self.values.get_mut(id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One `set-slider-value` per slider, in name order.
    pub fn replay(&self) -> impl Iterator<Item = Inbound> + '_ {
        self.values.iter().map(|(id, value)| Inbound::SetSliderValue {
            id: id.clone(),
            value: *value,
        })
    }
}

impl Default for SliderStore {
    /// `vol` and `bright`, both at 50.
    fn default() -> Self {
        Self::new(BTreeMap::from([("vol".to_owned(), 50.0), ("bright".to_owned(), 50.0)]))
    }
}
