//! The message queue widgets post into, and click bubbling.

use std::collections::VecDeque;

use super::message::{Envelope, Message};
use crate::dom::node::NodeId;
use crate::dom::tree::Document;

/// FIFO of posted widget messages, drained by the panel after each input.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Envelope>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Wrap `message` in an envelope from `sender` and enqueue it.
    pub fn post(&mut self, message: impl Message, sender: NodeId) {
        self.push(Envelope::new(message, sender));
    }

    /// Everything posted so far, oldest first.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
    /// `start` is not in the document.
    pub fn bubble_path(doc: &Document, start: NodeId) -> Vec<NodeId> {
        if !doc.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(doc.ancestors(start));
        path
    }
}
