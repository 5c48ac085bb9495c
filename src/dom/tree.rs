//! The host document: element arena, parent links, and the style and geometry
//! accessors widgets read and write.

use std::iter;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::geometry::Rect;
use crate::layout::LayoutEngine;

/// Where a node sits in the tree.
#[derive(Debug, Clone, Default)]
struct Links {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An element tree backed by a slotmap arena.
///
/// Element data and tree links live in separate maps keyed by the same
/// [`NodeId`]. Bounding rects are only refreshed by [`Document::layout`];
/// between passes they describe the page as it was last laid out.
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    links: SecondaryMap<NodeId, Links>,
    root: Option<NodeId>,
    engine: LayoutEngine,
    viewport: (f32, f32),
    layout_dirty: bool,
}

impl Document {
    /// An empty document with a zero viewport.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            links: SecondaryMap::new(),
            root: None,
            engine: LayoutEngine::new(),
            viewport: (0.0, 0.0),
            layout_dirty: false,
        }
    }

    fn attach(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.insert(data);
        self.links.insert(
            id,
            Links {
                parent,
                children: Vec::new(),
            },
        );
        id
    }

    /// Add a detached node. The first one added becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.attach(data, None);
        self.root.get_or_insert(id);
        id
    }

    /// Append a node under `parent`, or `None` if `parent` is gone.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.attach(data, Some(parent));
        self.links.get_mut(parent)?.children.push(id);
        Some(id)
    }

    /// Drop `id` together with its subtree and hand back its data.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        let parent = self.links.get(id)?.parent;
        if let Some(siblings) = parent.and_then(|p| self.links.get_mut(p)) {
            siblings.children.retain(|&child| child != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let subtree = self.walk_depth_first(id);
        let mut removed = None;
        for node in subtree {
            self.links.remove(node);
            let data = self.nodes.remove(node);
            if node == id {
                removed = data;
            }
        }
        removed
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links.get(id).and_then(|links| links.parent)
    }

    /// Children in insertion order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.links.get(id) {
            Some(links) => &links.children,
            None => &[],
        }
    }

    /// Nearest parent first, root last. `id` itself is not included.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        iter::successors(self.parent(id), |&node| self.parent(node)).collect()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and its descendants in document order.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut pending = vec![start];
        while let Some(node) = pending.pop() {
            let Some(links) = self.links.get(node) else {
                continue;
            };
            order.push(node);
            pending.extend(links.children.iter().rev());
        }
        order
    }

    // ── Style and geometry ───────────────────────────────────────────

    /// The absolute `top` offset of a node, if it is absolutely positioned.
    pub fn style_top(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(id).and_then(|data| data.style.top)
    }

    /// Write a node's `top` offset in pixels, making it absolutely positioned.
    ///
    /// The node's rect is out of date until the next layout pass; see
    /// [`Document::refresh_layout`].
    pub fn set_style_top(&mut self, id: NodeId, top: f32) {
        if let Some(data) = self.nodes.get_mut(id) {
            data.style.top = Some(top);
            self.layout_dirty = true;
        }
    }

    /// Whether a style write happened since the last layout pass.
    pub fn needs_layout(&self) -> bool {
        self.layout_dirty
    }

    /// Re-run layout if a style write left the rects out of date.
    pub fn refresh_layout(&mut self) {
        if self.layout_dirty {
            self.relayout();
        }
    }

    /// The node's bounding rect as of the latest layout pass.
    pub fn bounding_client_rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).map(|data| data.rect)
    }

    /// The viewport used by the latest layout pass.
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Lay the document out for a `width` x `height` viewport and store the
    /// resulting absolute rects on every node.
    pub fn layout(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        let mut engine = std::mem::take(&mut self.engine);
        engine.sync_tree(self);
        engine.compute(width, height);
        engine.write_rects(self);
        self.engine = engine;
        self.layout_dirty = false;
    }

    /// Re-run layout with the current viewport.
    pub fn relayout(&mut self) {
        let (width, height) = self.viewport;
        self.layout(width, height);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .finish()
    }
}
