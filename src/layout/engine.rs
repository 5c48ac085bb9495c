//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] synchronizes the document tree to a taffy layout tree,
//! runs layout computation, and writes absolute bounding rects back into the
//! document.

use std::collections::{HashMap, HashSet};

use taffy::style::AvailableSpace;
use taffy::TaffyTree;

use crate::dom::node::NodeId;
use crate::dom::tree::Document;
use crate::geometry::Rect;

use super::resolve::resolve_style;

/// Wraps a [`TaffyTree`] and maintains a mapping from document [`NodeId`]s to
/// taffy node ids.
pub struct LayoutEngine {
    tree: TaffyTree<NodeId>,
    node_map: HashMap<NodeId, taffy::NodeId>,
    root: Option<taffy::NodeId>,
}

impl LayoutEngine {
    /// Create a new, empty layout engine.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            root: None,
        }
    }

    /// Synchronize the taffy tree with the document structure.
    ///
    /// Walks the document depth-first from the root, creating or updating
    /// taffy nodes to match. Taffy nodes whose element no longer exists are
    /// removed, and parent/child links are rebuilt to mirror the document.
    pub fn sync_tree(&mut self, doc: &Document) {
        let doc_root = match doc.root() {
            Some(r) => r,
            None => {
                self.clear();
                return;
            }
        };

        let live_nodes = doc.walk_depth_first(doc_root);
        let live_set: HashSet<NodeId> = live_nodes.iter().copied().collect();

        let stale_keys: Vec<NodeId> = self
            .node_map
            .keys()
            .filter(|k| !live_set.contains(k))
            .copied()
            .collect();
        for key in stale_keys {
            if let Some(taffy_id) = self.node_map.remove(&key) {
                let _ = self.tree.remove(taffy_id);
            }
        }

        for &doc_id in &live_nodes {
            let Some(data) = doc.get(doc_id) else {
                continue;
            };
            let style = resolve_style(&data.style);

            if let Some(&taffy_id) = self.node_map.get(&doc_id) {
                let _ = self.tree.set_style(taffy_id, style);
            } else if let Ok(taffy_id) = self.tree.new_leaf_with_context(style, doc_id) {
                self.node_map.insert(doc_id, taffy_id);
            } else {
                tracing::warn!(?doc_id, "layout node creation failed");
            }
        }

        for &doc_id in &live_nodes {
            let taffy_children: Vec<taffy::NodeId> = doc
                .children(doc_id)
                .iter()
                .filter_map(|child| self.node_map.get(child).copied())
                .collect();

            if let Some(&taffy_id) = self.node_map.get(&doc_id) {
                let _ = self.tree.set_children(taffy_id, &taffy_children);
            }
        }

        self.root = self.node_map.get(&doc_root).copied();
    }

    /// Run taffy layout computation for a viewport of the given size.
    pub fn compute(&mut self, available_width: f32, available_height: f32) {
        if let Some(root) = self.root {
            let _ = self.tree.compute_layout(
                root,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(available_width),
                    height: AvailableSpace::Definite(available_height),
                },
            );
        }
    }

    /// Parent-relative layout of a single node, or `None` if it is not in the tree.
    pub fn local_rect(&self, node: NodeId) -> Option<Rect> {
        let taffy_id = self.node_map.get(&node)?;
        let layout = self.tree.layout(*taffy_id).ok()?;
        Some(Rect::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        ))
    }

    /// Store each node's absolute rect (viewport coordinates) in the document.
    pub fn write_rects(&self, doc: &mut Document) {
        let Some(root) = doc.root() else {
            return;
        };
        let mut stack = vec![(root, 0.0_f32, 0.0_f32)];
        while let Some((node, origin_x, origin_y)) = stack.pop() {
            let rect = self
                .local_rect(node)
                .unwrap_or(Rect::ZERO)
                .translate(origin_x, origin_y);
            if let Some(data) = doc.get_mut(node) {
                data.rect = rect;
            }
            for &child in doc.children(node) {
                stack.push((child, rect.x, rect.y));
            }
        }
    }

    /// Remove all taffy nodes and mappings.
    fn clear(&mut self) {
        for (_, taffy_id) in self.node_map.drain() {
            let _ = self.tree.remove(taffy_id);
        }
        self.root = None;
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
