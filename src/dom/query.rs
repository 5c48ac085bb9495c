//! Document queries: by element id, class, tag.

use super::node::{NodeData, NodeId};
use super::tree::Document;
use crate::geometry::Point;

impl Document {
    /// Find the first element whose id matches, like `getElementById`.
    ///
    /// Iterates all nodes in the arena in insertion order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_nodes()
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all elements that have the given class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all elements with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.tag == tag)
    }

    /// Find all elements matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// The deepest element whose bounding rect contains `point`.
    ///
    /// Later siblings win over earlier ones, the way painting order does.
    /// Uses rects from the latest layout pass; call
    /// [`refresh_layout`](Document::refresh_layout) first after moving nodes.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let root = self.root()?;
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|data| data.rect.contains(point)))
            .last()
    }

    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Document;

    fn build_query_tree() -> Document {
        let mut doc = Document::new();
        let root = doc.insert(NodeData::new("body").with_id("root"));
        let panel = doc
            .insert_child(root, NodeData::new("div").with_id("controls").with_class("panel"))
            .unwrap();
        doc.insert_child(panel, NodeData::new("button").with_id("mic-button").with_class("on"))
            .unwrap();
        doc.insert_child(panel, NodeData::new("button").with_id("cam-button"))
            .unwrap();
        doc
    }

    #[test]
    fn get_element_by_id_found() {
        let doc = build_query_tree();
        let id = doc.get_element_by_id("mic-button").unwrap();
        assert_eq!(doc.get(id).unwrap().tag, "button");
    }

    #[test]
    fn get_element_by_id_not_found() {
        let doc = build_query_tree();
        assert!(doc.get_element_by_id("vol_sliderHandle").is_none());
    }

    #[test]
    fn query_by_class() {
        let doc = build_query_tree();
        let on = doc.query_by_class("on");
        assert_eq!(on.len(), 1);
        assert_eq!(doc.get(on[0]).unwrap().id.as_deref(), Some("mic-button"));
        assert!(doc.query_by_class("missing").is_empty());
    }

    #[test]
    fn query_by_tag() {
        let doc = build_query_tree();
        assert_eq!(doc.query_by_tag("button").len(), 2);
        assert_eq!(doc.query_by_tag("div").len(), 1);
    }

    #[test]
    fn hit_test_picks_deepest_element() {
        use crate::dom::PageBuilder;
        use crate::geometry::Point;

        let doc = PageBuilder::new().slider("vol").build(400.0, 600.0);
        let handle = doc.get_element_by_id("vol_sliderHandle").unwrap();
        let track = doc.get_element_by_id("vol_sliderContainer").unwrap();
        let handle_rect = doc.bounding_client_rect(handle).unwrap();
        let track_rect = doc.bounding_client_rect(track).unwrap();

        let on_handle = Point::new(handle_rect.x + 1.0, handle_rect.y + 1.0);
        assert_eq!(doc.hit_test(on_handle), Some(handle));

        let on_track = Point::new(track_rect.x + 1.0, track_rect.bottom() - 1.0);
        assert_eq!(doc.hit_test(on_track), Some(track));
    }

    #[test]
    fn hit_test_outside_everything() {
        let doc = build_query_tree();
        assert!(doc.hit_test(crate::geometry::Point::new(-5.0, -5.0)).is_none());
    }

    #[test]
    fn query_all_predicate() {
        let doc = build_query_tree();
        let with_ids = doc.query_all(|data| data.id.is_some());
        assert_eq!(with_ids.len(), 4);
    }
}
