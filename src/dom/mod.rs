//! Host document: slotmap-backed element tree with id/class queries.

pub mod node;
pub mod page;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use page::{button_element_id, led_element_id, slider_container_id, slider_handle_id, PageBuilder};
pub use tree::Document;
