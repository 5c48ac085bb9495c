//! Layout: box styles, taffy integration, and rect write-back.

pub mod engine;
pub mod resolve;
pub mod style;

pub use engine::LayoutEngine;
pub use style::{BoxStyle, FlowDirection};
