//! Widget system: trait, binding errors, lifecycle.

pub mod lifecycle;
pub mod traits;

pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use traits::{require_element, Widget, WidgetError};
