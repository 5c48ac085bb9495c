//! Event system: pointer input, widget messages, dispatch.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::EventDispatcher;
pub use input::{InputEvent, PointerEvent, PointerKind, PointerSource};
pub use message::{ButtonPressed, ChangeOrigin, Envelope, Message, SliderChanged};
