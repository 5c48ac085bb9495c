//! Built-in widgets: Slider, Button, Led.

pub mod button;
pub mod led;
pub mod slider;

pub use button::{Button, ON_CLASS};
pub use led::Led;
pub use slider::{ProgrammaticNotify, Slider};
