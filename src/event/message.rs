//! Widget messages and their envelope.
//!
//! Widgets never talk to the bridge directly. They post a [`Message`] into the
//! dispatcher and the panel reads it back with [`Envelope::downcast_ref`].

use std::any::Any;
use std::fmt;

use crate::dom::node::NodeId;

/// A message a widget can post. Object safe so the queue can hold any kind.
pub trait Message: Send + 'static {
    fn as_any(&self) -> &dyn Any;

    /// Short type name used in logs.
    fn message_name(&self) -> &str;
}

/// A posted message and the element of the widget that posted it.
pub struct Envelope {
    pub message: Box<dyn Message>,
    pub sender: NodeId,
}

impl Envelope {
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self {
            message: Box::new(message),
            sender,
        }
    }

    /// The payload as `T`, if that is what was posted.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    pub fn name(&self) -> &str {
        self.message.message_name()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Envelope({} from {:?})", self.name(), self.sender)
    }
}

// ---------------------------------------------------------------------------
// Widget messages
// ---------------------------------------------------------------------------

/// Where a slider value change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// The user dragged the handle.
    User,
    /// A programmatic write, usually a server push.
    Programmatic,
}

/// A slider's value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderChanged {
    pub slider: String,
    /// Percentage in `[0, 100]`.
    pub value: f64,
    pub origin: ChangeOrigin,
}

impl Message for SliderChanged {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "SliderChanged"
    }
}

/// A button was clicked. Carries no state: the listener decides what the
/// click means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPressed {
    pub button: String,
}

impl Message for ButtonPressed {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "ButtonPressed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_id(sm: &mut SlotMap<NodeId, ()>) -> NodeId {
        sm.insert(())
    }

    #[test]
    fn message_names() {
        let changed = SliderChanged {
            slider: "vol".into(),
            value: 75.0,
            origin: ChangeOrigin::User,
        };
        assert_eq!(changed.message_name(), "SliderChanged");
        let pressed = ButtonPressed { button: "mic".into() };
        assert_eq!(pressed.message_name(), "ButtonPressed");
    }

    #[test]
    fn envelope_downcast_ref_success() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(ButtonPressed { button: "cam".into() }, sender);
        let pressed = env.downcast_ref::<ButtonPressed>().unwrap();
        assert_eq!(pressed.button, "cam");
        assert_eq!(env.sender, sender);
    }

    #[test]
    fn envelope_downcast_ref_wrong_type() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(ButtonPressed { button: "cam".into() }, sender);
        assert!(env.downcast_ref::<SliderChanged>().is_none());
    }

    #[test]
    fn envelope_debug_format() {
        let mut sm = SlotMap::with_key();
        let sender = make_id(&mut sm);
        let env = Envelope::new(
            SliderChanged {
                slider: "vol".into(),
                value: 1.0,
                origin: ChangeOrigin::Programmatic,
            },
            sender,
        );
        assert_eq!(env.name(), "SliderChanged");
        assert_eq!(format!("{env:?}"), format!("Envelope(SliderChanged from {sender:?})"));
    }
}
