//=========================================================================
// Listener Types
//
// Defines the callback side of the subscription contract.
//
// The host accepts two long-standing callback forms: a bare function
// (closure) and an object exposing a `handle_event` method. Both are
// modeled as variants of a single `Listener` type with one `invoke`
// capability, so dispatch and wrapping code never branch on the form.
//
// Responsibilities:
// - Carry a caller's callback in either supported form
// - Carry the caller's registration options unchanged
// - Provide the opaque handle used for listener removal
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Modules ====================================================

use crate::core::event::Event;

//=== EventHandler ========================================================

/// Object form of a listener.
///
/// Implementors receive every event their subscription matches, exactly
/// as a function listener would.
pub trait EventHandler {
    fn handle_event(&mut self, event: &mut Event);
}

//=== Listener ============================================================

/// A subscription callback in one of the two supported forms.
///
/// Both forms receive `&mut Event`: the event object is shared across
/// the listeners of one dispatch, so upstream augmentation (the
/// synthesized movement pair) reaches the subscriber.
pub enum Listener {
    /// Bare function form.
    Function(Box<dyn FnMut(&mut Event)>),

    /// Handler-object form (`handle_event` method).
    Handler(Box<dyn EventHandler>),
}

impl Listener {
    //--- Constructors -----------------------------------------------------

    pub fn function<F>(callback: F) -> Self
    where
        F: FnMut(&mut Event) + 'static,
    {
        Self::Function(Box::new(callback))
    }

    pub fn handler<H>(handler: H) -> Self
    where
        H: EventHandler + 'static,
    {
        Self::Handler(Box::new(handler))
    }

    //--- invoke() ---------------------------------------------------------
    //
    // Single call capability shared by both variants. Registry backends
    // call this to deliver an event; nothing else distinguishes the forms.
    //
    pub fn invoke(&mut self, event: &mut Event) {
        match self {
            Self::Function(callback) => callback(event),
            Self::Handler(handler) => handler.handle_event(event),
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Listener::Function"),
            Self::Handler(_) => f.write_str("Listener::Handler"),
        }
    }
}

//=== ListenerOptions =====================================================

/// Registration options, forwarded verbatim to the underlying registry.
///
/// `once` is honored by the hub (the listener is dropped after its first
/// delivery). `capture` and `passive` are carried as data for backends
/// that implement event phases; the flat element model dispatches in
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
}

impl ListenerOptions {
    /// All flags off.
    pub const DEFAULT: Self = Self {
        capture: false,
        once: false,
        passive: false,
    };

    /// Remove after first delivery.
    pub const ONCE: Self = Self {
        capture: false,
        once: true,
        passive: false,
    };
}

//=== ListenerId ==========================================================

/// Opaque handle to a registered listener, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    struct Recorder {
        seen: Rc<RefCell<Vec<EventKind>>>,
    }

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &mut Event) {
            self.seen.borrow_mut().push(event.kind());
        }
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn function_form_is_invoked() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut listener = Listener::function(move |event| {
            sink.borrow_mut().push(event.kind());
        });

        let mut event = Event::pointer(EventKind::PointerMove, 0.0, 0.0);
        listener.invoke(&mut event);

        assert_eq!(*seen.borrow(), vec![EventKind::PointerMove]);
    }

    #[test]
    fn handler_form_is_invoked() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listener = Listener::handler(Recorder {
            seen: Rc::clone(&seen),
        });

        let mut event = Event::pointer(EventKind::Click, 0.0, 0.0);
        listener.invoke(&mut event);

        assert_eq!(*seen.borrow(), vec![EventKind::Click]);
    }

    #[test]
    fn listener_may_mutate_the_event() {
        let mut listener = Listener::function(|event| {
            if let Some(pointer) = event.as_pointer_mut() {
                pointer.movement = Some((1.0, 2.0));
            }
        });

        let mut event = Event::pointer(EventKind::PointerMove, 0.0, 0.0);
        listener.invoke(&mut event);

        assert_eq!(event.as_pointer().unwrap().movement, Some((1.0, 2.0)));
    }

    #[test]
    fn options_default_is_all_off() {
        let options = ListenerOptions::default();
        assert!(!options.capture && !options.once && !options.passive);
        assert_eq!(options, ListenerOptions::DEFAULT);
    }

    #[test]
    fn debug_names_the_form() {
        let function = Listener::function(|_| {});
        let handler = Listener::handler(Recorder {
            seen: Rc::new(RefCell::new(Vec::new())),
        });

        assert_eq!(format!("{:?}", function), "Listener::Function");
        assert_eq!(format!("{:?}", handler), "Listener::Handler");
    }
}
