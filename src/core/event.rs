//=========================================================================
// Host Event Types
//
// Defines the event objects delivered to listeners by the host.
//
// This module abstracts the host platform's event shape (pointer and
// contact notifications) into a unified format used by the subscription
// and dispatch layers.
//
// Responsibilities:
// - Represent pointer and contact inputs in a stable, portable way
// - Carry the optional native movement pair whose absence triggers
//   delta synthesis
// - Provide kind classification so listeners fire only for the kind
//   they subscribed to
//
// Design:
// Events are plain data:
// - Copy-cheap for identifiers (ElementId, EventKind, Contact)
// - Clone-cheap for Event (one small Vec at most, for contact lists)
// - Send, so platform-side producers may live on another thread
//
// Event Flow:
// ```text
// Platform Layer (WinitBridge)
//         ↓
//    Event (this module)
//         ↓
//    EventHub dispatch
//         ↓
//    Listeners (possibly movement-augmented)
// ```
//
//=========================================================================

//=== ElementId ===========================================================

/// Opaque identity key for a subscribable element.
///
/// Elements are allocated by the hub and referenced only through this
/// key; the host keeps no other notion of element identity. Per-element
/// movement state is keyed on `ElementId`, so two elements never share
/// trackers or listener lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);

//=== EventKind ===========================================================

/// Classification of an event, used as the subscription key.
///
/// A listener registered for one kind is invoked only for events of that
/// exact kind. Kinds fall into two families:
///
/// - **Pointer family**: position notifications that may carry a native
///   movement pair (`PointerMove`, `PointerDown`, `PointerUp`, `Click`)
/// - **Contact family**: raw touch-surface samples carrying absolute
///   contact coordinates (`ContactStart`, `ContactMove`, `ContactEnd`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    //--- Pointer family ---------------------------------------------------

    /// Pointer position changed. The one kind subject to movement
    /// synthesis when the native movement pair is absent.
    PointerMove,

    /// Pointer pressed.
    PointerDown,

    /// Pointer released.
    PointerUp,

    /// Press-and-release on the same element.
    Click,

    //--- Contact family ---------------------------------------------------

    /// A contact touched down on the surface.
    ContactStart,

    /// A contact moved while down.
    ContactMove,

    /// A contact lifted or was cancelled.
    ContactEnd,
}

impl EventKind {
    /// Returns `true` for kinds carried by a [`PointerEvent`] payload.
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::PointerMove | Self::PointerDown | Self::PointerUp | Self::Click
        )
    }

    /// Returns `true` for kinds carried by a [`ContactEvent`] payload.
    pub fn is_contact(self) -> bool {
        matches!(self, Self::ContactStart | Self::ContactMove | Self::ContactEnd)
    }
}

//=== Contact =============================================================

/// One absolute contact sample, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub x: f64,
    pub y: f64,
}

impl Contact {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

//=== PointerEvent ========================================================

/// Pointer-family event payload.
///
/// `movement` is the displacement since the previous pointer sample, as
/// reported by the device. `None` means the device did not report one,
/// which is the signal that synthesis is needed. A present pair is
/// authoritative and is never overwritten by the movement adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub x: f64,
    pub y: f64,
    pub movement: Option<(f64, f64)>,
}

impl PointerEvent {
    /// Creates a pointer event with no native movement pair.
    pub fn new(kind: EventKind, x: f64, y: f64) -> Self {
        debug_assert!(kind.is_pointer(), "pointer payload with kind {:?}", kind);
        Self {
            kind,
            x,
            y,
            movement: None,
        }
    }
}

//=== ContactEvent ========================================================

/// Contact-family event payload.
///
/// `contacts` is ordered; the movement adapter reads only index 0
/// (first-contact-only tracking), but the full list is delivered to
/// listeners unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    pub kind: EventKind,
    pub contacts: Vec<Contact>,
}

impl ContactEvent {
    pub fn new(kind: EventKind, contacts: Vec<Contact>) -> Self {
        debug_assert!(kind.is_contact(), "contact payload with kind {:?}", kind);
        Self { kind, contacts }
    }
}

//=== Event ===============================================================

/// An event object as delivered to listeners.
///
/// Within one dispatch, all listeners on the target observe the same
/// event object; a mutation made by an earlier listener (notably the
/// movement adapter's synthesized pair) is visible to later ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    Contact(ContactEvent),
}

impl Event {
    //--- Constructors -----------------------------------------------------

    /// Builds a pointer-family event with no native movement pair.
    pub fn pointer(kind: EventKind, x: f64, y: f64) -> Self {
        Self::Pointer(PointerEvent::new(kind, x, y))
    }

    /// Builds a contact-family event from an ordered contact list.
    pub fn contact(kind: EventKind, contacts: Vec<Contact>) -> Self {
        Self::Contact(ContactEvent::new(kind, contacts))
    }

    //--- Accessors --------------------------------------------------------

    /// The kind this event dispatches under.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Pointer(pointer) => pointer.kind,
            Self::Contact(contact) => contact.kind,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(pointer) => Some(pointer),
            Self::Contact(_) => None,
        }
    }

    pub fn as_pointer_mut(&mut self) -> Option<&mut PointerEvent> {
        match self {
            Self::Pointer(pointer) => Some(pointer),
            Self::Contact(_) => None,
        }
    }

    /// First entry of the contact list, if this is a contact event.
    ///
    /// Additional simultaneous contacts are ignored by movement tracking.
    pub fn first_contact(&self) -> Option<Contact> {
        match self {
            Self::Contact(contact) => contact.contacts.first().copied(),
            Self::Pointer(_) => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Kind Classification Tests
    //=====================================================================

    #[test]
    fn pointer_kinds_classified() {
        assert!(EventKind::PointerMove.is_pointer());
        assert!(EventKind::PointerDown.is_pointer());
        assert!(EventKind::PointerUp.is_pointer());
        assert!(EventKind::Click.is_pointer());
        assert!(!EventKind::PointerMove.is_contact());
    }

    #[test]
    fn contact_kinds_classified() {
        assert!(EventKind::ContactStart.is_contact());
        assert!(EventKind::ContactMove.is_contact());
        assert!(EventKind::ContactEnd.is_contact());
        assert!(!EventKind::ContactMove.is_pointer());
    }

    #[test]
    fn families_are_disjoint() {
        let all = [
            EventKind::PointerMove,
            EventKind::PointerDown,
            EventKind::PointerUp,
            EventKind::Click,
            EventKind::ContactStart,
            EventKind::ContactMove,
            EventKind::ContactEnd,
        ];
        for kind in all {
            assert_ne!(kind.is_pointer(), kind.is_contact(), "{:?}", kind);
        }
    }

    //=====================================================================
    // Construction Tests
    //=====================================================================

    #[test]
    fn pointer_event_starts_without_movement() {
        let event = Event::pointer(EventKind::PointerMove, 10.0, 20.0);
        let pointer = event.as_pointer().unwrap();
        assert_eq!((pointer.x, pointer.y), (10.0, 20.0));
        assert!(pointer.movement.is_none());
    }

    #[test]
    fn event_kind_matches_payload() {
        let pointer = Event::pointer(EventKind::Click, 0.0, 0.0);
        assert_eq!(pointer.kind(), EventKind::Click);

        let contact = Event::contact(EventKind::ContactStart, vec![Contact::new(1.0, 2.0)]);
        assert_eq!(contact.kind(), EventKind::ContactStart);
    }

    //=====================================================================
    // Accessor Tests
    //=====================================================================

    #[test]
    fn first_contact_reads_index_zero() {
        let event = Event::contact(
            EventKind::ContactMove,
            vec![Contact::new(5.0, 6.0), Contact::new(50.0, 60.0)],
        );

        let first = event.first_contact().unwrap();
        assert_eq!((first.x, first.y), (5.0, 6.0));
    }

    #[test]
    fn first_contact_none_for_empty_list() {
        let event = Event::contact(EventKind::ContactEnd, vec![]);
        assert!(event.first_contact().is_none());
    }

    #[test]
    fn first_contact_none_for_pointer_events() {
        let event = Event::pointer(EventKind::PointerMove, 1.0, 1.0);
        assert!(event.first_contact().is_none());
    }

    #[test]
    fn as_pointer_mut_allows_augmentation() {
        let mut event = Event::pointer(EventKind::PointerMove, 0.0, 0.0);

        if let Some(pointer) = event.as_pointer_mut() {
            pointer.movement = Some((5.0, 6.0));
        }

        assert_eq!(event.as_pointer().unwrap().movement, Some((5.0, 6.0)));
    }

    #[test]
    fn as_pointer_none_for_contact_events() {
        let mut event = Event::contact(EventKind::ContactStart, vec![Contact::new(0.0, 0.0)]);
        assert!(event.as_pointer().is_none());
        assert!(event.as_pointer_mut().is_none());
    }
}
