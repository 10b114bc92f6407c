//=========================================================================
// Event Hub
//
// In-process implementation of the host platform's subscribe/fire
// contract: per-element listener lists plus synchronous dispatch.
//
// Responsibilities:
// - Allocate element identities
// - Register and remove listeners (the native subscription mechanism)
// - Dispatch an event to every matching listener on its target, in
//   registration order, within the caller's stack frame
//
// Notes:
// Dispatch is single-threaded and non-reentrant: listeners hold no
// reference back to the hub, so no listener can subscribe or dispatch
// while a dispatch is in flight. All listeners of one dispatch share
// the same event object.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Crates =====================================================

use log::trace;

//=== Internal Modules ====================================================

use crate::core::event::{ElementId, Event, EventKind};
use crate::core::listener::{Listener, ListenerId, ListenerOptions};
use crate::core::registry::{EventRegistry, RegistryError};

//=== ListenerEntry =======================================================
//
// One live registration: the subscribed kind, the callback, and the
// caller's original options.
//
struct ListenerEntry {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
    options: ListenerOptions,
}

//=== EventHub ============================================================

/// Owns every element's listener list and delivers events to them.
///
/// This is the *unwrapped* subscription mechanism. Applications normally
/// reach it through the movement adapter installed at startup; the
/// adapter itself uses the hub directly for its contact-tracking
/// listeners, which must not be recursively intercepted.
pub struct EventHub {
    elements: HashMap<ElementId, Vec<ListenerEntry>>,
    next_element: u64,
    next_listener: u64,
}

impl EventHub {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_element: 0,
            next_listener: 0,
        }
    }

    //--- Element Management -----------------------------------------------

    /// Allocates a fresh element with an empty listener list.
    pub fn create_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.elements.insert(id, Vec::new());

        trace!(target: "hub", "Element created: {:?}", id);
        id
    }

    /// Number of live listeners on `target` (zero for unknown elements).
    pub fn listener_count(&self, target: ElementId) -> usize {
        self.elements.get(&target).map_or(0, Vec::len)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers `event` to every listener on `target` subscribed for the
    /// event's kind, in registration order. Returns the delivered count.
    ///
    /// Listeners registered with `once` are dropped after delivery.
    /// A target with no matching listeners is not an error; an unknown
    /// target is.
    pub fn dispatch(
        &mut self,
        target: ElementId,
        event: &mut Event,
    ) -> Result<usize, RegistryError> {
        let entries = self
            .elements
            .get_mut(&target)
            .ok_or(RegistryError::UnknownElement(target))?;

        let mut delivered = 0;
        entries.retain_mut(|entry| {
            if entry.kind != event.kind() {
                return true;
            }
            entry.listener.invoke(event);
            delivered += 1;
            !entry.options.once
        });

        trace!(
            target: "hub",
            "Dispatched {:?} on {:?} to {} listener(s)",
            event.kind(),
            target,
            delivered
        );

        Ok(delivered)
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry for EventHub {
    fn add_listener(
        &mut self,
        target: ElementId,
        kind: EventKind,
        listener: Listener,
        options: ListenerOptions,
    ) -> Result<ListenerId, RegistryError> {
        let entries = self
            .elements
            .get_mut(&target)
            .ok_or(RegistryError::UnknownElement(target))?;

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        entries.push(ListenerEntry {
            id,
            kind,
            listener,
            options,
        });

        trace!(
            target: "hub",
            "Listener {:?} registered on {:?} for {:?}",
            id,
            target,
            kind
        );

        Ok(id)
    }

    fn remove_listener(
        &mut self,
        target: ElementId,
        listener: ListenerId,
    ) -> Result<(), RegistryError> {
        let entries = self
            .elements
            .get_mut(&target)
            .ok_or(RegistryError::UnknownElement(target))?;

        let position = entries
            .iter()
            .position(|entry| entry.id == listener)
            .ok_or(RegistryError::UnknownListener(listener))?;

        entries.remove(position);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
