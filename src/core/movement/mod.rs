//=========================================================================
// Movement Synthesis Adapter
//
// Decorator over the subscription registry that makes movement-delta
// data available on pointer-move events uniformly across devices.
//
// Touch surfaces deliver pointer-move events without a native movement
// pair. This adapter intercepts pointer-move subscriptions, tracks the
// element's raw contact samples, and fills the missing pair in before
// the subscriber's callback runs. Devices that do report movement are
// untouched: present values are authoritative.
//
// Architecture:
// ```text
//  Caller                       MovementPolyfill                EventHub
//  ───────                      ────────────────                ────────
//  add_listener(PointerMove) ─► ensure tracker ───────────────► raw ContactStart handler
//                               wrap callback  ───────────────► raw ContactMove handler
//                                                           └─► raw wrapped PointerMove
//  add_listener(anything else) ─► forwarded verbatim ─────────► raw listener
// ```
//
// The adapter is installed once at host startup and fronts the entire
// subscription surface, so every caller transparently receives
// augmented events. Its own contact-tracking handlers go through the
// unwrapped registry; routing them through the adapter would intercept
// them again.
//
//=========================================================================

//=== Submodules ==========================================================

mod tracker;

pub use tracker::MovementTracker;

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, info};

//=== Internal Modules ====================================================

use crate::core::event::{ElementId, Event, EventKind};
use crate::core::hub::EventHub;
use crate::core::listener::{Listener, ListenerId, ListenerOptions};
use crate::core::registry::{EventRegistry, RegistryError};

//=== TrackedElement ======================================================
//
// Per-element synthesis state: the tracker shared with the contact
// handlers and wrapped listeners, plus the handles needed for teardown.
//
struct TrackedElement {
    tracker: Rc<RefCell<MovementTracker>>,
    contact_start: ListenerId,
    contact_move: ListenerId,
}

//=== MovementPolyfill ====================================================

/// Subscription decorator that synthesizes pointer movement deltas.
///
/// Wraps any [`EventRegistry`] backend. Non-pointer-move subscriptions
/// pass through verbatim; pointer-move subscriptions get a per-element
/// [`MovementTracker`] (created on first use) and a wrapping callback
/// that fills in `movement` when the platform left it absent.
pub struct MovementPolyfill<R: EventRegistry> {
    /// The unwrapped subscription mechanism.
    raw: R,

    /// Movement state per element, created lazily on the first
    /// pointer-move subscription and owned exclusively by this adapter.
    tracked: HashMap<ElementId, TrackedElement>,
}

impl<R: EventRegistry> MovementPolyfill<R> {
    //--- Installation -----------------------------------------------------

    /// Wraps `raw` for the lifetime of the host.
    ///
    /// Install once at startup and hand the adapter out as the only
    /// subscription surface; callers then depend on the interface and
    /// cannot reach the unwrapped mechanism.
    pub fn install(raw: R) -> Self {
        info!(target: "movement", "Movement synthesis adapter installed");
        Self {
            raw,
            tracked: HashMap::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Whether `target` currently has movement state.
    pub fn is_tracked(&self, target: ElementId) -> bool {
        self.tracked.contains_key(&target)
    }

    //--- Teardown ---------------------------------------------------------

    /// Removes `target`'s contact-tracking handlers and drops its tracker.
    ///
    /// Subscriptions live for the host lifetime unless released; callers
    /// that unsubscribe an element should remove their own pointer-move
    /// listeners first, then release. Wrapped listeners left registered
    /// keep delivering the last synthesized delta, since no contact
    /// samples arrive anymore. Releasing an untracked element is a no-op.
    pub fn release(&mut self, target: ElementId) -> Result<(), RegistryError> {
        let Some(tracked) = self.tracked.remove(&target) else {
            return Ok(());
        };

        self.raw.remove_listener(target, tracked.contact_start)?;
        self.raw.remove_listener(target, tracked.contact_move)?;

        debug!(target: "movement", "Movement tracking released for {:?}", target);
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    // Returns the element's tracker, creating it and registering the two
    // contact-tracking handlers on the first pointer-move subscription.
    fn ensure_tracker(
        &mut self,
        target: ElementId,
    ) -> Result<Rc<RefCell<MovementTracker>>, RegistryError> {
        if let Some(tracked) = self.tracked.get(&target) {
            return Ok(Rc::clone(&tracked.tracker));
        }

        let tracker = Rc::new(RefCell::new(MovementTracker::new()));

        let contact_start = {
            let tracker = Rc::clone(&tracker);
            self.raw.add_listener(
                target,
                EventKind::ContactStart,
                Listener::function(move |event| {
                    if let Some(contact) = event.first_contact() {
                        tracker.borrow_mut().begin_contact(contact.x, contact.y);
                    }
                }),
                ListenerOptions::default(),
            )?
        };

        let contact_move = {
            let tracker = Rc::clone(&tracker);
            self.raw.add_listener(
                target,
                EventKind::ContactMove,
                Listener::function(move |event| {
                    if let Some(contact) = event.first_contact() {
                        tracker.borrow_mut().advance_contact(contact.x, contact.y);
                    }
                }),
                ListenerOptions::default(),
            )?
        };

        debug!(target: "movement", "Movement tracker created for {:?}", target);

        self.tracked.insert(
            target,
            TrackedElement {
                tracker: Rc::clone(&tracker),
                contact_start,
                contact_move,
            },
        );

        Ok(tracker)
    }
}

//--- EventRegistry Implementation ----------------------------------------
//
// The interception point. Everything the host exposes for subscription
// goes through here.
//
impl<R: EventRegistry> EventRegistry for MovementPolyfill<R> {
    fn add_listener(
        &mut self,
        target: ElementId,
        kind: EventKind,
        listener: Listener,
        options: ListenerOptions,
    ) -> Result<ListenerId, RegistryError> {
        if kind != EventKind::PointerMove {
            return self.raw.add_listener(target, kind, listener, options);
        }

        let tracker = self.ensure_tracker(target)?;
        let mut inner = listener;
        let wrapped = Listener::function(move |event: &mut Event| {
            if let Some(pointer) = event.as_pointer_mut() {
                if pointer.movement.is_none() {
                    pointer.movement = Some(tracker.borrow().delta());
                }
            }
            inner.invoke(event);
        });

        self.raw.add_listener(target, kind, wrapped, options)
    }

    fn remove_listener(
        &mut self,
        target: ElementId,
        listener: ListenerId,
    ) -> Result<(), RegistryError> {
        self.raw.remove_listener(target, listener)
    }
}

//--- Hub Front Door -------------------------------------------------------
//
// When backed by the in-process hub, the adapter is the page's entire
// surface: element allocation and dispatch forward to the hub, so no
// caller needs (or gets) a path around the interception.
//
impl MovementPolyfill<EventHub> {
    /// Allocates a fresh element on the underlying hub.
    pub fn create_element(&mut self) -> ElementId {
        self.raw.create_element()
    }

    /// Delivers `event` through the underlying hub.
    pub fn dispatch(
        &mut self,
        target: ElementId,
        event: &mut Event,
    ) -> Result<usize, RegistryError> {
        self.raw.dispatch(target, event)
    }

    /// Live listener count on `target`, wrapped and tracking listeners
    /// included.
    pub fn listener_count(&self, target: ElementId) -> usize {
        self.raw.listener_count(target)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
