//=========================================================================
// Subscription Registry Interface
//=========================================================================
//
// The contract behind which the host's subscription primitive lives.
//
// Downstream code (the embedded application, the movement adapter)
// depends on this interface, not on a concrete hub, so a decorator
// installed at startup can front the primitive for every caller.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::{ElementId, EventKind};
use crate::core::listener::{Listener, ListenerId, ListenerOptions};

//=== EventRegistry =======================================================

/// Subscribe/unsubscribe contract for per-element event listeners.
pub trait EventRegistry {
    /// Registers `listener` on `target` for events of `kind`, under the
    /// caller's `options`. Returns the handle used for removal.
    fn add_listener(
        &mut self,
        target: ElementId,
        kind: EventKind,
        listener: Listener,
        options: ListenerOptions,
    ) -> Result<ListenerId, RegistryError>;

    /// Removes a previously registered listener from `target`.
    fn remove_listener(
        &mut self,
        target: ElementId,
        listener: ListenerId,
    ) -> Result<(), RegistryError>;
}

//=== RegistryError =======================================================

/// Subscription and dispatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The target element was never allocated by this registry.
    UnknownElement(ElementId),

    /// The listener handle does not name a live registration.
    UnknownListener(ListenerId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "unknown element: {:?}", id),
            Self::UnknownListener(id) => write!(f, "unknown listener: {:?}", id),
        }
    }
}

impl std::error::Error for RegistryError {}

//=========================================================================
// Unit Tests
//=========================================================================
