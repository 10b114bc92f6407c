//=========================================================================
// Core Subsystems
//
// Event plumbing shared by the host: the event model, the subscription
// registry contract and its in-process hub implementation, the movement
// synthesis adapter, and the channel-fed event pump.
//
// Notes:
// Everything here is single-threaded by construction (listeners are
// invoked synchronously inside dispatch); the pump's sender side is the
// one handle safe to hand to another thread.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod hub;
pub mod listener;
pub mod movement;
pub mod pump;
pub mod registry;

//=== Public Re-exports ===================================================

pub use event::{Contact, ContactEvent, ElementId, Event, EventKind, PointerEvent};
pub use hub::EventHub;
pub use listener::{EventHandler, Listener, ListenerId, ListenerOptions};
pub use movement::{MovementPolyfill, MovementTracker};
pub use pump::{EventPump, HostEvent, PumpControl};
pub use registry::{EventRegistry, RegistryError};
