//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tactile::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host entry points
pub use crate::host::{Application, Host, HostBuilder, Page, ViewportFlags};

// Event model
pub use crate::core::event::{Contact, ElementId, Event, EventKind, PointerEvent};

// Subscription surface
pub use crate::core::listener::{EventHandler, Listener, ListenerId, ListenerOptions};
pub use crate::core::registry::{EventRegistry, RegistryError};

// Movement synthesis
pub use crate::core::movement::{MovementPolyfill, MovementTracker};

// Host loop plumbing
pub use crate::core::pump::{EventPump, HostEvent, PumpControl};

// Winit translation
pub use crate::platform::WinitBridge;
