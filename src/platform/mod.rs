//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level input) with the host via MPSC.
//
// Architecture:
// ```text
//  Event-Loop Thread:                Host Thread:
//  ┌──────────────────────────┐     ┌───────────────────┐
//  │  Winit Event Loop        │     │  EventPump        │
//  │   ↓                      │     │   ↓               │
//  │  WinitBridge             │     │  Page dispatch    │
//  │   ├─ Classifies events   │     │   ↓               │
//  │   ├─ Buffers mouse delta │     │  Listeners        │
//  │   └─ Gates touch fingers │     └───────────────────┘
//  │   ↓                      │              ↑
//  │  MPSC Channel ───────────┼──────────────┘
//  └──────────────────────────┘     HostEvent
// ```
//
// Key Design Decisions:
// - **Mice report movement natively**: a `DeviceEvent::MouseMotion`
//   delta is buffered and attached to the next cursor move, so mouse
//   pointer-move events reach the host with `movement` present and the
//   synthesis adapter leaves them alone
// - **Touch reports no movement**: a moved contact is forwarded as a
//   contact sample followed by a movement-less pointer move, the exact
//   shape the synthesis adapter exists for
// - **First finger wins**: Winit delivers per-finger touch events; the
//   bridge admits the first active finger and ignores the rest until it
//   lifts, matching first-contact-only tracking downstream
// - **Graceful channel disconnect**: if the host goes away the bridge
//   logs and drops events rather than panicking, so the OS window can
//   still be closed normally
//
// Responsibilities:
// - Classify Winit window/device events
// - Translate them into host Events aimed at the bridged element
// - Forward shutdown when the window close is requested
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{trace, warn};
use winit::event::{DeviceEvent, TouchPhase, WindowEvent};

//=== Internal Imports ====================================================

use crate::core::event::{Contact, ElementId, Event, EventKind, PointerEvent};
use crate::core::pump::HostEvent;

//=== WinitBridge =========================================================

/// Stateful translator from Winit events to host events.
///
/// One bridge serves one window and aims every event at a single target
/// element (the application mount). It lives on the event-loop thread;
/// only [`HostEvent`] values cross to the host.
pub struct WinitBridge {
    /// Element all translated events are dispatched to.
    target: ElementId,

    /// Channel to the host's event pump.
    sender: Sender<HostEvent>,

    /// Most recent unconsumed device motion delta. Winit reports raw
    /// mouse motion separately from cursor position; the delta is
    /// attached to the next cursor move and consumed once.
    pending_motion: Option<(f64, f64)>,

    /// Finger currently admitted for contact tracking, if any.
    active_finger: Option<u64>,
}

impl WinitBridge {
    //--- Construction -----------------------------------------------------

    pub fn new(target: ElementId, sender: Sender<HostEvent>) -> Self {
        Self {
            target,
            sender,
            pending_motion: None,
            active_finger: None,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Translates one window event; unmapped events are ignored.
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                trace!(target: "platform", "Window close requested");
                self.post(HostEvent::Shutdown);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y);
            }

            WindowEvent::Touch(touch) => {
                self.touch(touch.id, touch.phase, touch.location.x, touch.location.y);
            }

            _ => {
                // Resized, Focused, keyboard input, etc.: not pointer
                // traffic.
            }
        }
    }

    /// Translates one device event (raw mouse motion).
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_motion(delta.0, delta.1);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn mouse_motion(&mut self, dx: f64, dy: f64) {
        self.pending_motion = Some((dx, dy));
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        let mut pointer = PointerEvent::new(EventKind::PointerMove, x, y);
        pointer.movement = self.pending_motion.take();
        self.deliver(Event::Pointer(pointer));
    }

    fn touch(&mut self, finger: u64, phase: TouchPhase, x: f64, y: f64) {
        match phase {
            TouchPhase::Started => {
                if self.active_finger.is_some() {
                    trace!(target: "platform", "Ignoring extra finger {}", finger);
                    return;
                }
                self.active_finger = Some(finger);
                self.deliver(Event::contact(
                    EventKind::ContactStart,
                    vec![Contact::new(x, y)],
                ));
            }

            TouchPhase::Moved => {
                if self.active_finger != Some(finger) {
                    return;
                }
                self.deliver(Event::contact(
                    EventKind::ContactMove,
                    vec![Contact::new(x, y)],
                ));
                // Touch surfaces fire pointer movement without a native
                // movement pair; the synthesis adapter fills it in.
                self.deliver(Event::pointer(EventKind::PointerMove, x, y));
            }

            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_finger != Some(finger) {
                    return;
                }
                self.active_finger = None;
                self.deliver(Event::contact(
                    EventKind::ContactEnd,
                    vec![Contact::new(x, y)],
                ));
            }
        }
    }

    fn deliver(&self, event: Event) {
        self.post(HostEvent::Dispatch {
            target: self.target,
            event,
        });
    }

    fn post(&self, event: HostEvent) {
        if self.sender.send(event).is_err() {
            warn!(target: "platform", "Host disconnected, dropping event");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
