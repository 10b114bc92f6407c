//=========================================================================
// Event Pump
//=========================================================================
//
// Host-side event collection with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect() → drained events → PumpControl
//
// Bounded polling prevents starvation. Idle sleep reduces CPU usage.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::Duration;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Modules ====================================================

use crate::core::event::{ElementId, Event};

//=== HostEvent ===========================================================

/// Messages sent from platform-side producers to the host loop.
///
/// These are the only values that cross the thread boundary; dispatch
/// itself stays on the host thread.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Deliver `event` to the listeners of `target`.
    Dispatch { target: ElementId, event: Event },

    /// Tear the host loop down. Sent on window close or producer
    /// shutdown; the loop also exits if every sender disconnects.
    Shutdown,
}

//=== PumpControl =========================================================

/// Host loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpControl {
    Continue,
    Exit,
}

//=== EventPump ===========================================================

/// Drains pending host events each pass, in channel order.
pub struct EventPump {
    receiver: Receiver<HostEvent>,
    drained: Vec<(ElementId, Event)>,
}

impl EventPump {
    pub fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            drained: Vec::with_capacity(16),
        }
    }

    /// Collects pending events (bounded to prevent starvation).
    ///
    /// Returns `Exit` on [`HostEvent::Shutdown`] or when every sender has
    /// disconnected; sleeps briefly when the queue was empty so an idle
    /// host does not spin.
    pub fn collect(&mut self) -> PumpControl {
        const MAX_EVENTS_PER_PASS: usize = 100;
        const IDLE_SLEEP_MS: u64 = 10;

        self.drained.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_PASS {
            match self.receiver.try_recv() {
                Ok(HostEvent::Dispatch { target, event }) => {
                    self.drained.push((target, event));
                    drained += 1;
                }
                Ok(HostEvent::Shutdown) => return PumpControl::Exit,
                Err(TryRecvError::Disconnected) => return PumpControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_PASS {
            warn!(target: "pump", "Event backlog: drained {} events this pass", drained);
        }

        if drained == 0 {
            thread::sleep(Duration::from_millis(IDLE_SLEEP_MS));
        }

        PumpControl::Continue
    }

    /// Events drained by the last `collect` pass, in arrival order.
    pub fn events(&self) -> &[(ElementId, Event)] {
        &self.drained
    }

    /// Takes ownership of the drained events, leaving an empty buffer.
    pub fn take_events(&mut self) -> Vec<(ElementId, Event)> {
        std::mem::take(&mut self.drained)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventKind;
    use crossbeam_channel::unbounded;

    fn dispatch_event(target: ElementId) -> HostEvent {
        HostEvent::Dispatch {
            target,
            event: Event::pointer(EventKind::PointerMove, 0.0, 0.0),
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostEvent>();
        let mut pump = EventPump::new(rx);

        let result = pump.collect();

        assert_eq!(result, PumpControl::Continue);
        assert!(pump.events().is_empty());
    }

    #[test]
    fn collect_drains_in_arrival_order() {
        let (tx, rx) = unbounded();
        let mut pump = EventPump::new(rx);

        tx.send(dispatch_event(ElementId(1))).unwrap();
        tx.send(dispatch_event(ElementId(2))).unwrap();

        let result = pump.collect();

        assert_eq!(result, PumpControl::Continue);
        let targets: Vec<_> = pump.events().iter().map(|(t, _)| *t).collect();
        assert_eq!(targets, vec![ElementId(1), ElementId(2)]);
    }

    #[test]
    fn collect_returns_exit_on_shutdown() {
        let (tx, rx) = unbounded();
        let mut pump = EventPump::new(rx);

        tx.send(HostEvent::Shutdown).unwrap();

        assert_eq!(pump.collect(), PumpControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<HostEvent>();
        let mut pump = EventPump::new(rx);

        drop(tx);

        assert_eq!(pump.collect(), PumpControl::Exit);
    }

    #[test]
    fn collect_clears_previous_pass() {
        let (tx, rx) = unbounded();
        let mut pump = EventPump::new(rx);

        tx.send(dispatch_event(ElementId(1))).unwrap();
        pump.collect();
        assert_eq!(pump.events().len(), 1);

        pump.collect();
        assert!(pump.events().is_empty());
    }

    #[test]
    fn take_events_leaves_empty_buffer() {
        let (tx, rx) = unbounded();
        let mut pump = EventPump::new(rx);

        tx.send(dispatch_event(ElementId(1))).unwrap();
        pump.collect();

        let events = pump.take_events();
        assert_eq!(events.len(), 1);
        assert!(pump.events().is_empty());
    }
}
