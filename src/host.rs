//=========================================================================
// Host
//
// Entry point and coordinator for the pointer input host.
//
// Architecture:
// ```text
//     HostBuilder  ──build()──>  Host  ──run(app)──>  [Event Loop]
//         │                       │
//         ├─ with_viewport()      ├─ installs MovementPolyfill
//         └─ with_channel_        ├─ boots the application once
//            capacity()           └─ pumps and dispatches until
//                                    shutdown
// ```
//
// The embedded application is an opaque collaborator: it receives a
// mount element, the startup viewport flags, and the patched
// subscription surface, and owns its own behavior from then on.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::event::ElementId;
use crate::core::hub::EventHub;
use crate::core::movement::MovementPolyfill;
use crate::core::pump::{EventPump, HostEvent, PumpControl};

//=== Page ================================================================

/// The subscription surface handed to the application: the in-process
/// hub fronted by the movement synthesis adapter.
///
/// Installed once at startup, so every subscriber (the application and
/// anything it delegates to) transparently receives augmented
/// pointer-move events. There is no path around the adapter.
pub type Page = MovementPolyfill<EventHub>;

//=== ViewportFlags =======================================================

/// Startup configuration vector passed to the application: the initial
/// viewport dimensions in pixels, height first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFlags {
    pub height: f64,
    pub width: f64,
}

impl ViewportFlags {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }
}

//=== Application =========================================================

/// The embedded UI application, treated as opaque.
///
/// `start` is called exactly once, before the event loop begins. The
/// host has no further interaction with the application; events reach
/// it only through the listeners it registered on `page`.
pub trait Application {
    fn start(&mut self, page: &mut Page, mount: ElementId, flags: ViewportFlags);
}

//=== HostBuilder =========================================================

/// Builder for configuring and constructing a [`Host`].
///
/// # Default Values
///
/// - **Viewport**: 600.0 × 800.0 (height × width)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use tactile::{Application, HostBuilder, Page, ViewportFlags};
/// use tactile::core::{ElementId, EventKind, EventRegistry, Listener, ListenerOptions};
///
/// struct Ui;
///
/// impl Application for Ui {
///     fn start(&mut self, page: &mut Page, mount: ElementId, flags: ViewportFlags) {
///         let _ = flags;
///         page.add_listener(
///             mount,
///             EventKind::PointerMove,
///             Listener::function(|event| {
///                 let pointer = event.as_pointer().unwrap();
///                 println!("moved by {:?}", pointer.movement);
///             }),
///             ListenerOptions::default(),
///         )
///         .unwrap();
///     }
/// }
///
/// HostBuilder::new()
///     .with_viewport(600.0, 800.0)
///     .build()
///     .run(Ui);
/// ```
pub struct HostBuilder {
    viewport: ViewportFlags,
    channel_capacity: usize,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            viewport: ViewportFlags::new(600.0, 800.0),
            channel_capacity: 128,
        }
    }

    /// Sets the initial viewport dimensions reported to the application.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_viewport(mut self, height: f64, width: f64) -> Self {
        assert!(
            height > 0.0 && width > 0.0,
            "Viewport dimensions must be positive, got {}x{}",
            height,
            width
        );
        self.viewport = ViewportFlags::new(height, width);
        self
    }

    /// Sets the capacity of the platform → host event channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the host: allocates the mount element, installs the
    /// movement adapter over the hub, and wires the event channel.
    pub fn build(self) -> Host {
        info!(
            "Building host (viewport: {}x{}, channel: {})",
            self.viewport.height, self.viewport.width, self.channel_capacity
        );

        let mut hub = EventHub::new();
        let mount = hub.create_element();
        let page = MovementPolyfill::install(hub);

        let (sender, receiver): (Sender<HostEvent>, Receiver<HostEvent>) =
            bounded(self.channel_capacity);

        Host {
            page,
            mount,
            viewport: self.viewport,
            sender,
            pump: EventPump::new(receiver),
        }
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Host ================================================================

/// Pointer input host runtime.
///
/// Owns the patched subscription surface, the application's mount
/// element, and the event pump. Platform-side producers feed the host
/// through clones of [`Host::sender`]; the host thread alone dispatches.
pub struct Host {
    page: Page,
    mount: ElementId,
    viewport: ViewportFlags,
    sender: Sender<HostEvent>,
    pump: EventPump,
}

impl Host {
    //--- Accessors --------------------------------------------------------

    /// The element the application is mounted on.
    pub fn mount(&self) -> ElementId {
        self.mount
    }

    /// A cloneable handle for platform-side event producers.
    pub fn sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    /// The viewport flags the application will be started with.
    pub fn viewport(&self) -> ViewportFlags {
        self.viewport
    }

    /// Direct access to the subscription surface, for embedders that
    /// drive dispatch themselves instead of calling [`Host::run`].
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    //--- Execution --------------------------------------------------------

    /// Boots the application, then pumps and dispatches events until a
    /// [`HostEvent::Shutdown`] arrives or every sender disconnects.
    ///
    /// The host's own sender handle is dropped once the loop starts, so
    /// the loop ends as soon as the last producer clone (obtained via
    /// [`Host::sender`] before `run`) goes away. Dispatch failures (an
    /// event aimed at an element that was never allocated) are logged
    /// and dropped; they indicate a misbehaving producer, not a host
    /// fault.
    pub fn run(self, mut app: impl Application) {
        let Host {
            mut page,
            mount,
            viewport,
            sender,
            mut pump,
        } = self;

        info!("Starting host (mount: {:?})", mount);

        app.start(&mut page, mount, viewport);
        info!("Application started");

        // Producers hold their own clones; keeping this one would keep
        // the loop alive with no one left to feed it.
        drop(sender);

        loop {
            match pump.collect() {
                PumpControl::Exit => break,
                PumpControl::Continue => {
                    for (target, mut event) in pump.take_events() {
                        if let Err(error) = page.dispatch(target, &mut event) {
                            warn!(
                                target: "host",
                                "Dropping event for {:?}: {}",
                                target,
                                error
                            );
                        }
                    }
                }
            }
        }

        info!("Host shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{Contact, Event, EventKind};
    use crate::core::listener::{Listener, ListenerOptions};
    use crate::core::registry::EventRegistry;
    use std::cell::RefCell;
    use std::rc::Rc;

    //=====================================================================
    // HostBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = HostBuilder::new();
        assert_eq!(builder.viewport, ViewportFlags::new(600.0, 800.0));
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_viewport() {
        let builder = HostBuilder::new().with_viewport(1080.0, 1920.0);
        assert_eq!(builder.viewport, ViewportFlags::new(1080.0, 1920.0));
    }

    #[test]
    #[should_panic(expected = "Viewport dimensions must be positive")]
    fn builder_rejects_zero_viewport() {
        HostBuilder::new().with_viewport(0.0, 800.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_rejects_zero_capacity() {
        HostBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn build_creates_mount_element() {
        let mut host = HostBuilder::new().build();
        let mount = host.mount();
        assert_eq!(host.page_mut().listener_count(mount), 0);
    }

    //=====================================================================
    // Run Loop Tests
    //=====================================================================

    struct RecordingApp {
        flags: Rc<RefCell<Option<ViewportFlags>>>,
        movements: Rc<RefCell<Vec<Option<(f64, f64)>>>>,
    }

    impl Application for RecordingApp {
        fn start(&mut self, page: &mut Page, mount: ElementId, flags: ViewportFlags) {
            *self.flags.borrow_mut() = Some(flags);

            let sink = Rc::clone(&self.movements);
            page.add_listener(
                mount,
                EventKind::PointerMove,
                Listener::function(move |event| {
                    sink.borrow_mut().push(event.as_pointer().unwrap().movement);
                }),
                ListenerOptions::default(),
            )
            .unwrap();
        }
    }

    #[test]
    fn run_starts_app_with_viewport_flags() {
        let host = HostBuilder::new().with_viewport(480.0, 640.0).build();
        let flags = Rc::new(RefCell::new(None));

        host.sender().send(HostEvent::Shutdown).unwrap();
        host.run(RecordingApp {
            flags: Rc::clone(&flags),
            movements: Rc::new(RefCell::new(Vec::new())),
        });

        assert_eq!(*flags.borrow(), Some(ViewportFlags::new(480.0, 640.0)));
    }

    #[test]
    fn run_delivers_synthesized_movement_end_to_end() {
        let host = HostBuilder::new().build();
        let mount = host.mount();
        let sender = host.sender();
        let movements = Rc::new(RefCell::new(Vec::new()));

        // Platform-side feed: a touch gesture, a movement-less pointer
        // move, then shutdown.
        sender
            .send(HostEvent::Dispatch {
                target: mount,
                event: Event::contact(EventKind::ContactStart, vec![Contact::new(10.0, 20.0)]),
            })
            .unwrap();
        sender
            .send(HostEvent::Dispatch {
                target: mount,
                event: Event::contact(EventKind::ContactMove, vec![Contact::new(15.0, 26.0)]),
            })
            .unwrap();
        sender
            .send(HostEvent::Dispatch {
                target: mount,
                event: Event::pointer(EventKind::PointerMove, 15.0, 26.0),
            })
            .unwrap();
        sender.send(HostEvent::Shutdown).unwrap();

        host.run(RecordingApp {
            flags: Rc::new(RefCell::new(None)),
            movements: Rc::clone(&movements),
        });

        assert_eq!(*movements.borrow(), vec![Some((5.0, 6.0))]);
    }

    #[test]
    fn run_exits_when_senders_disconnect() {
        let host = HostBuilder::new().build();

        let sender = host.sender();
        drop(sender);

        // No producer left: run must return without an explicit shutdown.
        host.run(RecordingApp {
            flags: Rc::new(RefCell::new(None)),
            movements: Rc::new(RefCell::new(Vec::new())),
        });
    }

    #[test]
    fn run_survives_events_for_unknown_elements() {
        let host = HostBuilder::new().build();
        let sender = host.sender();

        sender
            .send(HostEvent::Dispatch {
                target: ElementId(9999),
                event: Event::pointer(EventKind::Click, 0.0, 0.0),
            })
            .unwrap();
        sender.send(HostEvent::Shutdown).unwrap();

        // Must not panic.
        host.run(RecordingApp {
            flags: Rc::new(RefCell::new(None)),
            movements: Rc::new(RefCell::new(Vec::new())),
        });
    }
}
