//=========================================================================
// Tactile Library Root
//
// This crate defines the public API surface of the Tactile host.
//
// Responsibilities:
// - Expose the host entry point (`Host`, `HostBuilder`) and the
//   application contract (`Application`)
// - Expose the core event plumbing for embedders that wire their own
//   loop (hub, movement adapter, pump)
// - Keep the Winit translation layer in its own module
//
// Typical usage:
// ```no_run
// use tactile::{Application, HostBuilder, Page, ViewportFlags};
// use tactile::core::ElementId;
//
// struct Ui;
//
// impl Application for Ui {
//     fn start(&mut self, page: &mut Page, mount: ElementId, flags: ViewportFlags) {
//         // subscribe to events through `page`
//         let _ = (page, mount, flags);
//     }
// }
//
// fn main() {
//     HostBuilder::new().build().run(Ui);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the event model, subscription registry, movement
// synthesis adapter, and event pump. It is exposed publicly for
// embedders that drive dispatch themselves, but normal application code
// mostly uses the top-level `Host` facade.
//
// `platform` contains the Winit-facing translation layer, public so an
// embedding event loop can construct its bridge.
//
pub mod core;
pub mod platform;

//--- Internal Modules ----------------------------------------------------
//
// `host` defines the bootstrap and run loop.
//
mod host;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the host entry points so users can simply
// `use tactile::HostBuilder;` without knowing the module structure.
//
pub use host::{Application, Host, HostBuilder, Page, ViewportFlags};

pub mod prelude;
