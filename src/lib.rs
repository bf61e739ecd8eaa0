//=========================================================================
// Aetheric Layers — Library Root
//
// This crate defines the public API surface of the layer demo: colored
// rectangular regions over a full-window background that a mouse or a
// finger can select, highlight and drag, one at a time.
//
// Responsibilities:
// - Expose the application facade (`App`, `AppBuilder`)
// - Expose the platform-independent interaction logic (`core`)
// - Keep the windowing and GPU code (`platform`) hidden from users
//
// Typical usage:
// ```no_run
// use aetheric_layers::{AppBuilder, Config};
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     AppBuilder::new().with_config(Config::default()).build().run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//=== Public Modules ======================================================
//
// `core` contains the interaction logic (regions, surface, hit testing,
// configuration). It is exposed publicly so the logic can be driven
// without a window, e.g. from tests or another frontend.
//
pub mod core;
pub mod prelude;

//=== Internal Modules ====================================================
//
// `platform` contains the Winit event loop and the wgpu renderer. It is
// kept private, as it is not part of the public API surface.
//
// `app` defines the application entry point and its builder.
//
mod app;
mod platform;

//=== Public Exports ======================================================

pub use app::{App, AppBuilder};
pub use crate::core::{Config, ConfigError};
pub use platform::{PlatformError, RenderError};
