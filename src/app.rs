//=========================================================================
// Aetheric Layers Application
//
// Main entry point: validates the configuration and hands it to the
// platform, which owns the window for the rest of the run.
//
// Architecture:
// ```text
//     AppBuilder  ──build()──>  App  ──run()──>  [Event Loop]
//         │                      │
//         ├─ with_config()       ├─ validates config
//         ├─ with_title()        └─ runs platform,
//         └─ with_layers()          blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::config::{Config, LayerDescriptor};
use crate::platform::{Platform, PlatformError};

//=== AppBuilder ==========================================================

/// Builder for configuring and constructing an [`App`].
///
/// # Default Values
///
/// - **Window**: "Aetheric Layers", 800x600, black background
/// - **Layers**: blue, magenta and green rectangles
///
/// # Examples
///
/// ```no_run
/// use aetheric_layers::AppBuilder;
///
/// AppBuilder::new().build().run()?;
/// # Ok::<(), aetheric_layers::PlatformError>(())
/// ```
///
/// Custom layers:
/// ```no_run
/// use aetheric_layers::prelude::*;
///
/// AppBuilder::new()
///     .with_title("Two layers")
///     .with_layers(vec![
///         LayerDescriptor::new(Point::new(10.0, 10.0), Color(0xff0000), 120.0, 80.0),
///         LayerDescriptor::new(Point::new(60.0, 40.0), Color(0x00ffff), 120.0, 80.0),
///     ])
///     .build()
///     .run()?;
/// # Ok::<(), aetheric_layers::PlatformError>(())
/// ```
pub struct AppBuilder {
    config: Config,
}

impl AppBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Replaces the layer list. Layers are stacked in the given order,
    /// the last one on top.
    pub fn with_layers(mut self, layers: Vec<LayerDescriptor>) -> Self {
        self.config.layers = layers;
        self
    }

    /// Builds the application instance.
    pub fn build(self) -> App {
        info!(
            "Building app ({} layers, window {}x{})",
            self.config.layers.len(),
            self.config.window.width,
            self.config.window.height
        );

        App { config: self.config }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== App =================================================================

/// Aetheric Layers runtime.
///
/// Create via [`AppBuilder`] with `AppBuilder::new().build()`.
pub struct App {
    config: Config,
}

impl App {
    /// The configuration the app will run with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Config`] for an invalid configuration
    /// before any window is opened, or the platform error that stopped
    /// the loop.
    pub fn run(self) -> Result<(), PlatformError> {
        self.config.validate()?;

        info!("Starting app runtime");

        let platform = Platform::new(self.config);
        let result = platform.run();

        info!("App shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
