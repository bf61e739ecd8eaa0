//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the interaction surface and the
// GPU renderer. Everything runs on the thread driving the event loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌───────────────────────────────────────────────┐
//  │  Winit Event Loop                             │
//  │   ↓                                           │
//  │  InputProcessor                               │
//  │   ├─ Converts Winit → RawPointerEvent         │
//  │   └─ Tracks cursor + scale factor             │
//  │   ↓                                           │
//  │  InputBuffer (ordered, moves coalesced)       │
//  │   ↓                                           │
//  │  RedrawRequested                              │
//  │   ├─ flush → InteractionSurface::handle_…     │
//  │   ├─ surface → DisplayList                    │
//  │   └─ Renderer::render → request_redraw        │
//  └───────────────────────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input applied in arrival order
//    → Scene repainted unconditionally
// ```
//
// Responsibilities:
// - Create and manage the OS window
// - Convert Winit pointer input to core events
// - Buffer input until the frame boundary
// - Drive the renderer once per frame
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod renderer;

//=== External Crates =====================================================

use std::sync::Arc;

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::{Config, ConfigError};
use crate::core::geometry::Size;
use crate::core::scene::DisplayList;
use crate::core::surface::InteractionSurface;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use renderer::Renderer;

pub use renderer::RenderError;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: the application stops when one occurs.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The configuration was rejected before the window opened.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// GPU setup or presentation failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

//=== Platform ============================================================

/// Window owner and per-frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config)`
/// 2. **Execution**: `platform.run()` blocks on the event loop
/// 3. **Resume**: window, interaction surface and renderer are created
/// 4. **Frames**: input flushed, scene drawn, next redraw requested
/// 5. **Shutdown**: window closed or fatal error → loop exits
///
/// The interaction surface survives suspend/resume cycles; the window
/// and the renderer do not.
pub(crate) struct Platform {
    config: Config,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    renderer: Option<Renderer>,

    surface: Option<InteractionSurface>,

    input_processor: InputProcessor,

    /// Pointer events received since the last frame.
    buffer: InputBuffer,

    /// Reused between frames.
    display_list: DisplayList,

    /// First fatal error, reported once the loop has exited.
    fatal: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(config: Config) -> Self {
        info!(target: "platform", "Platform subsystem initialized");

        let display_list = DisplayList::with_capacity(config.layers.len() + 1);

        Self {
            config,
            window: None,
            renderer: None,
            surface: None,
            input_processor: InputProcessor::new(1.0),
            buffer: InputBuffer::new(),
            display_list,
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start, or the
    /// first fatal error (window creation, GPU setup, presentation) that
    /// stopped it.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, PlatformError> {
        let window = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window.title.clone())
            .with_inner_size(LogicalSize::new(window.width, window.height));

        let window = event_loop.create_window(attrs)?;
        Ok(Arc::new(window))
    }

    /// Applies buffered input to the surface in arrival order.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        trace!(target: "platform::input", "Flushing {} pointer events", self.buffer.len());

        match self.surface.as_mut() {
            Some(surface) => {
                for event in self.buffer.drain() {
                    surface.handle_pointer(&event);
                }
            }
            None => {
                warn!(target: "platform::input", "No interaction surface, dropping input");
                self.buffer.drain().for_each(drop);
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        if let Some(surface) = &self.surface {
            surface.fill_display_list(&mut self.display_list);
        }

        let rendered = match self.renderer.as_mut() {
            Some(renderer) => renderer.render(&self.display_list),
            None => Ok(()),
        };

        if let Err(e) = rendered {
            self.fail(event_loop, e.into());
            return;
        }

        // Request next frame
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };

        let physical = window.inner_size();
        let scale_factor = window.scale_factor();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            physical.width,
            physical.height,
            scale_factor
        );

        self.input_processor.set_scale_factor(scale_factor);

        if self.surface.is_none() {
            let logical = physical.to_logical::<f32>(scale_factor);
            let viewport = Size::new(logical.width, logical.height);
            self.surface = Some(InteractionSurface::new(&self.config, viewport));
        }

        match Renderer::new(Arc::clone(&window)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    /// Drops GPU resources; they are rebuilt on the next resume.
    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Suspended, releasing window and renderer");
        self.renderer = None;
        self.window = None;
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(physical) => {
                let scale_factor = self
                    .window
                    .as_ref()
                    .map_or(1.0, |window| window.scale_factor());

                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical, scale_factor);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.set_scale_factor(scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_cursor_moved(position);
                self.buffer.push(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(&touch);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {
                // Ignore: keyboard, focus, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
