//=========================================================================
// Core
//
// Platform-independent logic of the layer demo.
//
// Responsibilities:
// - Configuration: layer descriptors and window settings (`config`)
// - Geometry in logical pixels (`geometry`)
// - Retained scene nodes and the per-frame display list (`scene`)
// - Pointer input: hit testing and event synthesis (`input`)
// - Selectable regions and their state machine (`region`)
// - The interaction surface coordinating all of the above (`surface`)
//
// Notes:
// Nothing here touches Winit or the GPU. Everything runs on the thread
// that drives the event loop, one handler at a time.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod geometry;
pub mod input;
pub mod region;
pub mod scene;
pub mod surface;

//=== Re-exports ==========================================================

pub use config::{Color, Config, ConfigError, LayerDescriptor, WindowConfig};
pub use geometry::{Point, Rect, Size};
pub use region::{Region, RegionId, RegionState};
pub use surface::InteractionSurface;
