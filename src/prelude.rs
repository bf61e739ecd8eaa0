//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use aetheric_layers::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application
pub use crate::app::{App, AppBuilder};

// Configuration
pub use crate::core::config::{Color, Config, LayerDescriptor, WindowConfig};

// Geometry
pub use crate::core::geometry::{Point, Rect, Size};

// Interaction
pub use crate::core::input::{MouseButton, RawPointerEvent};
pub use crate::core::region::{Region, RegionId};
pub use crate::core::surface::InteractionSurface;
