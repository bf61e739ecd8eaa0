//=========================================================================
// Input System
//
// Pointer input for the interaction surface.
//
// Responsibilities:
// - Represent mouse and touch input in a stable, portable way (`event`)
// - Hit-test raw pointer events against the scene and synthesize
//   per-node events: down, up, up-outside, move, tap (`interaction_manager`)
//
// Notes:
// The platform layer owns the conversion from Winit types; nothing in
// this module depends on the windowing backend.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod interaction_manager;

//=== Public API ==========================================================

pub use event::{
    InteractionEvent, InteractionKind, MouseButton, PointerData, PointerId, RawPointerEvent,
    Target,
};
pub use interaction_manager::{InteractionManager, InteractiveScene};
