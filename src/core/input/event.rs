//=========================================================================
// Pointer Event Types
//
// Defines the internal representation of pointer (mouse and touch) input.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// two layers:
// - `RawPointerEvent`: what the device did (button pressed at a point,
//   finger lifted, cursor moved), in logical pixels
// - `InteractionEvent`: what a scene node observes after hit testing
//   (down, up, up-outside, move, tap, ...)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    RawPointerEvent (this module)
//         ↓
//    InteractionManager (hit testing, tap synthesis)
//         ↓
//    InteractionEvent (this module)
//         ↓
//    InteractionSurface / Region listeners
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Point;
use crate::core::region::RegionId;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right). Presses are not dispatched.
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== PointerId ===========================================================

/// Identifies one pointer for the lifetime of a press.
///
/// The mouse is a single pointer; every finger on a touch screen gets its
/// own id from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

impl PointerId {
    pub fn is_touch(&self) -> bool {
        matches!(self, PointerId::Touch(_))
    }
}

//=== RawPointerEvent =====================================================

/// Device-level pointer event in logical pixels.
///
/// Produced by the platform's input processor. Mouse button events carry
/// the last known cursor position because the platform reports buttons
/// and motion separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPointerEvent {
    MouseDown { button: MouseButton, position: Point },
    MouseUp { button: MouseButton, position: Point },
    MouseMoved { position: Point },

    TouchStart { id: u64, position: Point },
    TouchMoved { id: u64, position: Point },
    TouchEnd { id: u64, position: Point },

    /// The platform aborted the touch (gesture stolen, window lost focus).
    TouchCancel { id: u64, position: Point },
}

//=== PointerData =========================================================

/// Pointer payload attached to every interaction event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerData {
    pub pointer: PointerId,

    /// Position in the stage's (parent) space.
    pub position: Point,

    /// Number of fingers on the screen when the event fired, including a
    /// finger that just went down. `None` for mouse events.
    pub touches: Option<usize>,
}

impl PointerData {
    pub fn mouse(position: Point) -> Self {
        Self {
            pointer: PointerId::Mouse,
            position,
            touches: None,
        }
    }

    pub fn touch(id: u64, position: Point, touches: usize) -> Self {
        Self {
            pointer: PointerId::Touch(id),
            position,
            touches: Some(touches),
        }
    }

    /// True when another finger was already down when this one started.
    pub fn is_not_first_touch(&self) -> bool {
        self.touches.is_some_and(|count| count > 1)
    }
}

//=== Target ==============================================================

/// An interactive node: the stage or one of the regions on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Stage,
    Region(RegionId),
}

//=== InteractionKind =====================================================

/// What a node observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Mouse button pressed over the node.
    PointerDown,

    /// Mouse button released over the node.
    PointerUp,

    /// Mouse button released elsewhere after being pressed over the node.
    PointerUpOutside,

    /// Cursor moved anywhere (delivered to every node).
    PointerMove,

    /// Finger touched down over the node.
    TouchStart,

    /// Finger lifted over the node.
    TouchEnd,

    /// Finger lifted elsewhere after touching down over the node.
    TouchEndOutside,

    /// Finger moved anywhere (delivered to every node).
    TouchMove,

    /// Finger touched down and lifted over the same node.
    Tap,
}

//=== InteractionEvent ====================================================

/// A hit-tested event delivered to one node.
///
/// `current` is the node whose listeners run; `target` is the top-most
/// interactive node under the pointer (the stage when no region was hit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionEvent {
    pub kind: InteractionKind,
    pub current: Target,
    pub target: Target,
    pub data: PointerData,
}

//=========================================================================
// Unit Tests
//=========================================================================
