//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into core RawPointerEvents.
//
// Architecture:
//   Winit Events → InputProcessor → RawPointerEvent (logical px) → Surface
//
// Stateful tracking: caches the scale factor (physical → logical) and the
// last cursor position, which Winit does not attach to button events.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton as WinitMouseButton, Touch, TouchPhase},
};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Point;
use crate::core::input::{MouseButton, RawPointerEvent};

//=== InputProcessor ======================================================

/// Converts Winit pointer events to core events in logical pixels.
pub(crate) struct InputProcessor {
    scale_factor: f64,
    cursor: Point,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            cursor: Point::ORIGIN,
        }
    }

    //--- State Management -------------------------------------------------

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    //--- Event Processing -------------------------------------------------

    /// Records the cursor and reports the move.
    pub(crate) fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> RawPointerEvent {
        self.cursor = self.to_logical(position);
        RawPointerEvent::MouseMoved { position: self.cursor }
    }

    /// Button press/release at the last known cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> RawPointerEvent {
        let button = MouseButton::from(button);
        let position = self.cursor;

        match state {
            ElementState::Pressed => RawPointerEvent::MouseDown { button, position },
            ElementState::Released => RawPointerEvent::MouseUp { button, position },
        }
    }

    pub(crate) fn process_touch(&self, touch: &Touch) -> RawPointerEvent {
        self.process_touch_phase(touch.id, touch.phase, touch.location)
    }

    pub(crate) fn process_touch_phase(
        &self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> RawPointerEvent {
        let position = self.to_logical(location);

        match phase {
            TouchPhase::Started => RawPointerEvent::TouchStart { id, position },
            TouchPhase::Moved => RawPointerEvent::TouchMoved { id, position },
            TouchPhase::Ended => RawPointerEvent::TouchEnd { id, position },
            TouchPhase::Cancelled => RawPointerEvent::TouchCancel { id, position },
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f32>(self.scale_factor);
        Point::new(logical.x, logical.y)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit mouse buttons to core buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let processor = InputProcessor::new(1.0);
        assert_eq!(processor.cursor, Point::ORIGIN);
    }

    #[test]
    fn cursor_move_converts_to_logical() {
        let mut processor = InputProcessor::new(2.0);
        let event = processor.process_cursor_moved(PhysicalPosition::new(100.0, 50.0));

        assert_eq!(event, RawPointerEvent::MouseMoved { position: Point::new(50.0, 25.0) });
        assert_eq!(processor.cursor, Point::new(50.0, 25.0));
    }

    #[test]
    fn mouse_button_uses_last_cursor_position() {
        let mut processor = InputProcessor::new(1.0);
        processor.process_cursor_moved(PhysicalPosition::new(30.0, 40.0));

        let down = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let up = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released);

        assert_eq!(
            down,
            RawPointerEvent::MouseDown { button: MouseButton::Left, position: Point::new(30.0, 40.0) }
        );
        assert_eq!(
            up,
            RawPointerEvent::MouseUp { button: MouseButton::Left, position: Point::new(30.0, 40.0) }
        );
    }

    #[test]
    fn scale_factor_change_applies_to_later_events() {
        let mut processor = InputProcessor::new(1.0);
        processor.set_scale_factor(4.0);

        let event = processor.process_touch_phase(9, TouchPhase::Started, PhysicalPosition::new(40.0, 80.0));
        assert_eq!(event, RawPointerEvent::TouchStart { id: 9, position: Point::new(10.0, 20.0) });
    }

    #[test]
    fn touch_phases_map_one_to_one() {
        let processor = InputProcessor::new(1.0);
        let at = PhysicalPosition::new(5.0, 6.0);
        let position = Point::new(5.0, 6.0);

        assert_eq!(processor.process_touch_phase(1, TouchPhase::Moved, at), RawPointerEvent::TouchMoved { id: 1, position });
        assert_eq!(processor.process_touch_phase(1, TouchPhase::Ended, at), RawPointerEvent::TouchEnd { id: 1, position });
        assert_eq!(processor.process_touch_phase(1, TouchPhase::Cancelled, at), RawPointerEvent::TouchCancel { id: 1, position });
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(7)), MouseButton::Other);
    }
}
