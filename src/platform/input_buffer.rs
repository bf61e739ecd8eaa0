//=========================================================================
// Input Buffer
//
// Collects raw pointer events between two frame boundaries and hands
// them to the interaction surface in arrival order.
//
// Responsibilities:
// - Store incoming pointer events per frame, preserving order
// - Coalesce back-to-back moves of the same pointer
// - Provide drained access to collected events via `drain()`
//
// Notes:
// Only a move that directly follows another move of the same pointer is
// replaced. A press or release in between keeps both moves, so hit tests
// always run against the position the pointer had at that moment.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::{PointerId, RawPointerEvent};

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<RawPointerEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Appends an event. A move replaces the previous event when that one
    // is a move of the same pointer.
    //
    pub(crate) fn push(&mut self, event: RawPointerEvent) {
        if let Some(pointer) = moved_pointer(&event) {
            if let Some(last) = self.events.last_mut() {
                if moved_pointer(last) == Some(pointer) {
                    *last = event;
                    return;
                }
            }
        }

        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Yields all collected events for this frame. Capacity is retained.
    //
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, RawPointerEvent> {
        self.events.drain(..)
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn moved_pointer(event: &RawPointerEvent) -> Option<PointerId> {
    match event {
        RawPointerEvent::MouseMoved { .. } => Some(PointerId::Mouse),
        RawPointerEvent::TouchMoved { id, .. } => Some(PointerId::Touch(*id)),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::input::MouseButton;

    fn mouse_move(x: f32, y: f32) -> RawPointerEvent {
        RawPointerEvent::MouseMoved { position: Point::new(x, y) }
    }

    fn touch_move(id: u64, x: f32, y: f32) -> RawPointerEvent {
        RawPointerEvent::TouchMoved { id, position: Point::new(x, y) }
    }

    fn mouse_down(x: f32, y: f32) -> RawPointerEvent {
        RawPointerEvent::MouseDown { button: MouseButton::Left, position: Point::new(x, y) }
    }

    #[test]
    fn test_consecutive_moves_coalesce() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(10.0, 10.0));
        buffer.push(mouse_move(20.0, 30.0));

        let events: Vec<_> = buffer.drain().collect();
        assert_eq!(events, vec![mouse_move(20.0, 30.0)]);
    }

    #[test]
    fn test_moves_around_press_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(1.0, 1.0));
        buffer.push(mouse_down(1.0, 1.0));
        buffer.push(mouse_move(2.0, 2.0));

        let events: Vec<_> = buffer.drain().collect();
        assert_eq!(events, vec![mouse_move(1.0, 1.0), mouse_down(1.0, 1.0), mouse_move(2.0, 2.0)]);
    }

    #[test]
    fn test_moves_of_different_pointers_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(touch_move(1, 5.0, 5.0));
        buffer.push(touch_move(2, 6.0, 6.0));
        buffer.push(mouse_move(7.0, 7.0));

        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_same_touch_moves_coalesce() {
        let mut buffer = InputBuffer::new();
        buffer.push(touch_move(4, 5.0, 5.0));
        buffer.push(touch_move(4, 9.0, 9.0));

        let events: Vec<_> = buffer.drain().collect();
        assert_eq!(events, vec![touch_move(4, 9.0, 9.0)]);
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_down(0.0, 0.0));
        buffer.push(mouse_move(5.0, 5.0));

        assert_eq!(buffer.drain().count(), 2);
        assert!(buffer.is_empty());
    }

    //--- Memory Retention -------------------------------------------------
    #[test]
    fn test_drain_does_not_deallocate() {
        let mut buffer = InputBuffer::new();

        for i in 0..256 {
            buffer.push(mouse_down(i as f32, 0.0));
        }

        let cap_before = buffer.events.capacity();
        buffer.drain().for_each(drop);

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.events.capacity(), cap_before);
    }
}
