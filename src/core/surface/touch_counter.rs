//=========================================================================
// Touch Counter
//=========================================================================
//
// Before/after finger counts used to tell single taps from multi-touch
// gestures.
//
// Pattern: touch_started() on every stage touch-start,
//          tap_finished() on every stage tap, sampling counts around it.
//
// A finger that lifts without producing a stage tap (lifted outside the
// window, cancelled) is never subtracted; the counter drifts upward and
// stays that way.
//
//=========================================================================

/// Current and previous concurrent-touch counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchCounter {
    current: u32,
    previous: u32,
}

impl TouchCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn previous(&self) -> u32 {
        self.previous
    }

    /// A finger went down on the stage.
    pub fn touch_started(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    /// Exactly one finger is being tracked.
    pub fn is_first_touch(&self) -> bool {
        self.current == 1
    }

    /// More than one finger was involved just before or right now.
    pub fn is_multitouch_gesture(&self) -> bool {
        self.previous > 1 || self.current > 1
    }

    /// A stage tap completed: shift `current` into `previous`, then drop one.
    pub fn tap_finished(&mut self) {
        self.previous = self.current;
        self.current = self.current.saturating_sub(1);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tap_cycle() {
        let mut counter = TouchCounter::new();

        counter.touch_started();
        assert!(counter.is_first_touch());
        assert!(!counter.is_multitouch_gesture());

        counter.tap_finished();
        assert_eq!((counter.current(), counter.previous()), (0, 1));
        assert!(!counter.is_multitouch_gesture());
    }

    #[test]
    fn two_finger_gesture_is_remembered_through_both_lifts() {
        let mut counter = TouchCounter::new();
        counter.touch_started();
        counter.touch_started();
        assert!(!counter.is_first_touch());
        assert!(counter.is_multitouch_gesture());

        counter.tap_finished();
        assert_eq!((counter.current(), counter.previous()), (1, 2));
        assert!(counter.is_first_touch());
        assert!(counter.is_multitouch_gesture(), "Previous count still > 1");

        counter.tap_finished();
        assert_eq!((counter.current(), counter.previous()), (0, 1));
        assert!(!counter.is_multitouch_gesture());
    }

    #[test]
    fn tap_without_touch_saturates_at_zero() {
        let mut counter = TouchCounter::new();
        counter.tap_finished();
        assert_eq!((counter.current(), counter.previous()), (0, 0));
    }
}
