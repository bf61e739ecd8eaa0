//=========================================================================
// Interaction Manager
//=========================================================================
//
// Hit-tests raw pointer events against the scene and synthesizes the
// per-node events listeners bind to.
//
// Architecture:
//   RawPointerEvent → process() → hit test (top-most region first)
//                                     ↓
//                    Vec<InteractionEvent> (region first, then stage)
//
// Rules:
// - Press: hit region (if any) then the stage; both remember the pointer
// - Release: hit nodes get up (+ tap for a finger pressed on them),
//   nodes pressed but not hit get up-outside
// - Move: every node, regardless of hit
// - Right mouse button: ignored
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{
    InteractionEvent, InteractionKind, MouseButton, PointerData, PointerId, RawPointerEvent,
    Target,
};
use crate::core::geometry::Point;
use crate::core::region::RegionId;

//=== InteractiveScene ====================================================

/// Hit-testing view of a scene, implemented by the interaction surface.
pub trait InteractiveScene {
    /// Number of interactive regions, in paint order.
    fn region_count(&self) -> usize;

    /// Whether region `id` contains `point`.
    fn region_contains(&self, id: RegionId, point: Point) -> bool;

    /// Whether the stage's own (non-region) content contains `point`.
    fn stage_contains(&self, point: Point) -> bool;
}

//=== Release Mode ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    Lifted,
    Cancelled,
}

//=== InteractionManager ==================================================

/// Stateful pointer dispatcher.
///
/// Tracks which nodes each pointer went down on (for up-outside and tap
/// synthesis) and which fingers are currently on the screen.
#[derive(Debug, Default)]
pub struct InteractionManager {
    pressed: HashSet<(Target, PointerId)>,
    active_touches: HashSet<u64>,
}

impl InteractionManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Queries ----------------------------------------------------------

    /// Top-most region containing `point`.
    pub fn hit_region<S: InteractiveScene>(scene: &S, point: Point) -> Option<RegionId> {
        (0..scene.region_count())
            .rev()
            .map(RegionId)
            .find(|id| scene.region_contains(*id, point))
    }

    //--- Event Processing -------------------------------------------------

    /// Converts one raw event into the ordered list of node events.
    pub fn process<S: InteractiveScene>(
        &mut self,
        scene: &S,
        event: &RawPointerEvent,
    ) -> Vec<InteractionEvent> {
        let events = match *event {
            RawPointerEvent::MouseDown { button, position } => {
                if button == MouseButton::Right {
                    trace!(target: "input", "Right button press ignored");
                    return Vec::new();
                }
                self.press(scene, PointerData::mouse(position), InteractionKind::PointerDown)
            }

            RawPointerEvent::MouseUp { button, position } => {
                if button == MouseButton::Right {
                    return Vec::new();
                }
                self.release(scene, PointerData::mouse(position), Release::Lifted)
            }

            RawPointerEvent::MouseMoved { position } => {
                self.broadcast_move(scene, PointerData::mouse(position), InteractionKind::PointerMove)
            }

            RawPointerEvent::TouchStart { id, position } => {
                self.active_touches.insert(id);
                let data = PointerData::touch(id, position, self.active_touches.len());
                self.press(scene, data, InteractionKind::TouchStart)
            }

            RawPointerEvent::TouchMoved { id, position } => {
                let data = PointerData::touch(id, position, self.active_touches.len());
                self.broadcast_move(scene, data, InteractionKind::TouchMove)
            }

            RawPointerEvent::TouchEnd { id, position } => {
                self.active_touches.remove(&id);
                let data = PointerData::touch(id, position, self.active_touches.len());
                self.release(scene, data, Release::Lifted)
            }

            RawPointerEvent::TouchCancel { id, position } => {
                self.active_touches.remove(&id);
                let data = PointerData::touch(id, position, self.active_touches.len());
                self.release(scene, data, Release::Cancelled)
            }
        };

        trace!(target: "input", "{:?} -> {} node events", event, events.len());
        events
    }

    //--- Internal Helpers -------------------------------------------------

    fn press<S: InteractiveScene>(
        &mut self,
        scene: &S,
        data: PointerData,
        kind: InteractionKind,
    ) -> Vec<InteractionEvent> {
        let hit = Self::hit_region(scene, data.position);
        let target = hit.map(Target::Region).unwrap_or(Target::Stage);
        let stage_hit = hit.is_some() || scene.stage_contains(data.position);

        let mut events = Vec::with_capacity(2);

        if let Some(id) = hit {
            let current = Target::Region(id);
            self.pressed.insert((current, data.pointer));
            events.push(InteractionEvent { kind, current, target, data });
        }

        if stage_hit {
            self.pressed.insert((Target::Stage, data.pointer));
            events.push(InteractionEvent { kind, current: Target::Stage, target, data });
        }

        events
    }

    fn release<S: InteractiveScene>(
        &mut self,
        scene: &S,
        data: PointerData,
        mode: Release,
    ) -> Vec<InteractionEvent> {
        let (hit, stage_hit) = match mode {
            Release::Lifted => {
                let hit = Self::hit_region(scene, data.position);
                (hit, hit.is_some() || scene.stage_contains(data.position))
            }
            Release::Cancelled => (None, false),
        };
        let target = hit.map(Target::Region).unwrap_or(Target::Stage);
        let is_touch = data.pointer.is_touch();

        let (up, outside) = if is_touch {
            (InteractionKind::TouchEnd, InteractionKind::TouchEndOutside)
        } else {
            (InteractionKind::PointerUp, InteractionKind::PointerUpOutside)
        };

        let nodes = (0..scene.region_count())
            .rev()
            .map(|index| {
                let id = RegionId(index);
                (Target::Region(id), hit == Some(id))
            })
            .chain(std::iter::once((Target::Stage, stage_hit)));

        let mut events = Vec::new();

        for (current, is_hit) in nodes {
            let was_down = self.pressed.remove(&(current, data.pointer));

            if is_hit {
                events.push(InteractionEvent { kind: up, current, target, data });
                if is_touch && was_down {
                    events.push(InteractionEvent {
                        kind: InteractionKind::Tap,
                        current,
                        target,
                        data,
                    });
                }
            } else if was_down {
                events.push(InteractionEvent { kind: outside, current, target, data });
            }
        }

        events
    }

    fn broadcast_move<S: InteractiveScene>(
        &self,
        scene: &S,
        data: PointerData,
        kind: InteractionKind,
    ) -> Vec<InteractionEvent> {
        let target = Self::hit_region(scene, data.position)
            .map(Target::Region)
            .unwrap_or(Target::Stage);

        (0..scene.region_count())
            .rev()
            .map(|index| Target::Region(RegionId(index)))
            .chain(std::iter::once(Target::Stage))
            .map(|current| InteractionEvent { kind, current, target, data })
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Rect, Size};

    //--- Test Scene -------------------------------------------------------

    struct TestScene {
        regions: Vec<Rect>,
        stage: Rect,
    }

    impl TestScene {
        /// Two overlapping regions on an 800x600 stage:
        /// 0 at (0,0) 100x100, 1 at (50,50) 100x100 (painted on top).
        fn overlapping() -> Self {
            Self {
                regions: vec![
                    Rect::new(Point::new(0.0, 0.0), Size::new(100.0, 100.0)),
                    Rect::new(Point::new(50.0, 50.0), Size::new(100.0, 100.0)),
                ],
                stage: Rect::new(Point::ORIGIN, Size::new(800.0, 600.0)),
            }
        }
    }

    impl InteractiveScene for TestScene {
        fn region_count(&self) -> usize {
            self.regions.len()
        }

        fn region_contains(&self, id: RegionId, point: Point) -> bool {
            self.regions[id.0].contains(point)
        }

        fn stage_contains(&self, point: Point) -> bool {
            self.stage.contains(point)
        }
    }

    fn kinds_for(events: &[InteractionEvent], current: Target) -> Vec<InteractionKind> {
        events
            .iter()
            .filter(|e| e.current == current)
            .map(|e| e.kind)
            .collect()
    }

    //=====================================================================
    // Hit Testing
    //=====================================================================

    #[test]
    fn hit_prefers_topmost_region() {
        let scene = TestScene::overlapping();
        assert_eq!(InteractionManager::hit_region(&scene, Point::new(75.0, 75.0)), Some(RegionId(1)));
        assert_eq!(InteractionManager::hit_region(&scene, Point::new(10.0, 10.0)), Some(RegionId(0)));
        assert_eq!(InteractionManager::hit_region(&scene, Point::new(500.0, 500.0)), None);
    }

    //=====================================================================
    // Press
    //=====================================================================

    #[test]
    fn mouse_down_on_region_reaches_region_then_stage() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let events = manager.process(
            &scene,
            &RawPointerEvent::MouseDown { button: MouseButton::Left, position: Point::new(75.0, 75.0) },
        );

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].current, Target::Region(RegionId(1)));
        assert_eq!(events[1].current, Target::Stage);
        assert!(events.iter().all(|e| e.kind == InteractionKind::PointerDown));
        assert!(events.iter().all(|e| e.target == Target::Region(RegionId(1))));
        assert!(manager.pressed.contains(&(Target::Region(RegionId(1)), PointerId::Mouse)));
        assert!(!manager.pressed.contains(&(Target::Region(RegionId(0)), PointerId::Mouse)));
    }

    #[test]
    fn mouse_down_on_background_targets_stage() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let events = manager.process(
            &scene,
            &RawPointerEvent::MouseDown { button: MouseButton::Left, position: Point::new(500.0, 500.0) },
        );

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].current, Target::Stage);
        assert_eq!(events[0].target, Target::Stage);
    }

    #[test]
    fn right_button_is_ignored() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let events = manager.process(
            &scene,
            &RawPointerEvent::MouseDown { button: MouseButton::Right, position: Point::new(10.0, 10.0) },
        );
        assert!(events.is_empty());
    }

    //=====================================================================
    // Release
    //=====================================================================

    #[test]
    fn release_elsewhere_is_up_outside_for_pressed_region() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        manager.process(
            &scene,
            &RawPointerEvent::MouseDown { button: MouseButton::Left, position: Point::new(10.0, 10.0) },
        );
        let events = manager.process(
            &scene,
            &RawPointerEvent::MouseUp { button: MouseButton::Left, position: Point::new(500.0, 500.0) },
        );

        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(0))),
            vec![InteractionKind::PointerUpOutside]
        );
        assert_eq!(kinds_for(&events, Target::Stage), vec![InteractionKind::PointerUp]);
        assert!(kinds_for(&events, Target::Region(RegionId(1))).is_empty());
        assert!(!manager.pressed.contains(&(Target::Region(RegionId(0)), PointerId::Mouse)));
    }

    #[test]
    fn release_over_unpressed_region_is_plain_up() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let events = manager.process(
            &scene,
            &RawPointerEvent::MouseUp { button: MouseButton::Left, position: Point::new(10.0, 10.0) },
        );

        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(0))),
            vec![InteractionKind::PointerUp]
        );
    }

    #[test]
    fn touch_lift_on_same_region_taps() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        manager.process(&scene, &RawPointerEvent::TouchStart { id: 3, position: Point::new(10.0, 10.0) });
        let events = manager.process(&scene, &RawPointerEvent::TouchEnd { id: 3, position: Point::new(20.0, 20.0) });

        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(0))),
            vec![InteractionKind::TouchEnd, InteractionKind::Tap]
        );
        assert_eq!(
            kinds_for(&events, Target::Stage),
            vec![InteractionKind::TouchEnd, InteractionKind::Tap]
        );
        // Region listeners run before the stage's.
        assert_eq!(events[0].current, Target::Region(RegionId(0)));
        assert_eq!(events.last().map(|e| e.current), Some(Target::Stage));
    }

    #[test]
    fn touch_lift_on_other_region_does_not_tap_it() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        manager.process(&scene, &RawPointerEvent::TouchStart { id: 3, position: Point::new(10.0, 10.0) });
        let events = manager.process(&scene, &RawPointerEvent::TouchEnd { id: 3, position: Point::new(140.0, 140.0) });

        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(0))),
            vec![InteractionKind::TouchEndOutside]
        );
        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(1))),
            vec![InteractionKind::TouchEnd]
        );
        assert_eq!(
            kinds_for(&events, Target::Stage),
            vec![InteractionKind::TouchEnd, InteractionKind::Tap]
        );
    }

    #[test]
    fn touch_cancel_releases_outside_without_tap() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        manager.process(&scene, &RawPointerEvent::TouchStart { id: 1, position: Point::new(10.0, 10.0) });
        let events = manager.process(&scene, &RawPointerEvent::TouchCancel { id: 1, position: Point::new(10.0, 10.0) });

        assert_eq!(
            kinds_for(&events, Target::Region(RegionId(0))),
            vec![InteractionKind::TouchEndOutside]
        );
        assert_eq!(kinds_for(&events, Target::Stage), vec![InteractionKind::TouchEndOutside]);
        assert_eq!(manager.active_touches.len(), 0);
    }

    //=====================================================================
    // Touch Counting
    //=====================================================================

    #[test]
    fn touch_count_includes_new_finger() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let first = manager.process(&scene, &RawPointerEvent::TouchStart { id: 1, position: Point::new(10.0, 10.0) });
        assert_eq!(first[0].data.touches, Some(1));

        let second = manager.process(&scene, &RawPointerEvent::TouchStart { id: 2, position: Point::new(300.0, 300.0) });
        assert_eq!(second[0].data.touches, Some(2));
        assert!(second[0].data.is_not_first_touch());

        manager.process(&scene, &RawPointerEvent::TouchEnd { id: 1, position: Point::new(10.0, 10.0) });
        assert_eq!(manager.active_touches.len(), 1);
    }

    //=====================================================================
    // Move
    //=====================================================================

    #[test]
    fn moves_reach_every_node() {
        let scene = TestScene::overlapping();
        let mut manager = InteractionManager::new();

        let events = manager.process(&scene, &RawPointerEvent::MouseMoved { position: Point::new(700.0, 10.0) });

        assert_eq!(events.len(), 3, "Two regions plus the stage");
        assert!(events.iter().all(|e| e.kind == InteractionKind::PointerMove));
        assert!(events.iter().all(|e| e.target == Target::Stage));
    }
}
