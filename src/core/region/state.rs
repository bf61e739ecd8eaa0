//=========================================================================
// Region State
//=========================================================================
//
// Selection and drag state of one region as a single tagged enum.
//
// Transitions:
// ```text
//            select()                 begin_drag()
//   Idle ─────────────→ Selected ─────────────────→ Dragging{selected: true}
//    ↑  ←───────────────    ↑   ←─────────────────        │
//    │     deselect()       │        end_drag()           │
//    │                      └─────────────────────────────┘
//    │   begin_drag()
//    └──────────────────→ Dragging{selected: false}
// ```
//
// select()/deselect() do nothing while dragging. A drag belongs to the
// pointer that started it; other pointers cannot move it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::Point;
use crate::core::input::PointerId;

//=== RegionState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RegionState {
    /// Not selected, not dragging.
    #[default]
    Idle,

    /// Highlighted, not dragging.
    Selected,

    /// Following `pointer`. `offset` = sprite position − grab point.
    Dragging {
        selected: bool,
        offset: Point,
        pointer: PointerId,
    },
}

impl RegionState {
    //--- Queries ----------------------------------------------------------

    pub fn is_selected(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Selected => true,
            Self::Dragging { selected, .. } => *selected,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn drag_offset(&self) -> Option<Point> {
        match self {
            Self::Dragging { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// The pointer the drag follows.
    pub fn drag_pointer(&self) -> Option<PointerId> {
        match self {
            Self::Dragging { pointer, .. } => Some(*pointer),
            _ => None,
        }
    }

    /// Grab offset, if `pointer` is the one dragging.
    pub fn drag_offset_for(&self, pointer: PointerId) -> Option<Point> {
        match self {
            Self::Dragging { offset, pointer: owner, .. } if *owner == pointer => Some(*offset),
            _ => None,
        }
    }

    //--- Transitions ------------------------------------------------------

    pub fn select(self) -> Self {
        match self {
            Self::Idle | Self::Selected => Self::Selected,
            dragging => dragging,
        }
    }

    pub fn deselect(self) -> Self {
        match self {
            Self::Idle | Self::Selected => Self::Idle,
            dragging => dragging,
        }
    }

    /// Starts (or restarts) a drag for `pointer`, keeping the selection flag.
    pub fn begin_drag(self, offset: Point, pointer: PointerId) -> Self {
        Self::Dragging {
            selected: self.is_selected(),
            offset,
            pointer,
        }
    }

    pub fn end_drag(self) -> Self {
        match self {
            Self::Dragging { selected: true, .. } => Self::Selected,
            Self::Dragging { selected: false, .. } => Self::Idle,
            other => other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET: Point = Point::new(-5.0, -5.0);
    const MOUSE: PointerId = PointerId::Mouse;

    #[test]
    fn select_and_deselect_from_rest() {
        assert_eq!(RegionState::Idle.select(), RegionState::Selected);
        assert_eq!(RegionState::Selected.select(), RegionState::Selected);
        assert_eq!(RegionState::Selected.deselect(), RegionState::Idle);
        assert_eq!(RegionState::Idle.deselect(), RegionState::Idle);
    }

    #[test]
    fn selection_frozen_while_dragging() {
        let dragging = RegionState::Idle.begin_drag(OFFSET, MOUSE);
        assert_eq!(dragging.select(), dragging);

        let dragging = RegionState::Selected.begin_drag(OFFSET, MOUSE);
        assert_eq!(dragging.deselect(), dragging);
        assert!(dragging.deselect().is_selected());
    }

    #[test]
    fn drag_round_trip_restores_selection() {
        let state = RegionState::Selected.begin_drag(OFFSET, MOUSE);
        assert!(state.is_dragging());
        assert_eq!(state.drag_offset(), Some(OFFSET));
        assert_eq!(state.end_drag(), RegionState::Selected);

        assert_eq!(RegionState::Idle.begin_drag(OFFSET, MOUSE).end_drag(), RegionState::Idle);
    }

    #[test]
    fn end_drag_at_rest_is_noop() {
        assert_eq!(RegionState::Idle.end_drag(), RegionState::Idle);
        assert_eq!(RegionState::Selected.end_drag(), RegionState::Selected);
    }

    #[test]
    fn restarting_drag_replaces_offset() {
        let state = RegionState::Selected
            .begin_drag(OFFSET, MOUSE)
            .begin_drag(Point::new(-1.0, -2.0), MOUSE);
        assert_eq!(state.drag_offset(), Some(Point::new(-1.0, -2.0)));
        assert!(state.is_selected());
    }

    #[test]
    fn drag_follows_only_its_own_pointer() {
        let state = RegionState::Idle.begin_drag(OFFSET, PointerId::Touch(3));
        assert_eq!(state.drag_pointer(), Some(PointerId::Touch(3)));
        assert_eq!(state.drag_offset_for(PointerId::Touch(3)), Some(OFFSET));
        assert_eq!(state.drag_offset_for(PointerId::Touch(4)), None);
        assert_eq!(state.drag_offset_for(MOUSE), None);

        let regrabbed = state.begin_drag(OFFSET, MOUSE);
        assert_eq!(regrabbed.drag_pointer(), Some(MOUSE));
        assert_eq!(regrabbed.drag_offset_for(PointerId::Touch(3)), None);

        assert_eq!(RegionState::Selected.drag_pointer(), None);
        assert_eq!(RegionState::Selected.drag_offset_for(MOUSE), None);
    }
}
