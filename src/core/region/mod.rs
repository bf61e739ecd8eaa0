//=========================================================================
// Selectable Region
//=========================================================================
//
// One configured layer: a sprite plus its selection, drag and enabled
// state, and the listeners that turn pointer events into transitions.
//
// Listener bindings (run in this order per event kind):
// ```text
//   PointerDown       → AnnounceSelected, DragStart
//   Tap               → AnnounceSelectedTouch
//   TouchStart        → DragStartTouch
//   PointerUp(Outside)│
//   TouchEnd(Outside) → DragEnd
//   PointerMove       │
//   TouchMove         → DragMoveTouch
// ```
//
// Announcements go out through the `Notifier`; the surface applies them
// before the next listener runs.
//
//=========================================================================

//=== Module Declarations =================================================

mod notice;
mod state;

//=== Public API ==========================================================

pub use notice::{notice_channel, NoticeInbox, Notifier, RegionNotice};
pub use state::RegionState;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::config::{Color, LayerDescriptor};
use crate::core::geometry::{Point, Size};
use crate::core::input::{InteractionKind, PointerData};
use crate::core::scene::Sprite;

//=== Constants ===========================================================

/// Sprite alpha of the selected region.
pub const SELECTED_ALPHA: f32 = 1.0;

/// Sprite alpha of every other region.
pub const IDLE_ALPHA: f32 = 0.3;

//=== RegionId ============================================================

/// Index of a region in the surface's region sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

//=== Listener ============================================================

/// A unit of region behavior bound to an interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    AnnounceSelected,
    AnnounceSelectedTouch,
    DragStart,
    DragStartTouch,
    DragEnd,
    DragMoveTouch,
}

//=== Region ==============================================================

#[derive(Debug)]
pub struct Region {
    id: RegionId,
    sprite: Sprite,
    state: RegionState,
    enabled: bool,
    notifier: Notifier,
}

impl Region {
    //--- Construction -----------------------------------------------------

    pub fn new(id: RegionId, layer: LayerDescriptor, notifier: Notifier) -> Self {
        let sprite = Sprite::new(layer.position, layer.size(), layer.color)
            .with_alpha(IDLE_ALPHA);

        Self {
            id,
            sprite,
            state: RegionState::Idle,
            enabled: true,
            notifier,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn position(&self) -> Point {
        self.sprite.position()
    }

    pub fn size(&self) -> Size {
        self.sprite.size()
    }

    pub fn color(&self) -> Color {
        self.sprite.tint()
    }

    pub fn alpha(&self) -> f32 {
        self.sprite.alpha()
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state.is_selected()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn contains(&self, point: Point) -> bool {
        self.sprite.contains(point)
    }

    //--- Selection --------------------------------------------------------

    /// Highlights the region. No effect while dragging.
    pub fn select(&mut self) {
        self.set_state(self.state.select());
    }

    /// Dims the region. No effect while dragging.
    pub fn deselect(&mut self) {
        self.set_state(self.state.deselect());
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Suppresses drag-move until re-enabled; drag start/end still apply.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    //--- Announcements ----------------------------------------------------

    /// Asks the surface to select this region (mouse path).
    pub fn announce_selected(&self) {
        self.notifier.notify(RegionNotice::Selected(self.id));
    }

    /// Asks the surface to select this region (touch path).
    pub fn announce_selected_touch(&self) {
        self.notifier.notify(RegionNotice::SelectedTouch(self.id));
    }

    //--- Pointer Handlers -------------------------------------------------

    /// Begins dragging, anchored at the grab point.
    ///
    /// Bound after [`Region::announce_selected`] on pointer-down.
    pub fn on_pointer_down(&mut self, data: &PointerData) {
        let offset = self.sprite.position() - data.position;
        self.set_state(self.state.begin_drag(offset, data.pointer));
        debug!(
            target: "region",
            "{:?} drag start by {:?} at {:?}, offset {:?}",
            self.id,
            data.pointer,
            data.position,
            offset
        );
    }

    /// Starts a touch drag, but only on an already selected region and
    /// only for the first finger on the screen.
    pub fn on_touch_start(&mut self, data: &PointerData) {
        if !self.is_selected() || data.is_not_first_touch() {
            return;
        }
        self.announce_selected_touch();
        self.on_pointer_down(data);
    }

    /// Touch path selection request.
    pub fn on_tap(&self) {
        self.announce_selected_touch();
    }

    pub fn on_pointer_up(&mut self) {
        self.end_drag();
    }

    pub fn on_pointer_up_outside(&mut self) {
        self.end_drag();
    }

    pub fn on_touch_end(&mut self) {
        self.end_drag();
    }

    pub fn on_touch_end_outside(&mut self) {
        self.end_drag();
    }

    /// Follows the dragging pointer, keeping the grab point under it.
    /// Moves of any other pointer are ignored.
    pub fn on_pointer_move(&mut self, data: &PointerData) {
        if let Some(offset) = self.state.drag_offset_for(data.pointer) {
            self.sprite.set_position(data.position + offset);
        }
    }

    /// Like [`Region::on_pointer_move`], ignored while disabled.
    pub fn on_touch_move(&mut self, data: &PointerData) {
        if !self.enabled {
            return;
        }
        self.on_pointer_move(data);
    }

    //--- Listener Dispatch ------------------------------------------------

    /// Listeners bound to `kind`, in the order they run.
    pub fn listeners(kind: InteractionKind) -> &'static [Listener] {
        use InteractionKind::*;
        match kind {
            PointerDown => &[Listener::AnnounceSelected, Listener::DragStart],
            Tap => &[Listener::AnnounceSelectedTouch],
            TouchStart => &[Listener::DragStartTouch],
            PointerUp | PointerUpOutside | TouchEnd | TouchEndOutside => &[Listener::DragEnd],
            PointerMove | TouchMove => &[Listener::DragMoveTouch],
        }
    }

    /// Runs one listener with the event's pointer data.
    pub fn run_listener(&mut self, listener: Listener, data: &PointerData) {
        match listener {
            Listener::AnnounceSelected => self.announce_selected(),
            Listener::AnnounceSelectedTouch => self.on_tap(),
            Listener::DragStart => self.on_pointer_down(data),
            Listener::DragStartTouch => self.on_touch_start(data),
            Listener::DragEnd => self.end_drag(),
            Listener::DragMoveTouch => self.on_touch_move(data),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn end_drag(&mut self) {
        if self.state.is_dragging() {
            debug!(target: "region", "{:?} drag end at {:?}", self.id, self.sprite.position());
        }
        self.set_state(self.state.end_drag());
    }

    /// Applies a transition and keeps the sprite alpha in step with it.
    fn set_state(&mut self, state: RegionState) {
        self.state = state;
        let alpha = if state.is_selected() { SELECTED_ALPHA } else { IDLE_ALPHA };
        self.sprite.set_alpha(alpha);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
