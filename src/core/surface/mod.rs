//=========================================================================
// Interaction Surface
//=========================================================================
//
// Owns the background and the regions; keeps at most one region
// selected; tells single taps from multi-touch gestures; produces the
// display list for every frame.
//
// Architecture:
// ```text
//   RawPointerEvent
//         ↓ handle_pointer()
//   InteractionManager ──→ [InteractionEvent] (region first, then stage)
//         ↓ dispatch()
//   Region listeners ──notify()──→ NoticeInbox ──pump_notices()──┐
//   Stage listeners                                              │
//         ↓                                                      ↓
//   selection / touch counters  ←──────────────── apply_notice()
// ```
//
// Notices are pumped after every region listener so a selection request
// lands before the next listener (e.g. drag start) runs.
//
//=========================================================================

//=== Module Declarations =================================================

mod touch_counter;

//=== Public API ==========================================================

pub use touch_counter::TouchCounter;

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::Config;
use crate::core::geometry::{Point, Size};
use crate::core::input::{
    InteractionEvent, InteractionKind, InteractionManager, InteractiveScene, RawPointerEvent,
    Target,
};
use crate::core::region::{notice_channel, NoticeInbox, Region, RegionId, RegionNotice};
use crate::core::scene::{DisplayList, Sprite};

//=== InteractionSurface ==================================================

#[derive(Debug)]
pub struct InteractionSurface {
    viewport: Size,
    background: Sprite,
    regions: Vec<Region>,
    selected: Option<RegionId>,
    touches: TouchCounter,
    inbox: NoticeInbox,
    input: InteractionManager,
}

impl InteractionSurface {
    //--- Construction -----------------------------------------------------

    /// Builds the background and one region per configured layer.
    ///
    /// `viewport` is sampled once; later window resizes do not change the
    /// background.
    pub fn new(config: &Config, viewport: Size) -> Self {
        let (notifier, inbox) = notice_channel();

        let background = Sprite::new(Point::ORIGIN, viewport, config.window.background);

        let regions: Vec<Region> = config
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| Region::new(RegionId(index), *layer, notifier.clone()))
            .collect();

        info!(
            target: "surface",
            "Surface created: {}x{} viewport, {} regions",
            viewport.width,
            viewport.height,
            regions.len()
        );

        Self {
            viewport,
            background,
            regions,
            selected: None,
            touches: TouchCounter::new(),
            inbox,
            input: InteractionManager::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn background(&self) -> &Sprite {
        &self.background
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    /// The region last recorded as selected.
    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn touches(&self) -> TouchCounter {
        self.touches
    }

    //--- Input ------------------------------------------------------------

    /// Hit-tests a raw pointer event and runs every resulting listener.
    pub fn handle_pointer(&mut self, event: &RawPointerEvent) {
        let view = StageView {
            background: &self.background,
            regions: &self.regions,
        };
        let events = self.input.process(&view, event);

        for event in &events {
            self.dispatch(event);
        }
    }

    /// Runs the listeners bound on `event.current` for `event.kind`.
    pub fn dispatch(&mut self, event: &InteractionEvent) {
        match event.current {
            Target::Region(id) => {
                for &listener in Region::listeners(event.kind) {
                    match self.regions.get_mut(id.0) {
                        Some(region) => region.run_listener(listener, &event.data),
                        None => return,
                    }
                    self.pump_notices();
                }
            }
            Target::Stage => match event.kind {
                InteractionKind::PointerDown => self.on_background_pointer_down(event.target),
                InteractionKind::TouchStart => self.on_touch_start(),
                InteractionKind::Tap => self.on_tap(event.target),
                _ => {}
            },
        }
    }

    //--- Stage Listeners --------------------------------------------------

    /// Click outside: clears the selection when nothing but the stage was hit.
    pub fn on_background_pointer_down(&mut self, target: Target) {
        if target != Target::Stage {
            return;
        }
        trace!(target: "surface", "Background pressed");
        self.deselect_all();
    }

    /// Counts the finger; a second concurrent finger freezes drag-move.
    pub fn on_touch_start(&mut self) {
        self.touches.touch_started();
        if self.touches.is_first_touch() {
            return;
        }
        debug!(
            target: "surface",
            "Multi-touch ({} fingers), disabling drag-move",
            self.touches.current()
        );
        self.disable_all();
    }

    /// Finishes a stage tap: re-enables drag-move for a lone finger,
    /// treats a single-finger tap on the background as a click outside,
    /// then shifts the touch counters.
    pub fn on_tap(&mut self, target: Target) {
        if self.touches.is_first_touch() {
            self.enable_all();
        }
        if !self.touches.is_multitouch_gesture() {
            self.on_background_pointer_down(target);
        } else {
            trace!(target: "surface", "Tap is part of a multi-touch gesture, ignored");
        }
        self.touches.tap_finished();
    }

    //--- Notices ----------------------------------------------------------

    /// Applies every queued region notice.
    pub fn pump_notices(&mut self) {
        while let Some(notice) = self.inbox.try_next() {
            self.apply_notice(notice);
        }
    }

    pub fn apply_notice(&mut self, notice: RegionNotice) {
        match notice {
            RegionNotice::Selected(id) => self.on_region_selected(id),
            RegionNotice::SelectedTouch(id) => self.on_region_selected_touch(id),
        }
    }

    fn on_region_selected(&mut self, id: RegionId) {
        self.deselect_all();
        self.set_selected(id);
    }

    /// The first tap on another region only clears the current selection;
    /// tapping the selected region again changes nothing.
    fn on_region_selected_touch(&mut self, id: RegionId) {
        let last_active = self.selected;
        if last_active == Some(id) {
            return;
        }
        self.deselect_all();
        if last_active.is_none() {
            self.set_selected(id);
        }
    }

    //--- Selection --------------------------------------------------------

    pub fn deselect_all(&mut self) {
        for region in &mut self.regions {
            region.deselect();
        }
        self.selected = None;
    }

    /// Selects `id` unless another region is pinned selected by a drag.
    fn set_selected(&mut self, id: RegionId) {
        let pinned = self
            .regions
            .iter()
            .find(|region| region.id() != id && region.is_selected())
            .map(Region::id);

        if let Some(other) = pinned {
            debug!(
                target: "surface",
                "{:?} stays selected while dragging, {:?} not selected",
                other,
                id
            );
            self.selected = Some(other);
            return;
        }

        if let Some(region) = self.regions.get_mut(id.0) {
            region.select();
            self.selected = Some(id);
            debug!(target: "surface", "Selected {:?}", id);
        }
    }

    pub fn enable_all(&mut self) {
        for region in &mut self.regions {
            region.enable();
        }
    }

    pub fn disable_all(&mut self) {
        for region in &mut self.regions {
            region.disable();
        }
    }

    //--- Rendering --------------------------------------------------------

    /// The whole scene, background first, regions in layer order.
    pub fn display_list(&self) -> DisplayList {
        let mut list = DisplayList::with_capacity(self.regions.len() + 1);
        self.fill_display_list(&mut list);
        list
    }

    /// Refills `list` in place (reuses its allocation across frames).
    pub fn fill_display_list(&self, list: &mut DisplayList) {
        list.clear();
        list.push_sprite(&self.background);
        for region in &self.regions {
            list.push_sprite(region.sprite());
        }
    }
}

//=== StageView ===========================================================

/// Borrowed hit-testing view over the stage's nodes.
struct StageView<'a> {
    background: &'a Sprite,
    regions: &'a [Region],
}

impl InteractiveScene for StageView<'_> {
    fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn region_contains(&self, id: RegionId, point: Point) -> bool {
        self.regions
            .get(id.0)
            .is_some_and(|region| region.contains(point))
    }

    fn stage_contains(&self, point: Point) -> bool {
        self.background.contains(point)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
