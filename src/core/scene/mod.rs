//=========================================================================
// Scene
//=========================================================================
//
// Minimal retained-mode scene: tinted rectangular sprites painted in
// insertion order.
//
// Architecture:
//   InteractionSurface
//     ├─ background: Sprite          (painted first)
//     └─ regions[i].sprite: Sprite   (painted in layer order)
//                  ↓ display_list()
//   DisplayList ──→ Renderer (every frame, no dirty tracking)
//
//=========================================================================

//=== Module Declarations =================================================

mod display_list;

//=== Public API ==========================================================

pub use display_list::{DisplayList, DrawQuad};

//=== Internal Dependencies ===============================================

use crate::core::config::Color;
use crate::core::geometry::{Point, Rect, Size};

//=== Sprite ==============================================================

/// A rectangular, solid-color scene node.
///
/// Anchored at its top-left corner. `alpha` multiplies the tint when the
/// sprite is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    position: Point,
    size: Size,
    tint: Color,
    alpha: f32,
}

impl Sprite {
    //--- Construction -----------------------------------------------------

    pub fn new(position: Point, size: Size, tint: Color) -> Self {
        Self {
            position,
            size,
            tint,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Hit test in the sprite's parent space.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
