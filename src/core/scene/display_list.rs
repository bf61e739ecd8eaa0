//=========================================================================
// Display List
//=========================================================================
//
// Flat, ordered list of quads produced once per frame from the scene.
// The renderer paints entries back to front in list order, so later
// entries appear on top.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Sprite;
use crate::core::geometry::Rect;

//=== DrawQuad ============================================================

/// A single solid quad: bounds plus straight (non-premultiplied) RGBA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawQuad {
    pub bounds: Rect,
    pub rgba: [f32; 4],
}

impl From<&Sprite> for DrawQuad {
    fn from(sprite: &Sprite) -> Self {
        let [r, g, b] = sprite.tint().to_rgb_f32();
        Self {
            bounds: sprite.bounds(),
            rgba: [r, g, b, sprite.alpha()],
        }
    }
}

//=== DisplayList =========================================================

/// Quads for one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    quads: Vec<DrawQuad>,
}

impl DisplayList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            quads: Vec::with_capacity(capacity),
        }
    }

    pub fn push_sprite(&mut self, sprite: &Sprite) {
        self.quads.push(DrawQuad::from(sprite));
    }

    pub fn quads(&self) -> &[DrawQuad] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Empties the list, keeping its allocation for the next frame.
    pub fn clear(&mut self) {
        self.quads.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Color;
    use crate::core::geometry::{Point, Size};

    #[test]
    fn quad_carries_tint_and_alpha() {
        let sprite = Sprite::new(Point::new(20.0, 20.0), Size::new(100.0, 100.0), Color(0x0000ff))
            .with_alpha(0.3);

        let quad = DrawQuad::from(&sprite);
        assert_eq!(quad.rgba, [0.0, 0.0, 1.0, 0.3]);
        assert_eq!(quad.bounds, sprite.bounds());
    }

    #[test]
    fn push_preserves_order_and_clear_keeps_capacity() {
        let mut list = DisplayList::with_capacity(4);
        let a = Sprite::new(Point::ORIGIN, Size::new(1.0, 1.0), Color(0x111111));
        let b = Sprite::new(Point::ORIGIN, Size::new(2.0, 2.0), Color(0x222222));

        list.push_sprite(&a);
        list.push_sprite(&b);
        assert_eq!(list.len(), 2);
        assert_eq!(list.quads()[0].bounds.size, Size::new(1.0, 1.0));
        assert_eq!(list.quads()[1].bounds.size, Size::new(2.0, 2.0));

        let capacity = list.quads.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.quads.capacity(), capacity);
    }
}
