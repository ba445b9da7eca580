//! Anchor-relative bubble placement.
//!
//! All coordinates are in overlay space: the coordinate system of the
//! container that hosts the bubbles. Screen positions reported by the host
//! are translated into this space once per show.

use serde::Deserialize;

/// A rectangle in overlay coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns this rect translated so that `origin` becomes (0, 0).
    ///
    /// Used to move a screen rect into overlay space.
    #[must_use]
    pub fn relative_to(&self, origin: &Self) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }
}

/// Which pointer of the bubble is visible.
///
/// The side names the direction the pointer points, so `Up` means the
/// bubble sits below its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSide {
    /// Bubble below the anchor, top pointer visible.
    Up,
    /// Bubble above the anchor, bottom pointer visible.
    Down,
}

/// Anchor placement captured once per show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorGeometry {
    /// Anchor bounds in overlay space.
    pub anchor: Rect,
    /// Visible clipping rectangle in overlay space.
    pub viewport: Rect,
}

impl AnchorGeometry {
    /// Derives anchor geometry from raw screen rects.
    ///
    /// `overlay` is the screen rect of the container hosting the bubbles;
    /// both the anchor and the viewport are translated into its space.
    #[must_use]
    pub fn from_screen(anchor: Rect, overlay: Rect, viewport: Rect) -> Self {
        Self {
            anchor: anchor.relative_to(&overlay),
            viewport: viewport.relative_to(&overlay),
        }
    }

    /// Returns the anchor's horizontal center.
    #[must_use]
    pub fn anchor_center_x(&self) -> f32 {
        self.anchor.x + self.anchor.width / 2.0
    }

    /// Top-left position at which a bubble of the given size is centered
    /// on the anchor. Origin of the `FromAnchor` transitions.
    #[must_use]
    pub fn centered_origin(&self, bubble_width: f32, bubble_height: f32) -> (f32, f32) {
        (
            self.anchor.x + self.anchor.width / 2.0 - bubble_width / 2.0,
            self.anchor.y + self.anchor.height / 2.0 - bubble_height / 2.0,
        )
    }
}

/// Resolved placement of a bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleGeometry {
    /// Left edge in overlay space.
    pub x: f32,
    /// Top edge in overlay space.
    pub y: f32,
    /// Bubble width, pinned to the measured width.
    pub width: f32,
    /// Bubble height.
    pub height: f32,
    /// Visible pointer.
    pub pointer_side: PointerSide,
    /// Pointer center in overlay space (the anchor's center X).
    pub pointer_center_x: f32,
    /// Pointer left edge relative to the bubble's left edge.
    pub pointer_offset_x: f32,
}

impl BubbleGeometry {
    /// Returns the bubble bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Converts an overlay-space pointer center into a bubble-local offset.
#[must_use]
pub fn pointer_offset_x(pointer_center_x: f32, pointer_width: f32, bubble_x: f32) -> f32 {
    pointer_center_x - pointer_width / 2.0 - bubble_x
}

/// Resolves the bubble placement for an anchor.
///
/// Horizontal: centered on the anchor, clamped left to 0, then right to
/// the viewport's right edge, so a bubble wider than the viewport ends up
/// pinned to the right edge.
///
/// Vertical: above the anchor unless that would put the top edge above
/// overlay y = 0, in which case below. The chosen side is not re-checked.
#[must_use]
pub fn resolve(
    anchor: &AnchorGeometry,
    bubble_width: f32,
    bubble_height: f32,
    pointer_width: f32,
) -> BubbleGeometry {
    let center_x = anchor.anchor_center_x();

    let mut x = (center_x - bubble_width / 2.0).max(0.0);
    if x + bubble_width > anchor.viewport.right() {
        x = anchor.viewport.right() - bubble_width;
    }

    let y_above = anchor.anchor.y - bubble_height;
    let (y, pointer_side) = if y_above < 0.0 {
        (anchor.anchor.bottom(), PointerSide::Up)
    } else {
        (y_above, PointerSide::Down)
    };

    BubbleGeometry {
        x,
        y,
        width: bubble_width,
        height: bubble_height,
        pointer_side,
        pointer_center_x: center_x,
        pointer_offset_x: pointer_offset_x(center_x, pointer_width, x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(x: f32, y: f32, w: f32, h: f32) -> AnchorGeometry {
        AnchorGeometry {
            anchor: Rect::new(x, y, w, h),
            viewport: Rect::new(0.0, 0.0, 400.0, 800.0),
        }
    }

    #[test]
    fn test_room_above_points_down() {
        let g = resolve(&anchor(100.0, 200.0, 50.0, 30.0), 120.0, 60.0, 0.0);

        // center 125, half width 60
        assert_eq!(g.x, 65.0);
        assert_eq!(g.y, 140.0);
        assert_eq!(g.pointer_side, PointerSide::Down);
    }

    #[test]
    fn test_no_room_above_points_up() {
        let g = resolve(&anchor(10.0, 5.0, 50.0, 30.0), 120.0, 60.0, 0.0);

        assert_eq!(g.pointer_side, PointerSide::Up);
        assert_eq!(g.y, 35.0);
        // left clamp
        assert_eq!(g.x, 0.0);
    }

    #[test]
    fn test_right_edge_clamp() {
        // center 450 -> unclamped x 390
        let g = resolve(&anchor(440.0, 300.0, 20.0, 20.0), 120.0, 60.0, 0.0);
        assert_eq!(g.x, 280.0);
    }

    #[test]
    fn test_wider_than_viewport_pins_right() {
        let g = resolve(&anchor(10.0, 300.0, 20.0, 20.0), 500.0, 60.0, 0.0);
        assert_eq!(g.x, -100.0);
        assert_eq!(g.x + g.width, 400.0);
    }

    #[test]
    fn test_x_stays_in_bounds() {
        for step in 0..=40 {
            let ax = step as f32 * 10.0;
            for width in [1.0, 60.0, 120.0, 399.0, 400.0] {
                let g = resolve(&anchor(ax, 300.0, 30.0, 10.0), width, 20.0, 0.0);
                assert!(g.x >= 0.0, "x {} for anchor {ax} width {width}", g.x);
                assert!(g.x <= 400.0 - width, "x {} for anchor {ax} width {width}", g.x);
            }
        }
    }

    #[test]
    fn test_exactly_enough_room_above() {
        let g = resolve(&anchor(100.0, 60.0, 50.0, 30.0), 120.0, 60.0, 0.0);
        assert_eq!(g.pointer_side, PointerSide::Down);
        assert_eq!(g.y, 0.0);
    }

    #[test]
    fn test_degenerate_anchor() {
        let g = resolve(&anchor(200.0, 300.0, 0.0, 0.0), 100.0, 40.0, 0.0);
        assert_eq!(g.x, 150.0);
        assert_eq!(g.y, 260.0);
        assert_eq!(g.pointer_center_x, 200.0);
    }

    #[test]
    fn test_pointer_offset_follows_anchor_after_clamp() {
        let g = resolve(&anchor(440.0, 300.0, 20.0, 20.0), 120.0, 60.0, 16.0);
        // 450 - 8 - 280
        assert_eq!(g.pointer_offset_x, 162.0);
    }

    #[test]
    fn test_from_screen_translation() {
        let geometry = AnchorGeometry::from_screen(
            Rect::new(150.0, 260.0, 50.0, 30.0),
            Rect::new(50.0, 60.0, 400.0, 800.0),
            Rect::new(0.0, 24.0, 480.0, 900.0),
        );
        assert_eq!(geometry.anchor, Rect::new(100.0, 200.0, 50.0, 30.0));
        assert_eq!(geometry.viewport.right(), 430.0);
    }
}
