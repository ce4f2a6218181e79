//! Rectangle and viewport band geometry.
//!
//! The viewport watcher classifies an element against two rectangles: a
//! *trigger band* (the viewport expanded by a margin above and below, used
//! to fire forward animations slightly before exact entry) and the *raw
//! viewport* (used to decide when an element has left completely and the
//! animation may re-arm). This module provides both, plus the full-above /
//! full-below predicates the re-arm rule is built on.

/// An axis-aligned rectangle in viewport coordinates.
///
/// `y` grows downward, matching layout coordinates: `top()` is the smaller
/// y value and `bottom()` the larger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (non-negative).
    pub width: f32,
    /// Height (non-negative).
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Top edge (smallest y).
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge (largest y).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Expand vertically by a band margin, producing a trigger band.
    ///
    /// The top edge moves up by `margin.top` and the bottom edge down by
    /// `margin.bottom`. Negative margins shrink the band inside the
    /// viewport, which makes triggers fire only once an element is some
    /// way into view. Horizontal extent is unchanged.
    pub fn expanded(&self, margin: BandMargin) -> Rect {
        Rect {
            x: self.x,
            y: self.y - margin.top,
            width: self.width,
            height: (self.height + margin.top + margin.bottom).max(0.0),
        }
    }

    /// Whether two rectangles overlap vertically.
    ///
    /// Band classification in this toolkit is vertical-only: horizontal
    /// overflow (carousels, marquees) must not re-arm scroll animations.
    pub fn intersects_vertically(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Vertical overlap with another rectangle, in pixels (0.0 if
    /// disjoint).
    pub fn vertical_overlap(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    /// Whether this rectangle lies entirely above `viewport` (bottom edge
    /// above the viewport's top edge).
    pub fn fully_above(&self, viewport: &Rect) -> bool {
        self.bottom() <= viewport.top()
    }

    /// Whether this rectangle lies entirely below `viewport` (top edge
    /// below the viewport's bottom edge).
    pub fn fully_below(&self, viewport: &Rect) -> bool {
        self.top() >= viewport.bottom()
    }

    /// Whether this rectangle is completely outside `viewport` on the top
    /// or bottom edge. This is the re-arm predicate: being outside a wider
    /// trigger band but still partially inside the raw viewport must not
    /// count.
    pub fn fully_outside_vertically(&self, viewport: &Rect) -> bool {
        self.fully_above(viewport) || self.fully_below(viewport)
    }
}

/// Vertical expansion applied to a viewport to form a trigger band.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandMargin {
    /// Extra space above the viewport top.
    pub top: f32,
    /// Extra space below the viewport bottom.
    pub bottom: f32,
}

impl BandMargin {
    /// A symmetric margin: the same extra space above and below.
    pub fn symmetric(margin: f32) -> Self {
        Self {
            top: margin,
            bottom: margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
    }

    #[test]
    fn test_negative_dimensions_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, -5.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn test_expanded_band() {
        let band = viewport().expanded(BandMargin::symmetric(200.0));
        assert_eq!(band.top(), -200.0);
        assert_eq!(band.bottom(), 1000.0);
        assert_eq!(band.width, 1280.0);
    }

    #[test]
    fn test_band_intersection_before_viewport_entry() {
        // Element just below the viewport: inside a 200px band, outside the
        // raw viewport.
        let el = Rect::new(0.0, 850.0, 600.0, 100.0);
        let band = viewport().expanded(BandMargin::symmetric(200.0));

        assert!(el.intersects_vertically(&band));
        assert!(!el.intersects_vertically(&viewport()));
    }

    #[test]
    fn test_fully_above_and_below() {
        let above = Rect::new(0.0, -300.0, 600.0, 100.0);
        let below = Rect::new(0.0, 900.0, 600.0, 100.0);
        let partial = Rect::new(0.0, 750.0, 600.0, 100.0);

        assert!(above.fully_above(&viewport()));
        assert!(above.fully_outside_vertically(&viewport()));

        assert!(below.fully_below(&viewport()));
        assert!(below.fully_outside_vertically(&viewport()));

        // Partially visible: must not count as fully outside.
        assert!(!partial.fully_outside_vertically(&viewport()));
    }

    #[test]
    fn test_negative_margin_shrinks_band() {
        let band = viewport().expanded(BandMargin {
            top: 0.0,
            bottom: -100.0,
        });
        assert_eq!(band.bottom(), 700.0);

        // Element peeking 40px into the viewport bottom: visible, but not
        // yet inside the shrunk band.
        let el = Rect::new(0.0, 760.0, 600.0, 200.0);
        assert!(el.intersects_vertically(&viewport()));
        assert!(!el.intersects_vertically(&band));
    }

    #[test]
    fn test_vertical_overlap() {
        let el = Rect::new(0.0, 700.0, 600.0, 200.0);
        assert_eq!(el.vertical_overlap(&viewport()), 100.0);

        let disjoint = Rect::new(0.0, 900.0, 600.0, 50.0);
        assert_eq!(disjoint.vertical_overlap(&viewport()), 0.0);
    }

    #[test]
    fn test_outside_band_but_inside_viewport_is_not_fully_outside() {
        // The asymmetry the re-arm rule depends on: an element can leave a
        // widened band region while still overlapping the raw viewport.
        let el = Rect::new(0.0, 780.0, 600.0, 40.0);
        assert!(el.intersects_vertically(&viewport()));
        assert!(!el.fully_outside_vertically(&viewport()));
    }
}
