//! Logical-unit geometry used by the layout and hit-testing code.
//!
//! All coordinates are `f32` values in the host's logical units (dp, points
//! or effective pixels, whatever the platform shell measures in). The origin
//! is the top-left corner of the slider widget, x grows to the right and y
//! grows downward.
//!
//! # Key Types
//!
//! - [`Size`] - a width/height pair, used for widget bounds, thumbs and labels
//! - [`Rect`] - an axis-aligned rectangle stored as its four edges

/// A width/height pair in logical units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// A zero-sized extent. Used for widgets that have not been laid out yet.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size from width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// use range_slider_core::geometry::Size;
    ///
    /// let size = Size::new(300.0, 48.0);
    /// assert_eq!(size.width, 300.0);
    /// assert_eq!(size.half_width(), 150.0);
    /// ```
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half of the width.
    pub fn half_width(self) -> f32 {
        self.width * 0.5
    }

    /// Half of the height.
    pub fn half_height(self) -> f32 {
        self.height * 0.5
    }

    /// Returns `true` when both dimensions are finite.
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// An axis-aligned rectangle stored as its edges.
///
/// Rectangles produced by the layout are never inverted: `left <= right` and
/// `top <= bottom` always hold, degenerate inputs produce zero-size
/// rectangles instead.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Creates a rectangle from its edges, swapping inverted pairs.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Creates a rectangle of `size` whose top-left corner sits at
    /// (`left`, `top`).
    pub fn from_origin(left: f32, top: f32, size: Size) -> Self {
        Self::from_edges(left, top, left + size.width, top + size.height)
    }

    /// Creates a rectangle of `size` centred on (`center_x`, `center_y`).
    ///
    /// # Examples
    ///
    /// ```
    /// use range_slider_core::geometry::{Rect, Size};
    ///
    /// let thumb = Rect::centered(50.0, 20.0, Size::new(16.0, 16.0));
    /// assert_eq!(thumb.left, 42.0);
    /// assert_eq!(thumb.bottom, 28.0);
    /// ```
    pub fn centered(center_x: f32, center_y: f32, size: Size) -> Self {
        Self::from_origin(
            center_x - size.half_width(),
            center_y - size.half_height(),
            size,
        )
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal centre.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    /// Vertical centre.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) * 0.5
    }

    /// The rectangle's extent.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns a copy moved horizontally by `dx`.
    pub fn offset_x(self, dx: f32) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            ..self
        }
    }

    /// Returns `true` if the point lies inside the rectangle, edges included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Returns `true` if the two rectangles share any horizontal span.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right && other.left < self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_inverted_edges() {
        let rect = Rect::from_edges(10.0, 8.0, 2.0, 4.0);
        assert_eq!(rect, Rect::from_edges(2.0, 4.0, 10.0, 8.0));
        assert_eq!(rect.width(), 8.0);
        assert_eq!(rect.height(), 4.0);
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(100.0, 50.0, Size::new(20.0, 10.0));
        assert_eq!(rect.left, 90.0);
        assert_eq!(rect.right, 110.0);
        assert_eq!(rect.top, 45.0);
        assert_eq!(rect.center_x(), 100.0);
        assert_eq!(rect.center_y(), 50.0);
        assert_eq!(rect.size(), Size::new(20.0, 10.0));
    }

    #[test]
    fn test_rect_offset_and_contains() {
        let rect = Rect::from_origin(0.0, 0.0, Size::new(10.0, 10.0)).offset_x(5.0);
        assert_eq!(rect.left, 5.0);
        assert!(rect.contains(15.0, 10.0));
        assert!(!rect.contains(4.9, 5.0));
    }

    #[test]
    fn test_horizontal_overlap() {
        let a = Rect::from_edges(0.0, 0.0, 10.0, 5.0);
        let b = Rect::from_edges(9.0, 20.0, 12.0, 25.0);
        let c = Rect::from_edges(10.0, 0.0, 12.0, 5.0);
        assert!(a.overlaps_horizontally(&b));
        assert!(!a.overlaps_horizontally(&c));
    }
}
