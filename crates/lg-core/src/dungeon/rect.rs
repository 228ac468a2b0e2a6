//! Axis-aligned rectangles used as room sections

use serde::{Deserialize, Serialize};

use super::cell::Coord;

/// A rectangle of cells, `x..x + width` by `y..y + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rightmost column (inclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Bottom row (inclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    /// Check if the rectangle is valid (has positive area)
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x <= self.right() && c.y >= self.y && c.y <= self.bottom()
    }

    /// Check if this rectangle intersects another
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Calculate the intersection of two rectangles
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.is_valid() || !other.is_valid() || !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect::new(
            x,
            y,
            self.right().min(other.right()) - x + 1,
            self.bottom().min(other.bottom()) - y + 1,
        ))
    }

    /// Thickness of the overlap with another rectangle: the narrower side of
    /// their intersection, or 0 if they do not intersect
    pub fn overlap_width(&self, other: &Rect) -> i32 {
        self.intersection(other)
            .map_or(0, |i| i.width.min(i.height))
    }

    /// Every cell of the rectangle in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Rect {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |cy| (x..x + width).map(move |cx| Coord::new(cx, cy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(10, 20, 6, 6);
        assert_eq!(r.right(), 15);
        assert_eq!(r.bottom(), 25);
        assert!(r.is_valid());
        assert!(!Rect::new(0, 0, 0, 5).is_valid());
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(3, 3, 3, 3);
        assert!(r.contains(Coord::new(3, 3)));
        assert!(r.contains(Coord::new(5, 5)));
        assert!(!r.contains(Coord::new(6, 5)));
        assert!(!r.contains(Coord::new(2, 4)));
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(0, 0, 11, 11);
        let r2 = Rect::new(5, 5, 11, 11);
        let r3 = Rect::new(20, 20, 11, 11);
        let touching = Rect::new(11, 0, 3, 3);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        assert!(!r1.intersects(&r3));
        assert!(!r1.intersects(&touching));
    }

    #[test]
    fn test_rect_intersection() {
        let r1 = Rect::new(0, 0, 11, 11);
        let r2 = Rect::new(5, 5, 11, 11);

        let intersection = r1.intersection(&r2).unwrap();
        assert_eq!(intersection, Rect::new(5, 5, 6, 6));
        assert_eq!(r1.intersection(&Rect::new(20, 20, 3, 3)), None);
    }

    #[test]
    fn test_overlap_width() {
        let base = Rect::new(3, 3, 9, 9);
        // A sliver along the right edge
        assert_eq!(base.overlap_width(&Rect::new(11, 3, 5, 9)), 1);
        // A 3-wide band
        assert_eq!(base.overlap_width(&Rect::new(9, 5, 7, 5)), 3);
        assert_eq!(base.overlap_width(&Rect::new(30, 30, 3, 3)), 0);
    }

    #[test]
    fn test_cells_row_major() {
        let cells: Vec<_> = Rect::new(1, 2, 2, 2).cells().collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(1, 2),
                Coord::new(2, 2),
                Coord::new(1, 3),
                Coord::new(2, 3),
            ]
        );
        assert_eq!(Rect::new(3, 3, 3, 3).cells().count(), 9);
    }
}
