use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in either virtual canvas space or screen space.
///
/// The type does not track which space it belongs to; callers convert
/// explicitly through the [`Viewport`](crate::viewport::Viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps both axes so neither goes negative.
    pub fn clamp_non_negative(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in virtual units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Builds a rectangle from two arbitrary corners; the result is normalized
    /// so `min <= max` on both axes regardless of argument order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::from_corners(
            origin,
            Point::new(origin.x + size.width, origin.y + size.height),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when the two rectangles overlap, touching edges included.
    /// Partial overlap counts; full containment is not required.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Smallest rectangle enclosing every input, or `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let r = Rect::from_corners(Point::new(10.0, 5.0), Point::new(2.0, 8.0));
        assert_eq!(r.min, Point::new(2.0, 5.0));
        assert_eq!(r.max, Point::new(10.0, 8.0));
    }

    #[test]
    fn partial_overlap_intersects() {
        let a = Rect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Rect::from_corners(Point::new(8.0, 8.0), Point::new(20.0, 20.0));
        let c = Rect::from_corners(Point::new(11.0, 0.0), Point::new(20.0, 5.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn bounding_of_nothing_is_none() {
        assert!(Rect::bounding(Vec::new()).is_none());
    }
}
