//! Core geometry types: Point, Rect.
//!
//! Coordinates are CSS pixels in viewport space, matching what a host page
//! reports for pointer positions and element bounding boxes.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in viewport pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned box, the shape of an element's bounding client rect.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rect.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as `y`).
    #[inline]
    pub const fn top(self) -> f32 {
        self.y
    }

    /// Bottom edge, exclusive.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Left edge (same as `x`).
    #[inline]
    pub const fn left(self) -> f32 {
        self.x
    }

    /// Right edge, exclusive.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Whether the rect has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `point` lies inside the rect (right/bottom edges exclusive).
    #[inline]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shift the rect by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..self }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
