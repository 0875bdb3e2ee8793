//! Geometric primitives shared by the spatial components.
//!
//! Coordinates follow the extractor's page space: origin at the top-left corner,
//! y growing downward.

use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance with the vertical offset scaled by `y_weight`.
    ///
    /// ```
    /// use unexam::model::Point;
    ///
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 2.0);
    /// assert_eq!(a.weighted_distance(b, 2.0), 5.0);
    /// ```
    pub fn weighted_distance(&self, other: Point, y_weight: f32) -> f32 {
        let dx = self.x - other.x;
        let dy = (self.y - other.y) * y_weight;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle given by its corners `(x0, y0)` and `(x1, y1)`.
///
/// Serialized as the `[x0, y0, x1, y1]` array most extractors emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from two corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Left edge x-coordinate.
    pub fn x(&self) -> f32 {
        self.x0
    }

    /// Top edge y-coordinate.
    pub fn y(&self) -> f32 {
        self.y0
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Check whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Split the box vertically at `x`, returning the left and right halves.
    pub fn split_at_x(&self, x: f32) -> (BoundingBox, BoundingBox) {
        (
            BoundingBox::new(self.x0, self.y0, x, self.y1),
            BoundingBox::new(x, self.y0, self.x1, self.y1),
        )
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}
