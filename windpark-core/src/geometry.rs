//! Planar geometry primitives used by placement and cable checks.
//!
//! Coordinates are metres on a flat local grid; the park footprint is small
//! enough that no projection is involved.

/// A point in the park plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a position from raw coordinates.
    ///
    /// # Examples
    /// ```
    /// use windpark_core::Position;
    ///
    /// let origin = Position::new(0.0, 0.0);
    /// assert_eq!(origin.distance(Position::new(3.0, 4.0)), 5.0);
    /// ```
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> f64 { self.x }

    /// Returns the y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> f64 { self.y }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` when both coordinates are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle spanned by a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Returns `true` when the x and y intervals of both boxes overlap.
    ///
    /// Touching edges count as overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Lower-left and upper-right corners.
    #[must_use]
    pub const fn corners(&self) -> (Position, Position) {
        (
            Position::new(self.min_x, self.min_y),
            Position::new(self.max_x, self.max_y),
        )
    }
}

/// A straight cable run between two positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Position,
    end: Position,
}

impl Segment {
    /// Creates a segment from its endpoints.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// First endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn start(&self) -> Position { self.start }

    /// Second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn end(&self) -> Position { self.end }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// The segment's axis-aligned bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.start.x.min(self.end.x),
            max_x: self.start.x.max(self.end.x),
            min_y: self.start.y.min(self.end.y),
            max_y: self.start.y.max(self.end.y),
        }
    }

    /// Returns `true` when the two segments cross at a point strictly inside
    /// both of them.
    ///
    /// Uses the parametric line-intersection form. Parallel and collinear
    /// segments (zero determinant) never cross, and neither do segments that
    /// merely touch at an endpoint.
    ///
    /// # Examples
    /// ```
    /// use windpark_core::{Position, Segment};
    ///
    /// let rising = Segment::new(Position::new(0.0, 0.0), Position::new(10.0, 10.0));
    /// let falling = Segment::new(Position::new(0.0, 10.0), Position::new(10.0, 0.0));
    /// assert!(rising.properly_intersects(&falling));
    /// ```
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "an exactly zero determinant is the documented parallel case"
    )]
    pub fn properly_intersects(&self, other: &Self) -> bool {
        let (a, b) = (self.start, self.end);
        let (c, d) = (other.start, other.end);

        let determinant = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
        if determinant == 0.0 {
            return false;
        }

        let along_self = ((a.x - c.x) * (c.y - d.y) - (a.y - c.y) * (c.x - d.x)) / determinant;
        let along_other = -((a.x - b.x) * (a.y - c.y) - (a.y - b.y) * (a.x - c.x)) / determinant;

        is_interior(along_self) && is_interior(along_other)
    }
}

fn is_interior(parameter: f64) -> bool {
    parameter > 0.0 && parameter < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn segment(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Position::new(ax, ay), Position::new(bx, by))
    }

    #[rstest]
    #[case::diagonals(segment(0.0, 0.0, 10.0, 10.0), segment(0.0, 10.0, 10.0, 0.0), true)]
    #[case::plus_sign(segment(-1.0, 0.0, 1.0, 0.0), segment(0.0, -1.0, 0.0, 1.0), true)]
    #[case::disjoint_collinear(segment(0.0, 0.0, 1.0, 1.0), segment(5.0, 5.0, 6.0, 6.0), false)]
    #[case::overlapping_collinear(segment(0.0, 0.0, 4.0, 4.0), segment(2.0, 2.0, 6.0, 6.0), false)]
    #[case::parallel(segment(0.0, 0.0, 4.0, 0.0), segment(0.0, 1.0, 4.0, 1.0), false)]
    #[case::shared_endpoint(segment(0.0, 0.0, 4.0, 0.0), segment(4.0, 0.0, 4.0, 4.0), false)]
    #[case::t_junction(segment(0.0, 0.0, 4.0, 0.0), segment(2.0, 0.0, 2.0, 3.0), false)]
    #[case::lines_meet_outside(segment(0.0, 0.0, 1.0, 1.0), segment(3.0, 0.0, 4.0, -1.0), false)]
    fn detects_proper_crossings(#[case] left: Segment, #[case] right: Segment, #[case] expected: bool) {
        assert_eq!(left.properly_intersects(&right), expected);
        assert_eq!(right.properly_intersects(&left), expected);
    }

    #[rstest]
    #[case::apart(segment(0.0, 0.0, 1.0, 1.0), segment(5.0, 5.0, 6.0, 6.0), false)]
    #[case::nested(segment(0.0, 0.0, 10.0, 10.0), segment(2.0, 3.0, 4.0, 5.0), true)]
    #[case::touching(segment(0.0, 0.0, 2.0, 2.0), segment(2.0, 0.0, 3.0, 1.0), true)]
    #[case::x_overlap_only(segment(0.0, 0.0, 4.0, 1.0), segment(1.0, 5.0, 3.0, 6.0), false)]
    fn bounding_boxes_overlap_on_both_axes(
        #[case] left: Segment,
        #[case] right: Segment,
        #[case] expected: bool,
    ) {
        assert_eq!(left.bounding_box().overlaps(&right.bounding_box()), expected);
    }

    #[test]
    fn bounding_box_orders_corners() {
        let (low, high) = segment(5.0, 1.0, 2.0, 7.0).bounding_box().corners();
        assert_eq!(low, Position::new(2.0, 1.0));
        assert_eq!(high, Position::new(5.0, 7.0));
    }
}
