use crate::{
    Axis, Direction, Point,
    error::{Error, Result},
};

/// An axis-aligned rectangle in the shared layout coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left coordinate.
    pub x: f64,
    /// Top coordinate.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Construct a rectangle, rejecting negative sizes and non-finite values.
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        let r = Self::new(x, y, width, height);
        r.validate()?;
        Ok(r)
    }

    /// Check that all components are finite and the size is non-negative.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width < 0.0 || self.height < 0.0 {
            return Err(Error::InvalidRect(format!(
                "x: {}, y: {}, w: {}, h: {}",
                self.x, self.y, self.width, self.height
            )));
        }
        Ok(())
    }

    /// A zero-sized rect at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect have a zero area?
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corner points: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Edge midpoints: top, bottom, left, right.
    pub fn edges(&self) -> [Point; 4] {
        let c = self.center();
        [
            Point::new(c.x, self.top()),
            Point::new(c.x, self.bottom()),
            Point::new(self.left(), c.y),
            Point::new(self.right(), c.y),
        ]
    }

    /// The `(start, end)` range this rect covers on an axis.
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.left(), self.right()),
            Axis::Vertical => (self.top(), self.bottom()),
        }
    }

    /// Center coordinate on an axis.
    pub fn center_on(&self, axis: Axis) -> f64 {
        let c = self.center();
        match axis {
            Axis::Horizontal => c.x,
            Axis::Vertical => c.y,
        }
    }

    /// The edge facing `dir`: moving right, that is the right edge.
    pub fn leading_edge(&self, dir: Direction) -> f64 {
        let (start, end) = self.span(dir.axis());
        if dir.is_incremental() { end } else { start }
    }

    /// The edge facing away from `dir`: moving right, that is the left edge.
    pub fn trailing_edge(&self, dir: Direction) -> f64 {
        self.leading_edge(dir.opposite())
    }

    /// Distance between the ranges two rects cover on an axis. Overlapping or
    /// touching ranges have a gap of zero.
    pub fn gap(&self, other: &Self, axis: Axis) -> f64 {
        let (a0, a1) = self.span(axis);
        let (b0, b1) = other.span(axis);
        (b0 - a1).max(a0 - b1).max(0.0)
    }

    /// Smallest distance on an axis between a corner of this rect and a
    /// corner of `other`. Unlike [`Rect::gap`], overlapping ranges still
    /// differ unless a pair of corners lines up.
    pub fn corner_offset(&self, other: &Self, axis: Axis) -> f64 {
        let (a0, a1) = self.span(axis);
        let (b0, b1) = other.span(axis);
        [a0, a1]
            .into_iter()
            .flat_map(|a| [b0, b1].into_iter().map(move |b| (a - b).abs()))
            .fold(f64::INFINITY, f64::min)
    }

    /// Does `other` lie entirely within this rect?
    pub fn contains(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Does the point fall within this rect? The right and bottom edges are
    /// exclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    fn from(v: (f64, f64, f64, f64)) -> Self {
        Self::new(v.0, v.1, v.2, v.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_points() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
        assert_eq!(r.corners()[3], Point::new(110.0, 70.0));
        assert_eq!(r.edges()[2], Point::new(10.0, 45.0));
        assert_eq!(r.edges()[0], Point::new(60.0, 20.0));
    }

    #[test]
    fn validate() {
        assert!(Rect::try_new(0.0, 0.0, 10.0, 10.0).is_ok());
        assert!(Rect::try_new(0.0, 0.0, -1.0, 10.0).is_err());
        assert!(Rect::try_new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Rect::zero().is_empty());
    }

    #[test]
    fn leading_and_trailing_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.leading_edge(Direction::Right), 110.0);
        assert_eq!(r.leading_edge(Direction::Left), 10.0);
        assert_eq!(r.leading_edge(Direction::Up), 20.0);
        assert_eq!(r.leading_edge(Direction::Down), 70.0);
        assert_eq!(r.trailing_edge(Direction::Right), 10.0);
        assert_eq!(r.trailing_edge(Direction::Up), 70.0);
    }

    #[test]
    fn gaps() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(150.0, 50.0, 100.0, 100.0);
        assert_eq!(a.gap(&b, Axis::Horizontal), 50.0);
        assert_eq!(b.gap(&a, Axis::Horizontal), 50.0);
        assert_eq!(a.gap(&b, Axis::Vertical), 0.0);
        let c = Rect::new(0.0, 300.0, 10.0, 10.0);
        assert_eq!(a.gap(&c, Axis::Vertical), 200.0);
    }

    #[test]
    fn corner_offsets() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let shifted = Rect::new(150.0, 90.0, 100.0, 100.0);
        assert_eq!(a.gap(&shifted, Axis::Vertical), 0.0);
        assert_eq!(a.corner_offset(&shifted, Axis::Vertical), 10.0);
        assert_eq!(a.corner_offset(&Rect::new(150.0, 0.0, 100.0, 100.0), Axis::Vertical), 0.0);
        let below = Rect::new(0.0, 300.0, 10.0, 10.0);
        assert_eq!(a.corner_offset(&below, Axis::Vertical), a.gap(&below, Axis::Vertical));
    }

    #[test]
    fn containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains(&Rect::new(90.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains_point(Point::new(0.0, 0.0)));
        assert!(!outer.contains_point(Point::new(100.0, 50.0)));
    }
}
