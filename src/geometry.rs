//! Fundamental geometric types for planform drawings.
//!
//! Planform coordinates follow the layout of a top-down wing drawing: `x` runs
//! spanwise (positive towards the right wing tip) and `y` runs longitudinally
//! (positive forward, towards the nose). Both are measured in metres from the
//! quarter-chord point of the root chord.

use nalgebra::Vector2;

/// Position in the planform plane measured in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Spanwise distance from the root chord.
    pub x: f64,
    /// Longitudinal distance from the root quarter-chord point, positive forward.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Reflect the point onto the opposite semispan.
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Axis-aligned rectangle enclosing a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    ///
    /// # Examples
    /// ```
    /// use planform::{point, Bounds};
    ///
    /// let bounds = Bounds::enclosing([point(-1.0, 2.0), point(3.0, -4.0)]).unwrap();
    /// assert_eq!(bounds.width(), 4.0);
    /// assert_eq!(bounds.height(), 6.0);
    /// ```
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => Bounds { min: p, max: p },
                Some(Bounds { min, max }) => Bounds {
                    min: Point::new(min.x.min(p.x), min.y.min(p.y)),
                    max: Point::new(max.x.max(p.x), max.y.max(p.y)),
                },
            })
        })
    }

    /// Extent along the spanwise axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along the longitudinal axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use planform::point;
///
/// let root = point(0.0, 0.0);
/// assert_eq!(root.mirrored(), root);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
