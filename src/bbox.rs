//! Axis-aligned bounding boxes and their quadrant partitioning.

use float_next_after::NextAfter;
use geo_traits::{CoordTrait, RectTrait};

use crate::error::{Result, TopoIndexError};
use crate::r#type::CoordNum;

/// One quarter of a [`BoundingBox`], split at the box midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// `x < mid_x, y < mid_y`
    LowerLeft,
    /// `x >= mid_x, y < mid_y`
    LowerRight,
    /// `x < mid_x, y >= mid_y`
    UpperLeft,
    /// `x >= mid_x, y >= mid_y`
    UpperRight,
}

impl Quadrant {
    /// All quadrants, in child-storage order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Quadrant::LowerLeft => 0,
            Quadrant::LowerRight => 1,
            Quadrant::UpperLeft => 2,
            Quadrant::UpperRight => 3,
        }
    }
}

/// An axis-aligned bounding rectangle.
///
/// Point containment is half-open: a point lies inside when
/// `min_x <= x < max_x && min_y <= y < max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox<N: CoordNum> {
    min_x: N,
    min_y: N,
    max_x: N,
    max_y: N,
}

impl<N: CoordNum> BoundingBox<N> {
    /// Create a box from its extents.
    ///
    /// Requires `min_x <= max_x` and `min_y <= max_y` (debug-asserted).
    pub fn new(min_x: N, min_y: N, max_x: N, max_y: N) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y, "inverted bounding box");
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build a box from any `geo-traits` rectangle.
    pub fn from_rect(rect: &impl RectTrait<T = N>) -> Self {
        Self::new(
            rect.min().x(),
            rect.min().y(),
            rect.max().x(),
            rect.max().y(),
        )
    }

    /// The minimum `x` value of this box.
    pub fn min_x(&self) -> N {
        self.min_x
    }

    /// The minimum `y` value of this box.
    pub fn min_y(&self) -> N {
        self.min_y
    }

    /// The maximum `x` value of this box.
    pub fn max_x(&self) -> N {
        self.max_x
    }

    /// The maximum `y` value of this box.
    pub fn max_y(&self) -> N {
        self.max_y
    }

    /// The midpoint of the box.
    pub fn center(&self) -> (N, N) {
        let two = N::one() + N::one();
        (
            (self.min_x + self.max_x) / two,
            (self.min_y + self.max_y) / two,
        )
    }

    /// Half-open containment: `min_x <= x < max_x && min_y <= y < max_y`.
    pub fn contains(&self, x: N, y: N) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// True when the boxes share any area or boundary.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.min_x > other.max_x
            || self.max_x < other.min_x
            || self.min_y > other.max_y
            || self.max_y < other.min_y)
    }

    /// The quadrant containing `(x, y)`.
    ///
    /// Ties on the midpoint go to the greater quadrant, consistent with
    /// half-open containment.
    pub fn quadrant_of(&self, x: N, y: N) -> Quadrant {
        let (mid_x, mid_y) = self.center();
        match (x < mid_x, y < mid_y) {
            (true, true) => Quadrant::LowerLeft,
            (false, true) => Quadrant::LowerRight,
            (true, false) => Quadrant::UpperLeft,
            (false, false) => Quadrant::UpperRight,
        }
    }

    /// The child box covering `quadrant`.
    ///
    /// The four child boxes exactly tile this box with no gap or overlap.
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let (mid_x, mid_y) = self.center();
        match quadrant {
            Quadrant::LowerLeft => Self::new(self.min_x, self.min_y, mid_x, mid_y),
            Quadrant::LowerRight => Self::new(mid_x, self.min_y, self.max_x, mid_y),
            Quadrant::UpperLeft => Self::new(self.min_x, mid_y, mid_x, self.max_y),
            Quadrant::UpperRight => Self::new(mid_x, mid_y, self.max_x, self.max_y),
        }
    }

    /// Componentwise min/max union of a set of boxes.
    ///
    /// Fails with [`TopoIndexError::EmptyUnion`] when `boxes` yields nothing.
    pub fn union<I>(boxes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = boxes.into_iter();
        let first = iter.next().ok_or(TopoIndexError::EmptyUnion)?;
        Ok(iter.fold(first, |acc, b| {
            Self::new(
                acc.min_x.min(b.min_x),
                acc.min_y.min(b.min_y),
                acc.max_x.max(b.max_x),
                acc.max_y.max(b.max_y),
            )
        }))
    }

    /// Widen the upper bounds by one ULP so every point inside the closed
    /// box, including points attaining the maxima, passes the half-open
    /// [`contains`](Self::contains) test. A degenerate (zero-extent) axis
    /// becomes a valid one.
    pub fn half_open_cover(&self) -> Self {
        Self::new(
            self.min_x,
            self.min_y,
            self.max_x.next_after(N::infinity()),
            self.max_y.next_after(N::infinity()),
        )
    }
}

impl BoundingBox<f64> {
    /// Narrow this box to `f32` precision, rounding outward so the result is
    /// never smaller than the `f64` box.
    pub fn to_f32(&self) -> BoundingBox<f32> {
        let mut min_x = self.min_x as f32;
        let mut min_y = self.min_y as f32;
        let mut max_x = self.max_x as f32;
        let mut max_y = self.max_y as f32;

        if (min_x as f64) > self.min_x {
            min_x = min_x.next_after(f32::NEG_INFINITY);
        }
        if (min_y as f64) > self.min_y {
            min_y = min_y.next_after(f32::NEG_INFINITY);
        }
        if (max_x as f64) < self.max_x {
            max_x = max_x.next_after(f32::INFINITY);
        }
        if (max_y as f64) < self.max_y {
            max_y = max_y.next_after(f32::INFINITY);
        }

        debug_assert!((min_x as f64) <= self.min_x);
        debug_assert!((min_y as f64) <= self.min_y);
        debug_assert!((max_x as f64) >= self.max_x);
        debug_assert!((max_y as f64) >= self.max_y);

        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}
