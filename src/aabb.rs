//! Axis-aligned bounding boxes for meshes and compounds.

use crate::float_types::Real;
use nalgebra::Point3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let mut aabb = Aabb::new(first, first);
        for p in points {
            aabb.extend(p);
        }
        Some(aabb)
    }

    /// Grow the box so it contains `p`.
    #[inline]
    pub fn extend(&mut self, p: &Point3<Real>) {
        self.mins = self.mins.inf(p);
        self.maxs = self.maxs.sup(p);
    }

    /// Smallest box containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Self) -> Self {
        Aabb::new(self.mins.inf(&other.mins), self.maxs.sup(&other.maxs))
    }
}
