//! A single facet of a triangulated surface.

use crate::float_types::{Real, tolerance};
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// One facet: three corner positions plus the facet normal as stored in the
/// source file. The stored normal may be zero (many STL writers leave it blank);
/// use [`Triangle::face_normal`] when a reliable direction is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Point3<Real>; 3],
    pub normal: Vector3<Real>,
}

impl Triangle {
    pub const fn new(positions: [Point3<Real>; 3], normal: Vector3<Real>) -> Self {
        Triangle { positions, normal }
    }

    /// Build a facet and derive its normal from the winding (counter-clockwise = outward).
    pub fn from_positions(positions: [Point3<Real>; 3]) -> Self {
        let mut tri = Triangle::new(positions, Vector3::zeros());
        tri.normal = tri.face_normal().unwrap_or_else(Vector3::zeros);
        tri
    }

    /// Non-normalized normal `(b - a) × (c - a)`; its length is twice the area.
    #[inline]
    pub fn cross(&self) -> Vector3<Real> {
        let [a, b, c] = self.positions;
        (b - a).cross(&(c - a))
    }

    /// A facet whose corners are (near) collinear has no usable plane.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.cross().norm() <= tolerance()
    }

    /// Unit normal computed from the winding, or `None` for a degenerate facet.
    pub fn face_normal(&self) -> Option<Vector3<Real>> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.cross().normalize())
        }
    }

    /// The corners as [`Vertex`]s carrying the facet normal.
    #[inline]
    pub fn vertices(&self) -> [Vertex; 3] {
        self.positions.map(|p| Vertex::new(p, self.normal))
    }
}
