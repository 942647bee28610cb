//! `Mesh` struct: an unstructured soup of triangles as read from a mesh file.

use crate::aabb::Aabb;
use crate::float_types::Real;
use nalgebra::Point3;
use std::{fmt::Debug, sync::OnceLock};

pub mod triangle;
pub mod triangulated;
pub mod vertex;

pub use triangle::Triangle;
pub use vertex::Vertex;

#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// Facets in file order
    pub triangles: Vec<Triangle>,

    /// Lazily calculated AABB that spans `triangles`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            triangles: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing facet list
    pub fn from_triangles(triangles: Vec<Triangle>, metadata: Option<S>) -> Self {
        Mesh {
            triangles,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate every corner position, three per facet.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<Real>> {
        self.triangles.iter().flat_map(|t| t.positions.iter())
    }

    /// Returns an [`Aabb`] indicating the 3D bounds of all `triangles`.
    /// An empty mesh yields a trivial box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            Aabb::from_points(self.positions())
                .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
        })
    }

    /// Number of facets too small to define a plane.
    pub fn degenerate_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_degenerate()).count()
    }
}
