//! An ordered collection of independent bodies destined for one exchange file.
//!
//! A [`Compound`] is a container, not a solid: bodies are kept exactly as they
//! were added. Nothing is unioned, clipped or checked for overlap, so a body
//! that intersects another stays intersecting in the output.

use crate::aabb::Aabb;
use crate::mesh::Mesh;
use crate::triangulated::Triangulated3D;
use std::fmt::Debug;

/// One named member of a [`Compound`].
#[derive(Clone, Debug)]
pub struct Body<S: Clone + Send + Sync + Debug> {
    pub name: String,
    pub mesh: Mesh<S>,
}

#[derive(Clone, Debug)]
pub struct Compound<S: Clone + Send + Sync + Debug> {
    bodies: Vec<Body<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Compound<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Compound<S> {
    pub const fn new() -> Self {
        Compound { bodies: Vec::new() }
    }

    /// Append `mesh` as a new child body named `name`.
    pub fn add(&mut self, name: impl Into<String>, mesh: Mesh<S>) -> &mut Self {
        self.bodies.push(Body {
            name: name.into(),
            mesh,
        });
        self
    }

    /// Collect `(name, mesh)` pairs into a compound, preserving order.
    pub fn from_bodies<N, I>(bodies: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Mesh<S>)>,
    {
        let mut compound = Compound::new();
        for (name, mesh) in bodies {
            compound.add(name, mesh);
        }
        compound
    }

    pub fn bodies(&self) -> &[Body<S>] {
        &self.bodies
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bounds of every non-empty body together, or `None` if nothing has geometry.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.bodies
            .iter()
            .filter(|b| !b.mesh.is_empty())
            .map(|b| b.mesh.bounding_box())
            .reduce(|a, b| a.merged(&b))
    }
}

/// A compound triangulates as the concatenation of its bodies.
impl<S: Clone + Send + Sync + Debug> Triangulated3D for Compound<S> {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([crate::mesh::Vertex; 3]),
    {
        for body in &self.bodies {
            body.mesh.visit_triangles(&mut f);
        }
    }
}
