//! Struct and functions for working with `Vertex`s from which `Triangle`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A triangle corner, holding position and normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `position` – the position in model space  
    /// * `normal`   – (optionally non‑unit) normal; it is **copied verbatim**.
    ///   STL stores one normal per facet, so all three corners of a facet
    ///   usually share it.
    pub const fn new(position: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex { position, normal }
    }
}
