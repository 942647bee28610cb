//! Batch production of 3D-printable **nametags**.
//!
//! Two pipelines share this crate:
//!
//! 1. **Roster → STL** ([`generate`]): each well-formed row of a CSV roster is
//!    rendered by an external geometry compiler ([OpenSCAD]) into three meshes,
//!    `{id}_backing.stl`, `{id}_text.stl` and `{id}_logo.stl`. Entries whose
//!    three files already exist are skipped.
//! 2. **STL → STEP** ([`convert`]): the three meshes of one entry are read,
//!    gathered unmodified into a [`Compound`] and written as a single
//!    multi-body [STEP] file.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to process roster entries concurrently
//!
//! [OpenSCAD]: https://openscad.org
//! [STEP]: https://en.wikipedia.org/wiki/ISO_10303-21

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod artifacts;
pub mod batch;
pub mod compiler;
pub mod compound;
pub mod config;
pub mod convert;
pub mod errors;
pub mod float_types;
pub mod generate;
pub mod io;
pub mod mesh;
pub mod roster;
pub mod slug;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use artifacts::{ArtifactSet, Part};
pub use compound::Compound;
pub use config::Config;
pub use convert::convert;
pub use generate::Generator;
pub use mesh::Mesh;
pub use roster::{Roster, RosterEntry};
