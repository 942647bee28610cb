//! [STEP] (ISO 10303-21) export for [`Compound`]s via the truck CAD kernel.
//!
//! Each body becomes one B-rep shell: every triangle is turned into a planar
//! face, and corners and edges shared between triangles of the same body are
//! shared in the topology. The shells are written together as one set of
//! models, so CAD tools import the file as several independent bodies.
//!
//! Facets without a usable plane are dropped.
//!
//! [STEP]: https://en.wikipedia.org/wiki/ISO_10303-21

use crate::compound::{Body, Compound};
use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::Triangle;
use hashbrown::HashMap;
use std::fmt::Debug;
use std::path::Path;
use truck_modeling::{Curve, Point3, Surface, builder};
use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModels};
use truck_topology::compress::CompressedShell;
use truck_topology::{Edge, Face, Shell, Vertex, Wire};

type BrepFace = Face<Point3, Curve, Surface>;
type BrepShell = CompressedShell<Point3, Curve, Surface>;

/// Header fields written into the `FILE_NAME` record.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOptions {
    /// Written as the file name; the entry id in practice.
    pub product: String,
    pub author: String,
    pub organization: String,
    /// Time stamp. `None` stamps the current UTC time.
    pub timestamp: Option<String>,
}

impl StepOptions {
    pub fn new(product: impl Into<String>) -> Self {
        StepOptions {
            product: product.into(),
            author: String::new(),
            organization: String::new(),
            timestamp: None,
        }
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    fn header(&self) -> StepHeaderDescriptor {
        let non_empty = |s: &String| if s.is_empty() { vec![] } else { vec![s.clone()] };
        StepHeaderDescriptor {
            file_name: self.product.clone(),
            time_stamp: self.timestamp.clone().unwrap_or_else(current_timestamp),
            authors: non_empty(&self.author),
            organization: non_empty(&self.organization),
            organization_system: concat!("tagsmith ", env!("CARGO_PKG_VERSION")).to_owned(),
            ..Default::default()
        }
    }
}

fn current_timestamp() -> String {
    let format = time::macros::format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    time::OffsetDateTime::now_utc()
        .format(format)
        .unwrap_or_default()
}

/// Bit-exact key for sharing corners; `-0.0` and `0.0` collapse to one vertex.
fn weld_key(p: &nalgebra::Point3<Real>) -> [u64; 3] {
    #[allow(clippy::unnecessary_cast)]
    let bits = |v: Real| (if v == 0.0 { 0.0 } else { v }).to_bits() as u64;
    [bits(p.x), bits(p.y), bits(p.z)]
}

/// Shares vertices and edges between the faces of one body.
#[derive(Default)]
struct Topology {
    vertices: HashMap<[u64; 3], Vertex<Point3>>,
    edges: HashMap<([u64; 3], [u64; 3]), Edge<Point3, Curve>>,
}

impl Topology {
    #[allow(clippy::unnecessary_cast)]
    fn vertex(&mut self, key: [u64; 3], p: &nalgebra::Point3<Real>) -> Vertex<Point3> {
        self.vertices
            .entry(key)
            .or_insert_with(|| builder::vertex(Point3::new(p.x as f64, p.y as f64, p.z as f64)))
            .clone()
    }

    /// The edge from `a` to `b`, reusing (inverted if needed) an existing one.
    fn edge(&mut self, a: ([u64; 3], &Vertex<Point3>), b: ([u64; 3], &Vertex<Point3>)) -> Edge<Point3, Curve> {
        if let Some(edge) = self.edges.get(&(a.0, b.0)) {
            return edge.clone();
        }
        if let Some(edge) = self.edges.get(&(b.0, a.0)) {
            return edge.inverse();
        }
        let edge = builder::line(a.1, b.1);
        self.edges.insert((a.0, b.0), edge.clone());
        edge
    }

    /// Planar face bounded by the triangle, or `None` when it has no plane.
    fn face(&mut self, tri: &Triangle) -> Option<BrepFace> {
        tri.face_normal()?;
        let keys = tri.positions.map(|p| weld_key(&p));
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[0] == keys[2] {
            return None;
        }
        let [v0, v1, v2] = [0, 1, 2].map(|i| self.vertex(keys[i], &tri.positions[i]));
        let wire = Wire::from(vec![
            self.edge((keys[0], &v0), (keys[1], &v1)),
            self.edge((keys[1], &v1), (keys[2], &v2)),
            self.edge((keys[2], &v2), (keys[0], &v0)),
        ]);
        builder::try_attach_plane(&[wire]).ok()
    }
}

/// One body's triangles as a compressed B-rep shell.
fn body_shell<S: Clone + Debug + Send + Sync>(body: &Body<S>) -> Result<BrepShell, IoError> {
    let mut topology = Topology::default();
    let faces: Vec<BrepFace> = body
        .mesh
        .triangles
        .iter()
        .filter_map(|tri| topology.face(tri))
        .collect();

    if faces.is_empty() {
        return Err(IoError::MalformedInput(format!(
            "body '{}' has no non-degenerate facets",
            body.name
        )));
    }
    log::debug!(
        "STEP body '{}': {} of {} facets, {} vertices",
        body.name,
        faces.len(),
        body.mesh.len(),
        topology.vertices.len()
    );

    let shell: Shell<_, _, _> = faces.into();
    Ok(shell.compress())
}

/// Serialize `compound` as a complete Part 21 file, one model per body.
///
/// Fails if the compound is empty or any body has no usable facets.
pub fn to_step<S: Clone + Debug + Send + Sync>(
    compound: &Compound<S>,
    options: &StepOptions,
) -> Result<String, IoError> {
    if compound.is_empty() {
        return Err(IoError::MalformedInput("compound has no bodies".to_string()));
    }

    let shells = compound
        .bodies()
        .iter()
        .map(body_shell::<S>)
        .collect::<Result<Vec<_>, _>>()?;
    let models: StepModels<_, _, _> = shells.iter().collect();

    Ok(CompleteStepDisplay::new(models, options.header()).to_string())
}

/// Serialize `compound` and write it to `path`, replacing any existing file.
pub fn write_step_file<S: Clone + Debug + Send + Sync>(
    compound: &Compound<S>,
    path: impl AsRef<Path>,
    options: &StepOptions,
) -> Result<(), IoError> {
    let path = path.as_ref();
    let text = to_step(compound, options).map_err(|e| e.at(path))?;
    std::fs::write(path, text).map_err(|e| IoError::from(e).at(path))
}

impl<S: Clone + Debug + Send + Sync> Compound<S> {
    pub fn to_step(&self, options: &StepOptions) -> Result<String, IoError> {
        self::to_step(self, options)
    }

    pub fn write_step_file(&self, path: impl AsRef<Path>, options: &StepOptions) -> Result<(), IoError> {
        self::write_step_file(self, path, options)
    }
}
