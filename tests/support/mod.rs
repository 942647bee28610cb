//! Test support library
//! Provides fixture meshes, a recording stand-in for OpenSCAD, and roster helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use nalgebra::Point3;
use tagsmith::{
    Config, Mesh, Part, Roster,
    compiler::{CompileJob, GeometryCompiler},
    errors::CompileError,
    float_types::Real,
    mesh::Triangle,
};

/// Closed axis-aligned box from `min` to `min + size`, 12 outward-facing triangles.
pub fn cuboid(min: [Real; 3], size: [Real; 3]) -> Mesh<()> {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = [x0 + size[0], y0 + size[1], z0 + size[2]];
    let c = |x, y, z| Point3::new(x, y, z);
    let quads = [
        [c(x0, y0, z0), c(x0, y1, z0), c(x1, y1, z0), c(x1, y0, z0)], // bottom
        [c(x0, y0, z1), c(x1, y0, z1), c(x1, y1, z1), c(x0, y1, z1)], // top
        [c(x0, y0, z0), c(x1, y0, z0), c(x1, y0, z1), c(x0, y0, z1)], // front
        [c(x0, y1, z0), c(x0, y1, z1), c(x1, y1, z1), c(x1, y1, z0)], // back
        [c(x0, y0, z0), c(x0, y0, z1), c(x0, y1, z1), c(x0, y1, z0)], // left
        [c(x1, y0, z0), c(x1, y1, z0), c(x1, y1, z1), c(x1, y0, z1)], // right
    ];
    let triangles = quads
        .iter()
        .flat_map(|[a, b, c, d]| {
            [
                Triangle::from_positions([*a, *b, *c]),
                Triangle::from_positions([*a, *c, *d]),
            ]
        })
        .collect();
    Mesh::from_triangles(triangles, None)
}

/// Write a binary STL cube at `path`.
pub fn write_cube_stl(path: &Path, offset: Real) {
    let bytes = cuboid([offset, 0.0, 0.0], [1.0, 1.0, 1.0])
        .to_stl_binary("fixture")
        .expect("encode fixture STL");
    std::fs::write(path, bytes).expect("write fixture STL");
}

/// One recorded compiler invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub output: PathBuf,
    pub name_text: String,
    pub role_text: String,
    pub org_text: String,
    pub part: Part,
}

/// Stands in for OpenSCAD: records every job and writes a small cube STL to
/// the requested output. Fails on `fail_on` parts.
#[derive(Default)]
pub struct RecordingCompiler {
    pub calls: Mutex<Vec<Call>>,
    pub fail_on: Option<(String, Part)>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when asked to build `part` for an output whose file name starts with `id_`.
    pub fn failing_on(id: &str, part: Part) -> Self {
        RecordingCompiler {
            fail_on: Some((id.to_string(), part)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations whose output belongs to `id`.
    pub fn calls_for(&self, id: &str) -> usize {
        let prefix = format!("{id}_");
        self.calls()
            .iter()
            .filter(|call| {
                call.output
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .count()
    }
}

impl GeometryCompiler for RecordingCompiler {
    fn compile(&self, job: &CompileJob<'_>) -> Result<(), CompileError> {
        self.calls.lock().unwrap().push(Call {
            output: job.output.to_path_buf(),
            name_text: job.name_text.to_string(),
            role_text: job.role_text.to_string(),
            org_text: job.org_text.to_string(),
            part: job.part,
        });

        if let Some((id, part)) = &self.fail_on {
            let name = job.output.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if *part == job.part && name.starts_with(&format!("{id}_")) {
                return Err(CompileError::Failed {
                    program: "fake-openscad".to_string(),
                    output: job.output.to_path_buf(),
                    code: Some(1),
                });
            }
        }

        write_cube_stl(job.output, 0.0);
        Ok(())
    }
}

pub fn roster(csv: &str) -> Roster {
    Roster::from_reader(csv.as_bytes()).expect("parse roster")
}

/// Defaults, writing into `dir/output`.
pub fn config_in(dir: &Path) -> Config {
    Config {
        output_dir: dir.join("output"),
        template_path: dir.join("nametag.scad"),
        ..Config::default()
    }
}

/// Count of shells in a STEP file, read back through truck.
pub fn step_body_count(path: &Path) -> usize {
    let text = std::fs::read_to_string(path).expect("read STEP");
    let exchange = truck_stepio::r#in::ruststep::parser::parse(&text).expect("parse STEP");
    truck_stepio::r#in::Table::from_data_section(&exchange.data[0])
        .shell
        .len()
}
