//! Merge an entry's three meshes into one multi-body STEP file.

use crate::aabb::Aabb;
use crate::artifacts::{ArtifactSet, Part};
use crate::compound::Compound;
use crate::errors::ConvertError;
use crate::io::step::StepOptions;
use crate::mesh::Mesh;
use crate::triangulated::Triangulated3D;
use std::path::{Path, PathBuf};

/// What a successful conversion wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub bodies: usize,
    pub triangles: usize,
    /// Facets dropped from the export for having no usable plane
    pub degenerate: usize,
    pub bounds: Option<Aabb>,
}

/// Load the backing, text and logo meshes of `inputs` and write them as three
/// bodies of one compound to `output`.
///
/// Every input must already exist as a regular file; otherwise each missing
/// path is reported and nothing is written. An existing `output` is removed
/// before the new file is written, so repeated runs never accumulate bodies.
pub fn convert(
    inputs: &ArtifactSet,
    output: &Path,
    options: &StepOptions,
) -> Result<ConvertReport, ConvertError> {
    let missing: Vec<PathBuf> = inputs
        .iter()
        .map(|(_, path)| path)
        .filter(|path| !path.is_file())
        .map(Path::to_path_buf)
        .collect();
    if !missing.is_empty() {
        for path in &missing {
            log::error!("missing input STL: {}", path.display());
        }
        return Err(ConvertError::MissingInputs(missing));
    }

    let mut compound: Compound<Part> = Compound::new();
    for (part, path) in inputs.iter() {
        let mesh = Mesh::from_stl_file(path, Some(part))
            .map_err(|source| ConvertError::Load { part, source })?;
        let bb = mesh.bounding_box();
        log::debug!(
            "{}: {} triangles ({} degenerate) from {}, bounds {:?}..{:?}",
            part,
            mesh.len(),
            mesh.degenerate_count(),
            path.display(),
            bb.mins.coords.as_slice(),
            bb.maxs.coords.as_slice()
        );
        compound.add(part.tag(), mesh);
    }

    if output.exists() {
        std::fs::remove_file(output).map_err(|source| ConvertError::RemoveExisting {
            path: output.to_path_buf(),
            source,
        })?;
    }
    compound
        .write_step_file(output, options)
        .map_err(ConvertError::Export)?;

    log::info!("Exported STEP: {}", output.display());
    Ok(ConvertReport {
        output: output.to_path_buf(),
        bodies: compound.len(),
        triangles: compound.triangle_count(),
        degenerate: compound.bodies().iter().map(|b| b.mesh.degenerate_count()).sum(),
        bounds: compound.bounding_box(),
    })
}
