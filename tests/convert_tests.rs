mod support;

use std::path::Path;

use nalgebra::Point3;
use tagsmith::{
    ArtifactSet, Mesh, Part, convert, errors::ConvertError, float_types::Real, io::step::StepOptions,
    mesh::Triangle,
};

use crate::support::{step_body_count, write_cube_stl};

fn fixtures(dir: &Path) -> ArtifactSet {
    let set = ArtifactSet::for_id(dir, "ada");
    for (i, (_, path)) in set.iter().enumerate() {
        write_cube_stl(path, i as Real * 2.0);
    }
    set
}

fn options() -> StepOptions {
    StepOptions::new("ada").with_timestamp("2024-01-01T00:00:00")
}

#[test]
fn three_meshes_become_three_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    let output = dir.path().join("ada.step");

    let report = convert(&inputs, &output, &options()).unwrap();

    assert_eq!(report.bodies, 3);
    assert_eq!(report.triangles, 36);
    assert_eq!(report.degenerate, 0);
    assert_eq!(step_body_count(&output), 3);
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("2024-01-01T00:00:00"));
}

#[test]
fn previous_output_survives_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    let output = dir.path().join("ada.step");
    std::fs::write(&output, "stale").unwrap();
    std::fs::remove_file(inputs.path(Part::Text)).unwrap();

    let err = convert(&inputs, &output, &options()).unwrap_err();

    assert!(matches!(err, ConvertError::MissingInputs(_)));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "stale");
}

#[test]
fn report_counts_degenerate_facets_and_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    let mut logo = Mesh::<()>::from_stl_file(inputs.path(Part::Logo), None).unwrap();
    logo.triangles.push(Triangle::from_positions([Point3::origin(); 3]));
    std::fs::write(inputs.path(Part::Logo), logo.to_stl_binary("logo").unwrap()).unwrap();

    let report = convert(&inputs, &dir.path().join("ada.step"), &options()).unwrap();

    assert_eq!(report.triangles, 37);
    assert_eq!(report.degenerate, 1);
    let bounds = report.bounds.unwrap();
    assert_eq!(bounds.mins, Point3::origin());
    assert_eq!(bounds.maxs, Point3::new(5.0, 1.0, 1.0));
}

#[test]
fn missing_input_is_rejected_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    std::fs::remove_file(inputs.path(Part::Logo)).unwrap();
    let output = dir.path().join("ada.step");

    let err = convert(&inputs, &output, &options()).unwrap_err();

    match err {
        ConvertError::MissingInputs(paths) => assert_eq!(paths, [inputs.path(Part::Logo)]),
        other => panic!("expected missing inputs, got {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn every_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = ArtifactSet::for_id(dir.path(), "ghost");

    let err = convert(&inputs, &dir.path().join("ghost.step"), &options()).unwrap_err();

    assert!(matches!(err, ConvertError::MissingInputs(ref p) if p.len() == 3));
}

#[test]
fn directory_does_not_count_as_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    std::fs::remove_file(inputs.path(Part::Text)).unwrap();
    std::fs::create_dir(inputs.path(Part::Text)).unwrap();

    let err = convert(&inputs, &dir.path().join("ada.step"), &options()).unwrap_err();
    assert!(matches!(err, ConvertError::MissingInputs(_)));
}

#[test]
fn unreadable_mesh_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    std::fs::write(inputs.path(Part::Text), b"garbage").unwrap();
    let output = dir.path().join("ada.step");

    let err = convert(&inputs, &output, &options()).unwrap_err();

    match err {
        ConvertError::Load { part, .. } => assert_eq!(part, Part::Text),
        other => panic!("expected load error, got {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn empty_mesh_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    std::fs::write(inputs.path(Part::Logo), b"solid empty\nendsolid empty\n").unwrap();

    let err = convert(&inputs, &dir.path().join("ada.step"), &options()).unwrap_err();
    assert!(matches!(err, ConvertError::Load { part: Part::Logo, .. }));
}

#[test]
fn rerun_replaces_output() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = fixtures(dir.path());
    let output = dir.path().join("ada.step");
    std::fs::write(&output, "stale").unwrap();

    convert(&inputs, &output, &options()).unwrap();
    let first = std::fs::read_to_string(&output).unwrap();
    convert(&inputs, &output, &options()).unwrap();
    let second = std::fs::read_to_string(&output).unwrap();

    assert!(first.starts_with("ISO-10303-21;"));
    assert_eq!(first, second);
    assert_eq!(step_body_count(&output), 3);
}
