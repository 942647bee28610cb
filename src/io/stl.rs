use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::{Mesh, Triangle};
use crate::triangulated::Triangulated3D;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;
use std::io::Cursor;
use std::path::Path;

/// Export to ASCII STL
/// Convert this Mesh to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use tagsmith::mesh::{Mesh, Triangle};
/// # use nalgebra::Point3;
/// let tri = Triangle::from_positions([
///     Point3::origin(),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// let mesh = Mesh::<()>::from_triangles(vec![tri], None);
/// let text = mesh.to_stl_ascii("my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(
	shape: &T,
	name: &str,
) -> String {
	let mut out = String::new();
	out.push_str(&format!("solid {name}\n"));

	shape.visit_triangles(|tri| {
		let n = tri[0].normal;
		out.push_str(&format!(
			"  facet normal {:.6} {:.6} {:.6}\n",
			n.x, n.y, n.z
		));
		out.push_str("    outer loop\n");
		for v in &tri {
			let p = v.position;
			out.push_str(&format!(
				"      vertex {:.6} {:.6} {:.6}\n",
				p.x, p.y, p.z
			));
		}
		out.push_str("    endloop\n");
		out.push_str("  endfacet\n");
	});

	out.push_str(&format!("endsolid {name}\n"));
	out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// The 80-byte header is left blank; `_name` is accepted for symmetry with
/// [`to_stl_ascii`].
pub fn to_stl_binary<T: Triangulated3D>(
	shape: &T,
	_name: &str,
) -> std::io::Result<Vec<u8>> {
	use stl_io::{Normal, Triangle, Vertex, write_stl};

	let mut triangles = Vec::<Triangle>::new();

	shape.visit_triangles(|tri| {
		let n = tri[0].normal;
		#[allow(clippy::unnecessary_cast)]
		{
			triangles.push(Triangle {
				normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
				vertices: tri.map(|v| {
					let p = v.position;
					Vertex::new([p.x as f32, p.y as f32, p.z as f32])
				}),
			});
		}
	});

	let mut cursor = Cursor::new(Vec::new());
	write_stl(&mut cursor, triangles.iter())?;
	Ok(cursor.into_inner())
}

/// Parse ASCII or binary STL bytes into facets using `stl_io`.
///
/// A stream that parses but holds no facets is reported as
/// [`IoError::EmptyMesh`]: downstream there would be nothing to export.
pub fn from_stl<S: Clone + Debug + Send + Sync>(
	stl_data: &[u8],
	metadata: Option<S>,
) -> Result<Mesh<S>, IoError> {
	let mut cursor = Cursor::new(stl_data);
	let stl_reader = stl_io::create_stl_reader(&mut cursor)
		.map_err(|e| IoError::MalformedInput(format!("not an STL stream ({e})")))?;

	let mut triangles = Vec::new();
	for tri_result in stl_reader {
		let tri = tri_result
			.map_err(|e| IoError::MalformedInput(format!("bad facet #{} ({e})", triangles.len())))?;

		let corner = |i: usize| {
			Point3::new(
				tri.vertices[i][0] as Real,
				tri.vertices[i][1] as Real,
				tri.vertices[i][2] as Real,
			)
		};
		let corners = [corner(0), corner(1), corner(2)];
		if corners.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
			return Err(IoError::MalformedInput(format!(
				"non-finite coordinate in facet #{}",
				triangles.len()
			)));
		}
		triangles.push(Triangle::new(
			corners,
			Vector3::new(
				tri.normal[0] as Real,
				tri.normal[1] as Real,
				tri.normal[2] as Real,
			),
		));
	}

	if triangles.is_empty() {
		return Err(IoError::EmptyMesh);
	}
	Ok(Mesh::from_triangles(triangles, metadata))
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }

    /// Create a Mesh from STL data using `stl_io`.
    pub fn from_stl(stl_data: &[u8], metadata: Option<S>) -> Result<Mesh<S>, IoError> {
        self::from_stl(stl_data, metadata)
    }

    /// Read and parse an STL file. Every error names `path`.
    pub fn from_stl_file(path: impl AsRef<Path>, metadata: Option<S>) -> Result<Mesh<S>, IoError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| IoError::from(e).at(path))?;
        self::from_stl(&bytes, metadata).map_err(|e| e.at(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh<()> {
        Mesh::from_triangles(
            vec![Triangle::from_positions([
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ])],
            None,
        )
    }

    #[test]
    fn ascii_has_solid_and_facets() {
        let text = unit_triangle().to_stl_ascii("tri");
        assert!(text.starts_with("solid tri\n"));
        assert!(text.ends_with("endsolid tri\n"));
        assert_eq!(text.matches("facet normal").count(), 1);
        assert_eq!(text.matches("vertex").count(), 3);
    }

    #[test]
    fn binary_reads_back() {
        let bytes = unit_triangle().to_stl_binary("tri").unwrap();
        let mesh: Mesh<()> = Mesh::from_stl(&bytes, None).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.triangles[0].positions[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn ascii_reads_back() {
        let text = unit_triangle().to_stl_ascii("tri");
        let mesh: Mesh<()> = Mesh::from_stl(text.as_bytes(), None).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn zero_facets_is_empty_mesh() {
        let bytes = Mesh::<()>::new().to_stl_binary("empty").unwrap();
        assert!(matches!(Mesh::<()>::from_stl(&bytes, None), Err(IoError::EmptyMesh)));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut bytes = unit_triangle().to_stl_binary("tri").unwrap();
        // header (80) + count (4) + normal (12) puts the first vertex at 96
        bytes[96..100].copy_from_slice(&f32::NAN.to_le_bytes());
        let err = Mesh::<()>::from_stl(&bytes, None).unwrap_err();
        assert!(matches!(err, IoError::MalformedInput(ref msg) if msg.contains("non-finite")));

        bytes[96..100].copy_from_slice(&f32::INFINITY.to_le_bytes());
        assert!(Mesh::<()>::from_stl(&bytes, None).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Mesh::<()>::from_stl(b"not a mesh", None).is_err());
    }
}
