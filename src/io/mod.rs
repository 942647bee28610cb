//! File import/export of meshes in [STL] and compounds in [STEP].
//!
//! [STL]: https://en.wikipedia.org/wiki/STL_(file_format)
//! [STEP]: https://en.wikipedia.org/wiki/ISO_10303-21

pub mod stl;
pub mod step;

use std::path::{Path, PathBuf};

/// Generic I/O and format‑conversion errors.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    MalformedInput(String),
    /// The file parsed but held no facets, so there is no shape to use.
    EmptyMesh,

    /// Any of the above, tagged with the file it came from.
    AtPath(PathBuf, Box<IoError>),
}

impl IoError {
    /// Attach `path` to this error so the message names the offending file.
    pub fn at(self, path: impl AsRef<Path>) -> Self {
        match self {
            already @ IoError::AtPath(..) => already,
            other => IoError::AtPath(path.as_ref().to_path_buf(), Box::new(other)),
        }
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
            EmptyMesh => write!(f, "Mesh contains no triangles"),

            AtPath(path, error) => write!(f, "{}: {error}", path.display()),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::AtPath(_, error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}
