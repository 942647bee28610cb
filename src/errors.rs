//! Error types for each pipeline stage

use crate::artifacts::Part;
use crate::io::IoError;
use std::path::PathBuf;

/// The roster could not be read at all. Individual bad rows are not errors;
/// they surface as [`crate::roster::RosterRow::Invalid`].
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("cannot open roster {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read roster {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed roster {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A single external compiler invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{program} failed to start: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {} while building {}", describe_exit(*code), output.display())]
    Failed {
        program: String,
        output: PathBuf,
        code: Option<i32>,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Merging three meshes into one exchange file failed.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("missing input STL: {}", join_paths(.0))]
    MissingInputs(Vec<PathBuf>),
    #[error("failed to read {part} STL: {source}")]
    Load {
        part: Part,
        #[source]
        source: IoError,
    },
    #[error("cannot remove previous output {}: {source}", path.display())]
    RemoveExisting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("STEP export failed: {0}")]
    Export(#[source] IoError),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A batch run stopped early. Rows finished before the failure keep their files.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("generating '{id}': {source}")]
    Compile {
        id: String,
        #[source]
        source: CompileError,
    },
    #[error("converting '{id}' to STEP: {source}")]
    Convert {
        id: String,
        #[source]
        source: ConvertError,
    },
}
