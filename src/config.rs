//! Run configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the binary. Every key is optional:
//!
//! ```toml
//! roster_path = "data/names_roster.csv"
//! template_path = "scad/Turtle_nametag.scad"
//! output_dir = "output"
//! default_org = "TURTLE"
//! openscad = "openscad"
//! step = false
//! require_nonempty = false
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tagsmith.toml";

/// Organization text used when a roster row leaves `org` blank.
pub const DEFAULT_ORG: &str = "TURTLE";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Roster CSV
    pub roster_path: PathBuf,
    /// OpenSCAD source that renders one part of a nametag
    pub template_path: PathBuf,
    /// Where meshes (and STEP files) are written
    pub output_dir: PathBuf,
    pub default_org: String,
    /// Compiler executable, looked up on `PATH` when not absolute
    pub openscad: PathBuf,
    /// Also merge each entry's meshes into `{id}.step`
    pub step: bool,
    /// Treat zero-byte meshes as missing when checking for finished entries
    pub require_nonempty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roster_path: PathBuf::from("data/names_roster.csv"),
            template_path: PathBuf::from("scad/Turtle_nametag.scad"),
            output_dir: PathBuf::from("output"),
            default_org: DEFAULT_ORG.to_string(),
            openscad: PathBuf::from("openscad"),
            step: false,
            require_nonempty: false,
        }
    }
}

impl Config {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load [`DEFAULT_CONFIG_FILE`] from `dir` when it exists, else defaults.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let candidate = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            log::info!("using config {}", candidate.display());
            Self::load(candidate)
        } else {
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = Config::from_toml_str("default_org = \"ACME\"\nstep = true\n", Path::new("t.toml")).unwrap();
        assert_eq!(cfg.default_org, "ACME");
        assert!(cfg.step);
        assert_eq!(cfg.output_dir, PathBuf::from("output"));
        assert_eq!(cfg.openscad, PathBuf::from("openscad"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("outptu_dir = \"x\"\n", Path::new("t.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn discover_without_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn discover_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "output_dir = \"stl\"\n").unwrap();
        let cfg = Config::discover(dir.path()).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("stl"));
    }
}
