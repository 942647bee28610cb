//! The three per-entry parts and the files they are written to.

use std::fmt;
use std::path::{Path, PathBuf};

/// One printable piece of a nametag. The tag doubles as the compiler's part
/// selector and as the file-name suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    Backing,
    Text,
    Logo,
}

impl Part {
    /// Generation order.
    pub const ALL: [Part; 3] = [Part::Backing, Part::Text, Part::Logo];

    pub const fn tag(self) -> &'static str {
        match self {
            Part::Backing => "backing",
            Part::Text => "text",
            Part::Logo => "logo",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Expected mesh files for one identifier.
///
/// Existence of all three is the only record that an entry is done; there is
/// no manifest and no checksum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactSet {
    pub id: String,
    paths: [PathBuf; 3],
}

impl ArtifactSet {
    /// `{dir}/{id}_backing.stl`, `{dir}/{id}_text.stl`, `{dir}/{id}_logo.stl`.
    pub fn for_id(output_dir: impl AsRef<Path>, id: &str) -> Self {
        let dir = output_dir.as_ref();
        ArtifactSet {
            id: id.to_string(),
            paths: Part::ALL.map(|part| dir.join(format!("{id}_{}.stl", part.tag()))),
        }
    }

    /// Explicit paths, e.g. from the command line.
    pub fn from_paths(
        id: &str,
        backing: impl Into<PathBuf>,
        text: impl Into<PathBuf>,
        logo: impl Into<PathBuf>,
    ) -> Self {
        ArtifactSet {
            id: id.to_string(),
            paths: [backing.into(), text.into(), logo.into()],
        }
    }

    pub fn path(&self, part: Part) -> &Path {
        &self.paths[part as usize]
    }

    /// `(part, path)` in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (Part, &Path)> {
        Part::ALL.into_iter().zip(self.paths.iter().map(PathBuf::as_path))
    }

    /// Where the merged exchange file for this id lives when generated in batch.
    pub fn step_path(&self) -> PathBuf {
        let dir = self.paths[0].parent().unwrap_or_else(|| Path::new(""));
        dir.join(format!("{}.step", self.id))
    }

    /// Paths that do not count as present. With `require_nonempty`, a zero-byte
    /// file counts as absent.
    pub fn missing(&self, require_nonempty: bool) -> Vec<&Path> {
        self.iter()
            .map(|(_, path)| path)
            .filter(|path| !is_present(path, require_nonempty))
            .collect()
    }

    pub fn is_complete(&self, require_nonempty: bool) -> bool {
        self.missing(require_nonempty).is_empty()
    }
}

fn is_present(path: &Path, require_nonempty: bool) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => !require_nonempty || meta.len() > 0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_id_and_part() {
        let set = ArtifactSet::for_id("out", "ada_lovelace");
        assert_eq!(set.path(Part::Backing), Path::new("out/ada_lovelace_backing.stl"));
        assert_eq!(set.path(Part::Text), Path::new("out/ada_lovelace_text.stl"));
        assert_eq!(set.path(Part::Logo), Path::new("out/ada_lovelace_logo.stl"));
        assert_eq!(set.step_path(), Path::new("out/ada_lovelace.step"));
    }

    #[test]
    fn parts_display_as_tags() {
        let tags: Vec<_> = Part::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(tags, ["backing", "text", "logo"]);
    }

    #[test]
    fn completeness_tracks_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let set = ArtifactSet::for_id(dir.path(), "x");
        assert_eq!(set.missing(false).len(), 3);

        std::fs::write(set.path(Part::Backing), b"solid x\nendsolid x\n").unwrap();
        std::fs::write(set.path(Part::Text), b"").unwrap();
        assert!(!set.is_complete(false));

        std::fs::write(set.path(Part::Logo), b"solid x\nendsolid x\n").unwrap();
        assert!(set.is_complete(false));
        // the empty text part only matters when integrity is requested
        assert_eq!(set.missing(true), vec![set.path(Part::Text)]);
    }
}
