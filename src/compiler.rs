//! The external geometry compiler that renders one nametag part to STL.

use crate::artifacts::Part;
use crate::errors::CompileError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything needed to render one part of one roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileJob<'a> {
    pub output: &'a Path,
    pub name_text: &'a str,
    pub role_text: &'a str,
    pub org_text: &'a str,
    pub part: Part,
    pub template: &'a Path,
}

/// Renders a [`CompileJob`] to its output file, blocking until done.
///
/// `Sync` so a single compiler can be shared across batch workers.
pub trait GeometryCompiler: Sync {
    fn compile(&self, job: &CompileJob<'_>) -> Result<(), CompileError>;
}

impl<C: GeometryCompiler + ?Sized> GeometryCompiler for &C {
    fn compile(&self, job: &CompileJob<'_>) -> Result<(), CompileError> {
        (**self).compile(job)
    }
}

/// OpenSCAD invoked as a child process:
///
/// ```text
/// openscad -o <output> -D name_text="…" -D position_text="…" -D org_text="…" -D part="…" <template>
/// ```
///
/// No retry and no timeout: a hung compiler hangs the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenScad {
    pub executable: PathBuf,
}

impl Default for OpenScad {
    fn default() -> Self {
        OpenScad::new("openscad")
    }
}

impl OpenScad {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        OpenScad {
            executable: executable.into(),
        }
    }

    /// Argument list for `job`, excluding the program itself.
    pub fn args(job: &CompileJob<'_>) -> Vec<OsString> {
        vec![
            "-o".into(),
            job.output.as_os_str().to_owned(),
            "-D".into(),
            define("name_text", job.name_text).into(),
            "-D".into(),
            define("position_text", job.role_text).into(),
            "-D".into(),
            define("org_text", job.org_text).into(),
            "-D".into(),
            define("part", job.part.tag()).into(),
            job.template.as_os_str().to_owned(),
        ]
    }

    /// Copy-pasteable rendering of the full command line, for logs.
    pub fn command_line(&self, job: &CompileJob<'_>) -> String {
        std::iter::once(self.executable.as_os_str().to_owned())
            .chain(Self::args(job))
            .map(|arg| shell_quote(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn program(&self) -> String {
        self.executable.display().to_string()
    }
}

impl GeometryCompiler for OpenScad {
    fn compile(&self, job: &CompileJob<'_>) -> Result<(), CompileError> {
        log::info!("Running: {}", self.command_line(job));
        let status = Command::new(&self.executable)
            .args(Self::args(job))
            .status()
            .map_err(|source| CompileError::Spawn {
                program: self.program(),
                source,
            })?;
        if !status.success() {
            return Err(CompileError::Failed {
                program: self.program(),
                output: job.output.to_path_buf(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// `key="value"` with the value escaped as an OpenSCAD string literal.
fn define(key: &str, value: &str) -> String {
    let mut out = String::with_capacity(key.len() + value.len() + 3);
    out.push_str(key);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// POSIX-shell quoting: safe words pass through, anything else is single-quoted.
pub fn shell_quote(arg: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c);
    if !arg.is_empty() && arg.chars().all(safe) {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', "'\"'\"'"))
}
