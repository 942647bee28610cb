//! Roster to meshes: make sure every well-formed entry has its three part files.

use crate::artifacts::{ArtifactSet, Part};
use crate::batch::{BatchOps, DefaultBatchOps};
use crate::compiler::{CompileJob, GeometryCompiler};
use crate::config::Config;
use crate::convert::convert;
use crate::errors::GenerateError;
use crate::io::step::StepOptions;
use crate::roster::{Roster, RosterEntry, RosterRow};

/// What happened to one well-formed entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryOutcome {
    pub id: String,
    /// `false` when all three meshes were already on disk
    pub generated: bool,
    pub converted: bool,
}

/// Totals for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Ids whose meshes were (re)built this run
    pub generated: Vec<String>,
    /// Ids skipped because their meshes already existed
    pub cached: Vec<String>,
    /// Rows rejected for missing name or role
    pub invalid: usize,
    /// STEP files written
    pub converted: usize,
}

pub struct Generator<C: GeometryCompiler> {
    compiler: C,
    config: Config,
}

impl<C: GeometryCompiler> Generator<C> {
    pub const fn new(config: Config, compiler: C) -> Self {
        Generator { compiler, config }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Read the configured roster and [`run`](Self::run) it.
    pub fn run_configured(&self) -> Result<GenerateReport, GenerateError> {
        let roster = Roster::from_path(&self.config.roster_path)?;
        self.run(&roster)
    }

    /// Process `roster` with the default scheduling backend.
    pub fn run(&self, roster: &Roster) -> Result<GenerateReport, GenerateError> {
        self.run_with(roster, &DefaultBatchOps::new())
    }

    /// Process `roster`, scheduling entries on `ops`.
    ///
    /// The first compiler or conversion failure aborts the run; entries that
    /// already finished keep their files.
    pub fn run_with<B: BatchOps>(
        &self,
        roster: &Roster,
        ops: &B,
    ) -> Result<GenerateReport, GenerateError> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| GenerateError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let mut report = GenerateReport::default();
        for row in &roster.rows {
            if let RosterRow::Invalid { line, reason, raw } = row {
                log::warn!("Skipping row {line} with {reason}: {raw}");
                report.invalid += 1;
            }
        }

        let entries: Vec<&RosterEntry> = roster.entries().collect();
        let outcomes = ops.try_map(&entries, |entry| self.process(entry))?;

        for outcome in outcomes {
            if outcome.converted {
                report.converted += 1;
            }
            if outcome.generated {
                report.generated.push(outcome.id);
            } else {
                report.cached.push(outcome.id);
            }
        }

        log::info!(
            "Done generating STLs to {} ({} generated, {} cached, {} skipped)",
            output_dir.display(),
            report.generated.len(),
            report.cached.len(),
            report.invalid
        );
        Ok(report)
    }

    /// Build (or reuse) one entry's meshes, then optionally merge them.
    pub fn process(&self, entry: &RosterEntry) -> Result<EntryOutcome, GenerateError> {
        let id = entry.tag_id();
        let org = entry.org_or(&self.config.default_org);
        let artifacts = ArtifactSet::for_id(&self.config.output_dir, &id);

        let generated = if artifacts.is_complete(self.config.require_nonempty) {
            for (_, path) in artifacts.iter() {
                log::info!("Already exists, skipping: {}", path.display());
            }
            false
        } else {
            for part in Part::ALL {
                let job = CompileJob {
                    output: artifacts.path(part),
                    name_text: &entry.name,
                    role_text: &entry.role,
                    org_text: org,
                    part,
                    template: &self.config.template_path,
                };
                self.compiler
                    .compile(&job)
                    .map_err(|source| GenerateError::Compile {
                        id: id.clone(),
                        source,
                    })?;
            }
            true
        };

        let converted = if self.config.step {
            let options = StepOptions::new(id.as_str()).with_organization(org);
            convert(&artifacts, &artifacts.step_path(), &options).map_err(|source| {
                GenerateError::Convert {
                    id: id.clone(),
                    source,
                }
            })?;
            true
        } else {
            false
        };

        Ok(EntryOutcome {
            id,
            generated,
            converted,
        })
    }
}
