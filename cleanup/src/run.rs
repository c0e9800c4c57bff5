//! Orchestration for a cleanup run.
//!
//! A run applies the selected features' steps in plan order, renames the
//! project, removes the cleanup tooling itself, and finally hands off to the
//! external toolchain. Every step is guarded on the target still existing,
//! so a second run over the same tree changes nothing. Any error aborts the
//! remaining steps; files already rewritten stay rewritten.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::markers::find_unterminated_block;
use crate::core::rename::{ProjectIdentity, ProjectName, rename_in_content};
use crate::core::transforms::Transformer;
use crate::core::types::{Feature, FeatureSelection};
use crate::io::files::{read_text, remove_dir_if_empty, remove_path, write_text_atomic};
use crate::io::toolchain::{Toolchain, ToolchainStep};
use crate::plan::{CleanupPlan, Step};

/// Inputs for one run.
#[derive(Debug, Clone, Copy)]
pub struct CleanupRequest<'a> {
    pub root: &'a Path,
    pub plan: &'a CleanupPlan,
    pub selection: &'a FeatureSelection,
    pub identity: &'a ProjectIdentity,
}

/// Which part of the run a step belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Feature(Feature),
    Rename,
    SelfRemoval,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Feature(feature) => write!(f, "{feature}"),
            Phase::Rename => f.write_str("rename"),
            Phase::SelfRemoval => f.write_str("self-removal"),
        }
    }
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Removed,
    AlreadyAbsent,
    /// Directory left in place because it still has entries.
    KeptNonEmpty,
    Rewritten,
    /// Transform produced identical content; nothing written.
    Unchanged,
    /// Rewrite target does not exist.
    SkippedMissing,
}

impl StepOutcome {
    pub fn is_change(self) -> bool {
        matches!(self, StepOutcome::Removed | StepOutcome::Rewritten)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub phase: Phase,
    pub path: PathBuf,
    pub outcome: StepOutcome,
}

/// Everything a run did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub records: Vec<StepRecord>,
    pub features: Vec<Feature>,
    pub renamed_to: Option<ProjectName>,
    pub toolchain_steps: Vec<ToolchainStep>,
}

impl CleanupReport {
    /// Number of steps that removed or rewrote something.
    pub fn changes(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome.is_change())
            .count()
    }

    pub fn outcome_for(&self, phase: Phase, path: &Path) -> Option<StepOutcome> {
        self.records
            .iter()
            .find(|record| record.phase == phase && record.path == path)
            .map(|record| record.outcome)
    }

    /// Closing line shown to the operator.
    pub fn summary_line(&self) -> String {
        let mut parts: Vec<String> = self
            .features
            .iter()
            .map(|feature| feature.summary().to_string())
            .collect();
        if let Some(name) = &self.renamed_to {
            parts.push(format!("renamed to \"{name}\""));
        }
        if parts.is_empty() {
            return "Done! removed cleanup tooling.".to_string();
        }
        format!("Done! {}.", parts.join(", "))
    }

    fn record(&mut self, phase: Phase, path: &Path, outcome: StepOutcome) {
        debug!(%phase, path = %path.display(), ?outcome, "step applied");
        self.records.push(StepRecord {
            phase,
            path: path.to_path_buf(),
            outcome,
        });
    }
}

/// Run the cleanup against `request.root`.
///
/// `toolchain` of `None` skips the install/build/format hand-off.
/// Operator-facing progress lines go to `out`.
pub fn run_cleanup<W: Write>(
    request: &CleanupRequest<'_>,
    toolchain: Option<&dyn Toolchain>,
    out: &mut W,
) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();
    info!(root = %request.root.display(), "starting cleanup");

    for feature in request.selection.features() {
        writeln!(out, "Removing {feature}...")?;
        for step in request.plan.steps_for(feature) {
            apply_step(request.root, Phase::Feature(feature), step, &mut report)
                .with_context(|| format!("remove {feature}"))?;
        }
        report.features.push(feature);
        info!(%feature, "feature removed");
    }

    if let Some(name) = &request.selection.rename_to {
        writeln!(out, "Renaming project...")?;
        rename_project(request, name, &mut report).context("rename project")?;
        report.renamed_to = Some(name.clone());
        info!(%name, "project renamed");
    }

    writeln!(out, "Removing cleanup tooling...")?;
    for step in &request.plan.self_removal {
        apply_step(request.root, Phase::SelfRemoval, step, &mut report)
            .context("remove cleanup tooling")?;
    }

    if let Some(toolchain) = toolchain {
        for step in ToolchainStep::ALL {
            writeln!(out, "{}", step.progress())?;
            toolchain
                .run(step)
                .with_context(|| format!("toolchain {step}"))?;
            report.toolchain_steps.push(step);
        }
    } else {
        info!("toolchain skipped");
    }

    info!(changes = report.changes(), "cleanup finished");
    Ok(report)
}

fn apply_step(root: &Path, phase: Phase, step: &Step, report: &mut CleanupReport) -> Result<()> {
    match step {
        Step::Remove(rel) => {
            let outcome = if remove_path(&root.join(rel))? {
                StepOutcome::Removed
            } else {
                StepOutcome::AlreadyAbsent
            };
            report.record(phase, rel, outcome);
        }
        Step::RemoveDirIfEmpty(rel) => {
            let path = root.join(rel);
            let outcome = if !path.exists() {
                StepOutcome::AlreadyAbsent
            } else if remove_dir_if_empty(&path)? {
                StepOutcome::Removed
            } else {
                StepOutcome::KeptNonEmpty
            };
            report.record(phase, rel, outcome);
        }
        Step::Rewrite(rel, transformer) => {
            let outcome = rewrite_file(root, rel, |content| {
                warn_unterminated(rel, content, *transformer);
                transformer.apply(content)
            })?;
            report.record(phase, rel, outcome);
        }
    }
    Ok(())
}

fn rename_project(
    request: &CleanupRequest<'_>,
    name: &ProjectName,
    report: &mut CleanupReport,
) -> Result<()> {
    for rel in request.plan.rename.all() {
        let outcome = rewrite_file(request.root, rel, |content| {
            rename_in_content(content, request.identity, name)
        })?;
        report.record(Phase::Rename, rel, outcome);
    }
    Ok(())
}

/// Read, transform, and write back `rel` if it exists and the content changed.
fn rewrite_file<F>(root: &Path, rel: &Path, transform: F) -> Result<StepOutcome>
where
    F: FnOnce(&str) -> String,
{
    let path = root.join(rel);
    if !path.is_file() {
        return Ok(StepOutcome::SkippedMissing);
    }
    let before = read_text(&path)?;
    let after = transform(&before);
    if after == before {
        return Ok(StepOutcome::Unchanged);
    }
    write_text_atomic(&path, &after)?;
    Ok(StepOutcome::Rewritten)
}

fn warn_unterminated(rel: &Path, content: &str, transformer: Transformer) {
    let Some(tag) = transformer.marker_tag() else {
        return;
    };
    if let Some(line) = find_unterminated_block(content, tag) {
        warn!(
            path = %rel.display(),
            tag,
            line,
            "unterminated cleanup marker; removing through end of file"
        );
    }
}
