//! The cleanup plan: which paths each feature deletes and rewrites.
//!
//! Paths are relative to the project root, so the same plan runs against a
//! real checkout or a temporary fixture tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::transforms::Transformer;
use crate::core::types::Feature;

/// A single guarded action against the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Delete a file or directory tree if present.
    Remove(PathBuf),
    /// Delete a directory only when it exists and is empty.
    RemoveDirIfEmpty(PathBuf),
    /// Transform a file in place if it exists.
    Rewrite(PathBuf, Transformer),
}

impl Step {
    fn remove(path: &str) -> Self {
        Step::Remove(PathBuf::from(path))
    }

    fn remove_dir_if_empty(path: &str) -> Self {
        Step::RemoveDirIfEmpty(PathBuf::from(path))
    }

    fn rewrite(path: &str, transformer: Transformer) -> Self {
        Step::Rewrite(PathBuf::from(path), transformer)
    }
}

/// Files the rename pass rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTargets {
    /// Always considered (skipped if missing).
    pub files: Vec<PathBuf>,
    /// Release-note files; only present while the demo pages survive.
    pub release_note_files: Vec<PathBuf>,
}

impl RenameTargets {
    /// Every candidate, in rewrite order.
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().chain(self.release_note_files.iter())
    }
}

/// Full cleanup plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Manifest read for the current project name.
    pub manifest: PathBuf,
    pub features: BTreeMap<Feature, Vec<Step>>,
    pub rename: RenameTargets,
    /// Always applied last: removes the cleanup tooling itself.
    pub self_removal: Vec<Step>,
}

impl CleanupPlan {
    pub fn steps_for(&self, feature: Feature) -> &[Step] {
        self.features
            .get(&feature)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The plan for the starter template.
    pub fn template() -> Self {
        let mut features = BTreeMap::new();
        features.insert(
            Feature::DemoPages,
            vec![
                Step::remove("src/routes/(clean-up)"),
                Step::remove("src/data/release-content.ts"),
                Step::remove("src/data/releases.ts"),
                Step::remove("src/components/release-notes"),
                Step::rewrite(
                    "src/components/Footer.tsx",
                    Transformer::FooterRemoveDemoPages,
                ),
                Step::rewrite(
                    "src/components/Header.tsx",
                    Transformer::HeaderRemoveDemoPages,
                ),
                Step::rewrite("src/routes/index.tsx", Transformer::IndexRemoveDemoPages),
            ],
        );
        features.insert(
            Feature::Analytics,
            vec![
                Step::rewrite(
                    "src/routes/__root.tsx",
                    Transformer::RootLayoutRemoveAnalytics,
                ),
                Step::rewrite(
                    "src/routes/(clean-up)/features.tsx",
                    Transformer::FeaturesRemoveAnalytics,
                ),
                Step::rewrite("package.json", Transformer::ManifestRemoveAnalytics),
            ],
        );
        features.insert(
            Feature::Releases,
            vec![
                Step::remove(".github/workflows/release.yml"),
                Step::remove("scripts/format-release-notes.ts"),
                Step::rewrite("package.json", Transformer::ManifestRemoveVersion),
            ],
        );
        features.insert(
            Feature::E2eTests,
            vec![
                Step::remove("e2e"),
                Step::remove("playwright.config.ts"),
                Step::remove("docs/e2e-tests"),
                Step::remove_dir_if_empty("docs"),
                Step::rewrite("package.json", Transformer::ManifestRemoveE2e),
                Step::rewrite("vitest.config.ts", Transformer::VitestConfigRemoveE2e),
                Step::rewrite(".github/workflows/ci.yml", Transformer::CiWorkflowRemoveE2e),
                Step::rewrite(".gitignore", Transformer::GitignoreRemoveE2e),
            ],
        );

        let rename = RenameTargets {
            files: [
                "package.json",
                ".cta.json",
                "supabase/config.toml",
                "src/components/Footer.tsx",
                "src/routes/(clean-up)/about.tsx",
                "src/routes/index.tsx",
                "src/routes/(clean-up)/features.tsx",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            release_note_files: [
                "src/routes/(clean-up)/release-notes/index.tsx",
                "src/components/release-notes/ReleaseNoteHeader.tsx",
                "scripts/format-release-notes.ts",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        };

        let self_removal = vec![
            Step::remove("scripts/cleanup.ts"),
            Step::remove("scripts/cleanup.test.ts"),
            Step::remove("docs/cleanup"),
            Step::remove_dir_if_empty("docs"),
            Step::rewrite("package.json", Transformer::ManifestRemoveCleanup),
        ];

        Self {
            manifest: PathBuf::from("package.json"),
            features,
            rename,
            self_removal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn template_covers_every_feature() {
        let plan = CleanupPlan::template();
        for feature in Feature::ALL {
            assert!(!plan.steps_for(feature).is_empty(), "{feature} has no steps");
        }
    }

    #[test]
    fn deletions_precede_rewrites_within_a_feature() {
        let plan = CleanupPlan::template();
        for feature in Feature::ALL {
            let steps = plan.steps_for(feature);
            let first_rewrite = steps
                .iter()
                .position(|s| matches!(s, Step::Rewrite(..)))
                .unwrap_or(steps.len());
            assert!(
                steps[first_rewrite..]
                    .iter()
                    .all(|s| matches!(s, Step::Rewrite(..))),
                "{feature} mixes deletions after rewrites"
            );
        }
    }

    #[test]
    fn self_removal_ends_with_manifest_rewrite() {
        let plan = CleanupPlan::template();
        assert_eq!(
            plan.self_removal.last(),
            Some(&Step::Rewrite(
                PathBuf::from("package.json"),
                Transformer::ManifestRemoveCleanup
            ))
        );
    }

    #[test]
    fn release_note_targets_follow_base_targets() {
        let plan = CleanupPlan::template();
        let all: Vec<_> = plan.rename.all().collect();
        assert_eq!(all.first().map(|p| p.as_path()), Some(Path::new("package.json")));
        assert_eq!(
            all.last().map(|p| p.as_path()),
            Some(Path::new("scripts/format-release-notes.ts"))
        );
    }
}
