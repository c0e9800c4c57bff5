//! Shared deterministic types for the cleanup engine.

use std::fmt;

use super::rename::ProjectName;

/// Marker tag for demo-page fragments (nav links, table rows, dev paragraph).
pub const TAG_DEMO_PAGES: &str = "demo-pages";
/// Marker tag for end-to-end test fragments (CI steps, ignore entries).
pub const TAG_E2E: &str = "e2e";
/// Marker tag for analytics fragments (tracking component, feature card).
pub const TAG_ANALYTICS: &str = "analytics";

/// An optional template feature that can be pruned.
///
/// Variants are declared in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    DemoPages,
    Analytics,
    Releases,
    E2eTests,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::DemoPages,
        Feature::Analytics,
        Feature::Releases,
        Feature::E2eTests,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::DemoPages => "demo-pages",
            Feature::Analytics => "analytics",
            Feature::Releases => "releases",
            Feature::E2eTests => "e2e-tests",
        }
    }

    /// Phrase used in the final summary line.
    pub fn summary(self) -> &'static str {
        match self {
            Feature::DemoPages => "removed demo pages",
            Feature::Analytics => "removed analytics",
            Feature::Releases => "removed automatic releases",
            Feature::E2eTests => "removed e2e tests",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operator choices for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSelection {
    pub remove_demo_pages: bool,
    pub remove_analytics: bool,
    pub remove_releases: bool,
    pub remove_e2e: bool,
    /// New project name; `None` leaves the identity untouched.
    pub rename_to: Option<ProjectName>,
}

impl FeatureSelection {
    pub fn removes(&self, feature: Feature) -> bool {
        match feature {
            Feature::DemoPages => self.remove_demo_pages,
            Feature::Analytics => self.remove_analytics,
            Feature::Releases => self.remove_releases,
            Feature::E2eTests => self.remove_e2e,
        }
    }

    /// Selected features in execution order.
    pub fn features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.removes(*feature))
            .collect()
    }

    /// True when the run would change nothing.
    pub fn is_empty(&self) -> bool {
        self.features().is_empty() && self.rename_to.is_none()
    }

    /// Drop the rename when it would not change the current name.
    pub fn without_noop_rename(mut self, current_name: &str) -> Self {
        if self
            .rename_to
            .as_ref()
            .is_some_and(|name| name.as_str() == current_name)
        {
            self.rename_to = None;
        }
        self
    }
}
