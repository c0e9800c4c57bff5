//! Targeted per-file transformers.
//!
//! Each transformer removes one feature's traces from one known template
//! file. They edit text, not syntax trees: literal removals first, then
//! marker stripping. A missing pattern turns its step into a no-op, so every
//! transformer is total and applying it twice equals applying it once.

use std::sync::LazyLock;

use regex::Regex;

use super::markers::strip_marked_blocks;
use super::types::{TAG_ANALYTICS, TAG_DEMO_PAGES, TAG_E2E};

const FOOTER_LINK_IMPORT: &str = "import { Link } from \"@tanstack/react-router\";\n\n";
const HEADER_DEMO_ICONS: [&str; 3] = ["\tFileText,\n", "\tInfo,\n", "\tSparkles,\n"];
const VITEST_E2E_EXCLUDE: &str = "\"e2e/**\", ";
const CI_E2E_TITLE: &str = "name: E2E Tests + Database Migration (if detected)";
const CI_MIGRATIONS_TITLE: &str = "name: Test Database Migrations (if detected)";
const ANALYTICS_IMPORT: &str = "import { Analytics } from \"@vercel/analytics/react\";\n";
const ANALYTICS_ICON: &str = "\tBarChart3,\n";

/// Build a regex matching one `"key": "value",` manifest entry together with
/// its leading whitespace and trailing newline.
fn manifest_entry(key: &str) -> Regex {
    let pattern = format!(r#"\s+"{}": "[^"]+",\n"#, regex::escape(key));
    Regex::new(&pattern).unwrap()
}

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("version"));
static TEST_E2E_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("test:e2e"));
static TEST_E2E_UI_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("test:e2e:ui"));
static PLAYWRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("@playwright/test"));
static ANALYTICS_DEP_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("@vercel/analytics"));
static CLEANUP_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("cleanup"));
static CLACK_DEP_RE: LazyLock<Regex> = LazyLock::new(|| manifest_entry("@clack/prompts"));

/// Replace the first occurrence of `needle` with nothing.
fn remove_first(content: &str, needle: &str) -> String {
    content.replacen(needle, "", 1)
}

/// Collapse the first matching manifest entry down to a bare newline.
fn remove_entry(content: &str, re: &Regex) -> String {
    re.replace(content, "\n").into_owned()
}

/// A named transformer, so plans can be declared as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformer {
    FooterRemoveDemoPages,
    HeaderRemoveDemoPages,
    IndexRemoveDemoPages,
    ManifestRemoveVersion,
    ManifestRemoveE2e,
    VitestConfigRemoveE2e,
    CiWorkflowRemoveE2e,
    GitignoreRemoveE2e,
    RootLayoutRemoveAnalytics,
    FeaturesRemoveAnalytics,
    ManifestRemoveAnalytics,
    ManifestRemoveCleanup,
}

impl Transformer {
    pub fn apply(self, content: &str) -> String {
        match self {
            Transformer::FooterRemoveDemoPages => footer_remove_demo_pages(content),
            Transformer::HeaderRemoveDemoPages => header_remove_demo_pages(content),
            Transformer::IndexRemoveDemoPages => index_remove_demo_pages(content),
            Transformer::ManifestRemoveVersion => manifest_remove_version(content),
            Transformer::ManifestRemoveE2e => manifest_remove_e2e(content),
            Transformer::VitestConfigRemoveE2e => vitest_config_remove_e2e(content),
            Transformer::CiWorkflowRemoveE2e => ci_workflow_remove_e2e(content),
            Transformer::GitignoreRemoveE2e => gitignore_remove_e2e(content),
            Transformer::RootLayoutRemoveAnalytics => root_layout_remove_analytics(content),
            Transformer::FeaturesRemoveAnalytics => features_remove_analytics(content),
            Transformer::ManifestRemoveAnalytics => manifest_remove_analytics(content),
            Transformer::ManifestRemoveCleanup => manifest_remove_cleanup(content),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Transformer::FooterRemoveDemoPages => "footer-remove-demo-pages",
            Transformer::HeaderRemoveDemoPages => "header-remove-demo-pages",
            Transformer::IndexRemoveDemoPages => "index-remove-demo-pages",
            Transformer::ManifestRemoveVersion => "manifest-remove-version",
            Transformer::ManifestRemoveE2e => "manifest-remove-e2e",
            Transformer::VitestConfigRemoveE2e => "vitest-config-remove-e2e",
            Transformer::CiWorkflowRemoveE2e => "ci-workflow-remove-e2e",
            Transformer::GitignoreRemoveE2e => "gitignore-remove-e2e",
            Transformer::RootLayoutRemoveAnalytics => "root-layout-remove-analytics",
            Transformer::FeaturesRemoveAnalytics => "features-remove-analytics",
            Transformer::ManifestRemoveAnalytics => "manifest-remove-analytics",
            Transformer::ManifestRemoveCleanup => "manifest-remove-cleanup",
        }
    }

    /// Marker tag this transformer strips, if any.
    pub fn marker_tag(self) -> Option<&'static str> {
        match self {
            Transformer::FooterRemoveDemoPages
            | Transformer::HeaderRemoveDemoPages
            | Transformer::IndexRemoveDemoPages => Some(TAG_DEMO_PAGES),
            Transformer::CiWorkflowRemoveE2e | Transformer::GitignoreRemoveE2e => Some(TAG_E2E),
            Transformer::RootLayoutRemoveAnalytics | Transformer::FeaturesRemoveAnalytics => {
                Some(TAG_ANALYTICS)
            }
            Transformer::ManifestRemoveVersion
            | Transformer::ManifestRemoveE2e
            | Transformer::VitestConfigRemoveE2e
            | Transformer::ManifestRemoveAnalytics
            | Transformer::ManifestRemoveCleanup => None,
        }
    }
}

/// Drop the router `Link` import and the release-notes link.
pub fn footer_remove_demo_pages(content: &str) -> String {
    let result = remove_first(content, FOOTER_LINK_IMPORT);
    strip_marked_blocks(&result, TAG_DEMO_PAGES)
}

/// Drop the demo-page icon imports and the About / Features / Release Notes nav entries.
pub fn header_remove_demo_pages(content: &str) -> String {
    let result = HEADER_DEMO_ICONS
        .iter()
        .fold(content.to_string(), |acc, icon| remove_first(&acc, icon));
    strip_marked_blocks(&result, TAG_DEMO_PAGES)
}

/// Drop the features link, the demo route table rows, and the dev-only paragraph.
pub fn index_remove_demo_pages(content: &str) -> String {
    strip_marked_blocks(content, TAG_DEMO_PAGES)
}

pub fn manifest_remove_version(content: &str) -> String {
    remove_entry(content, &VERSION_RE)
}

/// Drop the e2e scripts and the Playwright dependency.
pub fn manifest_remove_e2e(content: &str) -> String {
    [&*TEST_E2E_RE, &*TEST_E2E_UI_RE, &*PLAYWRIGHT_RE]
        .into_iter()
        .fold(content.to_string(), |acc, re| remove_entry(&acc, re))
}

/// Drop `e2e/**` from the test runner's exclude list, keeping the other excludes.
pub fn vitest_config_remove_e2e(content: &str) -> String {
    remove_first(content, VITEST_E2E_EXCLUDE)
}

/// Drop e2e steps and jobs, then retitle the migrations job.
pub fn ci_workflow_remove_e2e(content: &str) -> String {
    let result = strip_marked_blocks(content, TAG_E2E);
    result.replacen(CI_E2E_TITLE, CI_MIGRATIONS_TITLE, 1)
}

pub fn gitignore_remove_e2e(content: &str) -> String {
    strip_marked_blocks(content, TAG_E2E)
}

/// Drop the analytics import and the tracking component.
pub fn root_layout_remove_analytics(content: &str) -> String {
    let result = remove_first(content, ANALYTICS_IMPORT);
    strip_marked_blocks(&result, TAG_ANALYTICS)
}

/// Drop the chart icon import and the analytics feature card.
pub fn features_remove_analytics(content: &str) -> String {
    let result = remove_first(content, ANALYTICS_ICON);
    strip_marked_blocks(&result, TAG_ANALYTICS)
}

pub fn manifest_remove_analytics(content: &str) -> String {
    remove_entry(content, &ANALYTICS_DEP_RE)
}

/// Drop the cleanup script entry and its prompt-library dependency.
pub fn manifest_remove_cleanup(content: &str) -> String {
    let result = remove_entry(content, &CLEANUP_SCRIPT_RE);
    remove_entry(&result, &CLACK_DEP_RE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::template_fixture;

    fn parses_as_json(content: &str) {
        serde_json::from_str::<serde_json::Value>(content).expect("valid json");
    }

    #[test]
    fn footer_drops_link_import_and_release_notes_link() {
        let original = template_fixture("src/components/Footer.tsx");
        assert!(original.contains("import { Link } from \"@tanstack/react-router\""));
        assert!(original.contains("to=\"/release-notes\""));

        let result = footer_remove_demo_pages(&original);
        assert_ne!(result, original);
        assert!(!result.contains("import { Link } from \"@tanstack/react-router\""));
        assert!(!result.contains("to=\"/release-notes\""));
        assert!(result.contains("export function Footer"));
    }

    #[test]
    fn header_drops_icons_and_nav_entries() {
        let original = template_fixture("src/components/Header.tsx");
        assert!(original.matches("to=\"/about\"").count() >= 2);
        assert!(original.matches("to=\"/features\"").count() >= 2);
        assert!(original.matches("to=\"/release-notes\"").count() >= 2);

        let result = header_remove_demo_pages(&original);
        for gone in [
            "FileText",
            "Info,",
            "Sparkles,",
            "to=\"/about\"",
            "to=\"/features\"",
            "to=\"/release-notes\"",
            ">About</span>",
            ">Features</span>",
            ">Release Notes</span>",
        ] {
            assert!(!result.contains(gone), "{gone} should be removed");
        }
        assert!(result.contains("to=\"/dashboard\""));
        assert!(result.contains("\tLogOut,\n"));
    }

    #[test]
    fn index_drops_demo_rows_and_dev_paragraph() {
        let original = template_fixture("src/routes/index.tsx");
        assert!(original.contains("See all features in detail"));
        assert!(original.contains("About this project"));
        assert!(original.contains("Features overview"));
        assert!(original.contains("These onboarding steps are only visible in development"));

        let result = index_remove_demo_pages(&original);
        assert!(!result.contains("See all features in detail"));
        assert!(!result.contains("to=\"/features\""));
        assert!(!result.contains("About this project"));
        assert!(!result.contains("Features overview"));
        assert!(!result.contains("These onboarding steps are only visible in development"));
        assert!(!result.contains("Clean up the starter template"));
        assert!(result.contains("/dashboard"));
    }

    #[test]
    fn manifest_version_removed_and_json_stays_valid() {
        let original = template_fixture("package.json");
        assert!(original.contains("\"version\""));

        let result = manifest_remove_version(&original);
        assert_ne!(result, original);
        assert!(!result.contains("\"version\""));
        parses_as_json(&result);
    }

    #[test]
    fn manifest_version_removed_whatever_the_value() {
        let input = "{\n  \"name\": \"x\",\n  \"version\": \"0.0.0-beta.7\",\n  \"private\": true\n}\n";
        assert_eq!(
            manifest_remove_version(input),
            "{\n  \"name\": \"x\",\n  \"private\": true\n}\n"
        );
    }

    #[test]
    fn manifest_e2e_entries_removed() {
        let original = template_fixture("package.json");
        assert!(original.contains("\"test:e2e\""));
        assert!(original.contains("\"test:e2e:ui\""));
        assert!(original.contains("\"@playwright/test\""));

        let result = manifest_remove_e2e(&original);
        assert!(!result.contains("\"test:e2e\""));
        assert!(!result.contains("\"test:e2e:ui\""));
        assert!(!result.contains("\"@playwright/test\""));
        assert!(result.contains("\"test\""));
        parses_as_json(&result);
    }

    #[test]
    fn vitest_keeps_other_excludes() {
        let original = template_fixture("vitest.config.ts");
        assert!(original.contains("\"e2e/**\""));

        let result = vitest_config_remove_e2e(&original);
        assert_ne!(result, original);
        assert!(!result.contains("\"e2e/**\""));
        assert!(result.contains("exclude: [\"node_modules/**\"]"));
    }

    #[test]
    fn ci_drops_e2e_steps_and_retitles_job() {
        let original = template_fixture(".github/workflows/ci.yml");
        assert!(original.contains("e2e-from-database-changes:"));
        assert!(original.contains("\n  e2e:\n"));
        assert!(original.contains("Seed database"));
        assert!(original.contains("Run Playwright tests"));

        let result = ci_workflow_remove_e2e(&original);
        assert!(!result.contains("Seed database"));
        assert!(!result.contains("Run Playwright tests"));
        assert!(!result.contains("\n  e2e:\n"));
        assert!(!result.contains(CI_E2E_TITLE));
        assert!(result.contains(CI_MIGRATIONS_TITLE));
        for kept in [
            "code-quality:",
            "detect-database-changes:",
            "e2e-from-database-changes:",
            "Verify migrations apply cleanly",
            "Regenerate types and build",
        ] {
            assert!(result.contains(kept), "{kept} should remain");
        }
    }

    #[test]
    fn gitignore_drops_playwright_block() {
        let original = template_fixture(".gitignore");
        assert!(original.contains("# Playwright"));

        let result = gitignore_remove_e2e(&original);
        assert!(!result.contains("# Playwright"));
        assert!(!result.contains("/test-results/"));
        assert!(!result.contains("/e2e/.auth/"));
        assert!(result.contains("node_modules"));
    }

    #[test]
    fn root_layout_drops_analytics() {
        let original = template_fixture("src/routes/__root.tsx");
        assert!(original.contains("<Analytics />"));

        let result = root_layout_remove_analytics(&original);
        assert!(!result.contains("@vercel/analytics"));
        assert!(!result.contains("<Analytics />"));
        assert!(result.contains("<Outlet />"));
    }

    #[test]
    fn features_drops_analytics_card_only() {
        let original = template_fixture("src/routes/(clean-up)/features.tsx");
        assert!(original.contains("BarChart3,"));
        assert!(original.contains("title: \"Vercel Analytics\""));

        let result = features_remove_analytics(&original);
        assert!(!result.contains("BarChart3"));
        assert!(!result.contains("title: \"Vercel Analytics\""));
        assert!(result.contains("title: \"TanStack Start\""));
        assert!(result.contains("title: \"Supabase Auth\""));
    }

    #[test]
    fn manifest_analytics_dependency_removed() {
        let original = template_fixture("package.json");
        let result = manifest_remove_analytics(&original);
        assert_ne!(result, original);
        assert!(!result.contains("\"@vercel/analytics\""));
        parses_as_json(&result);
    }

    #[test]
    fn manifest_cleanup_tooling_removed() {
        let original = template_fixture("package.json");
        assert!(original.contains("\"cleanup\""));
        assert!(original.contains("\"@clack/prompts\""));

        let result = manifest_remove_cleanup(&original);
        assert!(!result.contains("\"cleanup\""));
        assert!(!result.contains("\"@clack/prompts\""));
        parses_as_json(&result);
    }

    #[test]
    fn manifest_transformers_compose_into_valid_json() {
        let original = template_fixture("package.json");
        let result = [
            Transformer::ManifestRemoveVersion,
            Transformer::ManifestRemoveE2e,
            Transformer::ManifestRemoveAnalytics,
            Transformer::ManifestRemoveCleanup,
        ]
        .into_iter()
        .fold(original, |acc, t| t.apply(&acc));
        parses_as_json(&result);
    }

    #[test]
    fn every_transformer_is_idempotent_on_its_file() {
        let cases = [
            (Transformer::FooterRemoveDemoPages, "src/components/Footer.tsx"),
            (Transformer::HeaderRemoveDemoPages, "src/components/Header.tsx"),
            (Transformer::IndexRemoveDemoPages, "src/routes/index.tsx"),
            (Transformer::ManifestRemoveVersion, "package.json"),
            (Transformer::ManifestRemoveE2e, "package.json"),
            (Transformer::VitestConfigRemoveE2e, "vitest.config.ts"),
            (Transformer::CiWorkflowRemoveE2e, ".github/workflows/ci.yml"),
            (Transformer::GitignoreRemoveE2e, ".gitignore"),
            (Transformer::RootLayoutRemoveAnalytics, "src/routes/__root.tsx"),
            (
                Transformer::FeaturesRemoveAnalytics,
                "src/routes/(clean-up)/features.tsx",
            ),
            (Transformer::ManifestRemoveAnalytics, "package.json"),
            (Transformer::ManifestRemoveCleanup, "package.json"),
        ];
        for (transformer, path) in cases {
            let original = template_fixture(path);
            let once = transformer.apply(&original);
            assert_ne!(once, original, "{} changed nothing", transformer.name());
            assert_eq!(
                transformer.apply(&once),
                once,
                "{} is not idempotent",
                transformer.name()
            );
        }
    }

    #[test]
    fn missing_patterns_are_no_ops() {
        let content = "nothing to see here\n";
        for transformer in [
            Transformer::FooterRemoveDemoPages,
            Transformer::ManifestRemoveE2e,
            Transformer::CiWorkflowRemoveE2e,
            Transformer::ManifestRemoveCleanup,
        ] {
            assert_eq!(transformer.apply(content), content);
        }
    }
}
