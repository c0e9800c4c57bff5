//! Project renaming: identity strings and the content rewrite.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Package name shipped with the template.
pub const TEMPLATE_PACKAGE_NAME: &str = "tanstack-start-supabase-auth";
/// Repository slug shipped with the template.
pub const TEMPLATE_REPO_SLUG: &str = "domgaulton/tanstack-start-supabase-auth-protected-routes";
/// Owner segment substituted for the template's owner when renaming.
pub const PLACEHOLDER_OWNER: &str = "your-username";

/// Identity strings searched for by the rename pass.
///
/// `package_name` is normally a substring of `repo_slug`, which is why the
/// slug is always replaced first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectIdentity {
    pub package_name: String,
    pub repo_slug: String,
    pub placeholder_owner: String,
}

impl Default for ProjectIdentity {
    fn default() -> Self {
        Self {
            package_name: TEMPLATE_PACKAGE_NAME.to_string(),
            repo_slug: TEMPLATE_REPO_SLUG.to_string(),
            placeholder_owner: PLACEHOLDER_OWNER.to_string(),
        }
    }
}

impl ProjectIdentity {
    pub fn validate(&self) -> Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(anyhow!("identity.package_name must not be empty"));
        }
        if self.repo_slug.trim().is_empty() {
            return Err(anyhow!("identity.repo_slug must not be empty"));
        }
        if self.placeholder_owner.trim().is_empty() {
            return Err(anyhow!("identity.placeholder_owner must not be empty"));
        }
        Ok(())
    }
}

/// A validated project name: lowercase alphanumerics, optionally
/// hyphen-separated, starting and ending with an alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = !raw.is_empty()
            && raw
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            && !raw.starts_with('-')
            && !raw.ends_with('-');
        if !valid {
            return Err(anyhow!(
                "must be lowercase alphanumeric with hyphens (e.g. my-app), got '{raw}'"
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rebrand `content`: the slug becomes `<owner>/<new-name>`, then the bare
/// package name becomes `<new-name>`.
///
/// One left-to-right pass; replacement text is never rescanned. At any
/// position the slug wins over the bare name, and an existing occurrence of
/// the new name is kept as is, so names that contain the old package name
/// stay stable across reruns.
pub fn rename_in_content(content: &str, identity: &ProjectIdentity, new_name: &ProjectName) -> String {
    let new_slug = format!("{}/{}", identity.placeholder_owner, new_name);
    let mut rules: Vec<(&str, &str)> = vec![(identity.repo_slug.as_str(), new_slug.as_str())];
    if new_name.as_str() != identity.package_name
        && new_name.as_str().contains(identity.package_name.as_str())
    {
        rules.push((new_name.as_str(), new_name.as_str()));
    }
    rules.push((identity.package_name.as_str(), new_name.as_str()));
    rules.retain(|(needle, _)| !needle.is_empty());

    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    loop {
        let next = rules
            .iter()
            .filter_map(|&(needle, replacement)| rest.find(needle).map(|pos| (pos, needle, replacement)))
            .min_by_key(|&(pos, _, _)| pos);
        let Some((pos, needle, replacement)) = next else {
            break;
        };
        out.push_str(&rest[..pos]);
        out.push_str(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}
