//! Optional cleanup configuration stored in `cleanup.toml` at the project root.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::rename::ProjectIdentity;

/// Default file name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "cleanup.toml";

/// Cleanup configuration (TOML).
///
/// Every field is optional in the file; missing fields take the template's
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CleanupConfig {
    pub identity: ProjectIdentity,
    pub toolchain: ToolchainConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Dependency sync (e.g. `["npm","install"]`).
    pub install: Vec<String>,

    /// Full build; regenerates the route tree as a side effect.
    pub build: Vec<String>,

    /// Formatter pass over the pruned sources.
    pub format: Vec<String>,

    /// Per-command wall-clock limit. Unset waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Keep at most this many bytes of each command's stdout/stderr.
    pub output_limit_bytes: usize,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            install: vec!["npm".to_string(), "install".to_string()],
            build: vec!["npm".to_string(), "run".to_string(), "build".to_string()],
            format: vec![
                "npx".to_string(),
                "biome".to_string(),
                "check".to_string(),
                "--write".to_string(),
            ],
            timeout_secs: None,
            output_limit_bytes: 100_000,
        }
    }
}

impl ToolchainConfig {
    pub fn validate(&self) -> Result<()> {
        for (label, argv) in [
            ("install", &self.install),
            ("build", &self.build),
            ("format", &self.format),
        ] {
            if argv.is_empty() || argv[0].trim().is_empty() {
                return Err(anyhow!("toolchain.{label} must be a non-empty array"));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("toolchain.timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("toolchain.output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

impl CleanupConfig {
    pub fn validate(&self) -> Result<()> {
        self.identity.validate()?;
        self.toolchain.validate()
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CleanupConfig::default()`.
pub fn load_config(path: &Path) -> Result<CleanupConfig> {
    if !path.exists() {
        let cfg = CleanupConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CleanupConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
