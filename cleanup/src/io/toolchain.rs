//! External toolchain steps run after the sources are pruned.
//!
//! The engine only needs "run, wait, fail on non-zero"; the [`Toolchain`]
//! trait is the seam tests use to avoid spawning real processes.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use super::config::ToolchainConfig;
use super::process::run_command;

const STDERR_TAIL_BYTES: usize = 2_000;

/// One external step, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainStep {
    Install,
    Build,
    Format,
}

impl ToolchainStep {
    pub const ALL: [ToolchainStep; 3] = [
        ToolchainStep::Install,
        ToolchainStep::Build,
        ToolchainStep::Format,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolchainStep::Install => "install",
            ToolchainStep::Build => "build",
            ToolchainStep::Format => "format",
        }
    }

    /// Progress line shown to the operator while the step runs.
    pub fn progress(self) -> &'static str {
        match self {
            ToolchainStep::Install => "Syncing dependencies...",
            ToolchainStep::Build => "Regenerating route tree and building...",
            ToolchainStep::Format => "Formatting code...",
        }
    }
}

impl fmt::Display for ToolchainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Toolchain {
    fn run(&self, step: ToolchainStep) -> Result<()>;
}

/// Runs the configured argv for each step inside the project root.
pub struct CommandToolchain {
    workdir: PathBuf,
    config: ToolchainConfig,
}

impl CommandToolchain {
    pub fn new(workdir: impl Into<PathBuf>, config: ToolchainConfig) -> Self {
        Self {
            workdir: workdir.into(),
            config,
        }
    }

    fn argv(&self, step: ToolchainStep) -> &[String] {
        match step {
            ToolchainStep::Install => &self.config.install,
            ToolchainStep::Build => &self.config.build,
            ToolchainStep::Format => &self.config.format,
        }
    }
}

impl Toolchain for CommandToolchain {
    fn run(&self, step: ToolchainStep) -> Result<()> {
        let argv = self.argv(step);
        let Some((program, args)) = argv.split_first() else {
            bail!("toolchain.{step} has no command");
        };
        debug!(%step, command = %argv.join(" "), "running toolchain step");

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.workdir);
        let timeout = self.config.timeout_secs.map(Duration::from_secs);
        let output = run_command(cmd, timeout, self.config.output_limit_bytes)
            .with_context(|| format!("run {step} step `{}`", argv.join(" ")))?;

        if output.success() {
            info!(%step, "toolchain step succeeded");
            return Ok(());
        }
        if output.timed_out {
            bail!(
                "{step} step `{}` timed out after {}s",
                argv.join(" "),
                self.config.timeout_secs.unwrap_or_default()
            );
        }
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        bail!(
            "{step} step `{}` failed (exit {code}):\n{}",
            argv.join(" "),
            output.stderr_tail(STDERR_TAIL_BYTES)
        )
    }
}
