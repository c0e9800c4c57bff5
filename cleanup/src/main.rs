//! Interactive cleanup for the starter template.
//!
//! Removes optional features (demo pages, analytics, release automation,
//! e2e tests), optionally renames the project, deletes itself, and then
//! syncs dependencies, rebuilds, and formats the result.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use cleanup::core::rename::ProjectName;
use cleanup::core::types::FeatureSelection;
use cleanup::exit_codes;
use cleanup::io::config::{CONFIG_FILE_NAME, load_config};
use cleanup::io::manifest::read_project_name;
use cleanup::io::prompt::{PromptOutcome, prompt_selection};
use cleanup::io::toolchain::{CommandToolchain, Toolchain};
use cleanup::logging;
use cleanup::plan::CleanupPlan;
use cleanup::run::{CleanupRequest, run_cleanup};

#[derive(Parser)]
#[command(
    name = "cleanup",
    version,
    about = "Remove optional starter-template features and rename the project"
)]
struct Cli {
    /// Project root to clean up.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/cleanup.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not prompt; take every choice from the flags below.
    #[arg(short, long)]
    yes: bool,

    /// New project name (lowercase alphanumeric with hyphens).
    #[arg(long)]
    name: Option<ProjectName>,

    #[arg(long)]
    remove_demo_pages: bool,

    #[arg(long)]
    remove_analytics: bool,

    #[arg(long)]
    remove_releases: bool,

    #[arg(long)]
    remove_e2e: bool,

    /// Do not run the install/build/format steps afterwards.
    #[arg(long)]
    skip_toolchain: bool,
}

impl Cli {
    fn flag_selection(&self) -> FeatureSelection {
        FeatureSelection {
            remove_demo_pages: self.remove_demo_pages,
            remove_analytics: self.remove_analytics,
            remove_releases: self.remove_releases,
            remove_e2e: self.remove_e2e,
            rename_to: self.name.clone(),
        }
    }
}

fn main() {
    logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(exit_codes::FAILED);
        }
    };
    let code = match run(&cli) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("An error occurred.\n{:#}", err);
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<()> {
    let root = cli.root.clone();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    let config = load_config(&config_path)?;
    let plan = CleanupPlan::template();

    let current_name = read_project_name(&root.join(&plan.manifest))
        .context("read current project name (run from the template root)")?;
    debug!(%current_name, "loaded manifest");

    let selection = if cli.yes {
        cli.flag_selection().without_noop_rename(&current_name)
    } else {
        let mut reader = io::stdin().lock();
        let mut writer = io::stdout();
        match prompt_selection(&mut reader, &mut writer, &current_name)? {
            PromptOutcome::Selected(selection) => selection,
            PromptOutcome::Cancelled => {
                println!("\nCancelled.");
                return Ok(());
            }
        }
    };

    if selection.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    let request = CleanupRequest {
        root: &root,
        plan: &plan,
        selection: &selection,
        identity: &config.identity,
    };
    let command_toolchain = CommandToolchain::new(&root, config.toolchain.clone());
    let toolchain: Option<&dyn Toolchain> = if cli.skip_toolchain {
        None
    } else {
        Some(&command_toolchain)
    };

    let report = run_cleanup(&request, toolchain, &mut io::stdout().lock())?;
    println!("{}", report.summary_line());
    Ok(())
}
