//! Test-only helpers: fixture template trees and a scripted toolchain.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tempfile::TempDir;

use crate::io::toolchain::{Toolchain, ToolchainStep};

/// Root of the miniature template checked in under `tests/fixtures/template`.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/template")
}

/// Read one fixture file by its template-relative path.
pub fn template_fixture(rel: &str) -> String {
    let path = fixture_root().join(rel);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

/// A temporary copy of the fixture template.
pub struct TemplateDir {
    dir: TempDir,
}

impl TemplateDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        copy_tree(&fixture_root(), dir.path())?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.path().join(rel);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    pub fn write(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.path().join(rel);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Every file under the root mapped to its contents.
    pub fn snapshot(&self) -> Result<BTreeMap<PathBuf, String>> {
        let mut files = BTreeMap::new();
        collect_files(self.path(), self.path(), &mut files)?;
        Ok(files)
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("create {}", to.display()))?;
    for entry in fs::read_dir(from).with_context(|| format!("read {}", from.display()))? {
        let entry = entry.context("read entry")?;
        let target = to.join(entry.file_name());
        if entry.file_type().context("file type")?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, String>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry.context("read entry")?;
        let path = entry.path();
        if entry.file_type().context("file type")?.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let rel = path.strip_prefix(root).context("strip prefix")?.to_path_buf();
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            files.insert(rel, contents);
        }
    }
    Ok(())
}

/// Toolchain fake that records each call and optionally fails at one step.
#[derive(Default)]
pub struct RecordingToolchain {
    calls: RefCell<Vec<ToolchainStep>>,
    fail_at: Option<ToolchainStep>,
}

impl RecordingToolchain {
    pub fn failing_at(step: ToolchainStep) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_at: Some(step),
        }
    }

    pub fn calls(&self) -> Vec<ToolchainStep> {
        self.calls.borrow().clone()
    }
}

impl Toolchain for RecordingToolchain {
    fn run(&self, step: ToolchainStep) -> Result<()> {
        self.calls.borrow_mut().push(step);
        if self.fail_at == Some(step) {
            bail!("scripted {step} failure");
        }
        Ok(())
    }
}
