//! Reads the project manifest (`package.json`).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name used when the manifest has no `name` field.
pub const FALLBACK_NAME: &str = "my-app";

#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
}

/// Current project name from the manifest at `path`.
pub fn read_project_name(path: &Path) -> Result<String> {
    let contents = super::files::read_text(path)?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("parse manifest {}", path.display()))?;
    Ok(manifest.name.unwrap_or_else(|| FALLBACK_NAME.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_field() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("package.json");
        std::fs::write(&path, r#"{ "name": "acme", "private": true }"#).expect("write");
        assert_eq!(read_project_name(&path).expect("name"), "acme");
    }

    #[test]
    fn missing_name_falls_back() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("package.json");
        std::fs::write(&path, "{}").expect("write");
        assert_eq!(read_project_name(&path).expect("name"), FALLBACK_NAME);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("package.json");
        std::fs::write(&path, "{ nope").expect("write");
        let err = read_project_name(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse manifest"));
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(read_project_name(&temp.path().join("package.json")).is_err());
    }
}
