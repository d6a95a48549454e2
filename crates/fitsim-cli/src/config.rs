//! Catalog location resolution.
//!
//! The catalog is searched for in the following order:
//! 1. `--catalog` on the command line
//! 2. `FITSIM_CATALOG` environment variable
//! 3. `catalog.json` in the platform data directory
//! 4. Debug fixture path (only in debug builds)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use fitsim_lib::Catalog;

pub const CATALOG_ENV: &str = "FITSIM_CATALOG";
pub const CATALOG_FILENAME: &str = "catalog.json";

/// `catalog.json` inside the platform-specific data directory.
pub fn default_catalog_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "fitsim", "fitsim").map(|dirs| dirs.data_dir().join(CATALOG_FILENAME))
}

/// Candidate catalog locations in priority order, excluding `--catalog`.
pub fn catalog_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(env_path) = std::env::var(CATALOG_ENV) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Some(path) = default_catalog_path() {
        candidates.push(path);
    }

    if cfg!(debug_assertions) {
        let fixture =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/catalog.json");
        candidates.push(fixture);
    }

    candidates
}

/// Pick the catalog path. An explicit path is used even if it does not exist so
/// the load error names it.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    catalog_candidates()
        .into_iter()
        .find(|path| path.exists())
        .ok_or_else(|| {
            anyhow::anyhow!("{CATALOG_FILENAME} not found; pass --catalog or set {CATALOG_ENV}")
        })
}

pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog> {
    let path = resolve_catalog_path(explicit)?;
    debug!(path = %path.display(), "loading catalog");
    Catalog::from_path(&path)
        .with_context(|| format!("failed to load catalog from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_used_verbatim() {
        let path = Path::new("/nonexistent/catalog.json");
        assert_eq!(resolve_catalog_path(Some(path)).expect("explicit"), path);
    }

    #[test]
    fn missing_explicit_catalog_names_the_path() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json")))
            .expect_err("file is missing");
        assert!(format!("{err:#}").contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn debug_builds_fall_back_to_the_fixture() {
        if cfg!(debug_assertions) {
            assert!(catalog_candidates()
                .iter()
                .any(|path| path.ends_with("docs/fixtures/catalog.json")));
        }
    }
}
