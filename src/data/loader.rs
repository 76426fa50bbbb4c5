//! Catalog loading
//!
//! The skill catalog lives in a RON file next to the binary so tree data
//! can be edited without recompiling, with the built-in defaults as
//! fallback. Groups derive right after the catalog loads and both are held
//! in a process-wide instance.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use thiserror::Error;

use crate::catalog::{Catalog, SkillTree};
use crate::planner::{GroupIndex, Planner};

use super::defaults::{default_catalog, default_trees};

/// Default location of the editable catalog file.
pub const CATALOG_FILE: &str = "assets/data/catalog.ron";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] ron::Error),
}

/// Load a catalog from a RON file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let trees: Vec<SkillTree> = ron::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Catalog::new(trees))
}

/// Load the catalog file if present, otherwise the built-in defaults.
pub fn load_or_default() -> Catalog {
    let path = Path::new(CATALOG_FILE);
    if path.exists() {
        match load_catalog(path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} skills from {}",
                    catalog.skill_count(),
                    path.display()
                );
                return catalog;
            }
            Err(err) => log::warn!("{err}. Using built-in catalog."),
        }
    }
    default_catalog()
}

/// Write the built-in catalog out as RON for editing.
pub fn export_default_catalog() -> Result<(), CatalogError> {
    let path = Path::new(CATALOG_FILE);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    }

    let trees = default_trees();
    let content = ron::ser::to_string_pretty(&trees, ron::ser::PrettyConfig::default())?;
    fs::write(path, content).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

/// Catalog plus its derived groups, loaded once per process.
pub struct PlannerData {
    pub catalog: Catalog,
    pub groups: GroupIndex,
}

impl PlannerData {
    /// Load the catalog and derive its groups.
    pub fn load() -> Self {
        let catalog = load_or_default();
        let groups = GroupIndex::build(&catalog);
        Self { catalog, groups }
    }

    /// Process-wide instance, loaded on first use.
    pub fn shared() -> &'static PlannerData {
        static SHARED: OnceLock<PlannerData> = OnceLock::new();
        SHARED.get_or_init(PlannerData::load)
    }

    /// Fresh planner over this catalog.
    pub fn planner(&self) -> Planner<'_> {
        Planner::new(&self.catalog, &self.groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TreeId;

    #[test]
    fn test_load_catalog_from_handwritten_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.ron");
        fs::write(
            &path,
            r#"[
    (
        id: FloatFishing,
        skills: [
            (id: 1, name: "Long Casting", unlock_percent: 0, max_points: 7, shared_with: [
                "Spin Fishing - Long Casting",
            ]),
            (id: 2, name: "Thin Lines", unlock_percent: 10, max_points: 5, shared_with: [
                "scribbled note that matches nothing",
            ]),
        ],
    ),
    (
        id: SpinFishing,
        skills: [
            (id: 1, name: "Long Casting", unlock_percent: 0, max_points: 7),
        ],
    ),
]"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.trees().len(), 2);
        assert_eq!(catalog.max_points(TreeId::FloatFishing, 1), 7);

        // The unreadable annotation drops out without failing the load.
        let lines = catalog.skill(TreeId::FloatFishing, 2).unwrap();
        assert!(lines.shared_with.is_empty());

        let groups = GroupIndex::build(&catalog);
        assert_eq!(groups.groups().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(&dir.path().join("nope.ron"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "not ron at all {{{").unwrap();
        let result = load_catalog(&path);
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_export_then_reload_matches_defaults() {
        export_default_catalog().expect("export failed");
        assert!(Path::new(CATALOG_FILE).exists());

        let reloaded = load_catalog(Path::new(CATALOG_FILE)).expect("reload failed");
        let defaults = default_catalog();
        assert_eq!(reloaded.trees().len(), defaults.trees().len());
        assert_eq!(reloaded.skill_count(), defaults.skill_count());
    }

    #[test]
    fn test_shared_instance_is_singleton() {
        let a = PlannerData::shared();
        let b = PlannerData::shared();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.catalog.trees().len(), 8);
    }
}
