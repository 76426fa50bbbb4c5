//! Catalog data
//!
//! Loads the skill catalog from an external RON file, allowing tree data
//! to be edited without recompiling, with compiled-in defaults as fallback.

pub mod defaults;
pub mod loader;

pub use defaults::{default_catalog, default_trees};
pub use loader::{
    export_default_catalog, load_catalog, load_or_default, CatalogError, PlannerData,
    CATALOG_FILE,
};
