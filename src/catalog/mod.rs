//! Skill catalog data model
//!
//! The catalog is read-only input data: eight fixed trees, each an ordered
//! list of skills with point caps and sharing annotations. Content comes
//! from `assets/data/catalog.ron` or the built-in defaults (see
//! [`crate::data`]).

pub mod skill;
pub mod tree;

pub use skill::{CategoryTag, SharingRule, Skill, SkillId};
pub use tree::{Catalog, SkillTree, TreeId};
