//! Reelbuild - a terminal skill-build planner for anglers
//!
//! Plan point investments across the eight fishing skill trees,
//! share builds as compact URL strings, and keep a library of favourites.

pub mod catalog;
pub mod data;
pub mod planner;
pub mod save;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, Skill, SkillId, SkillTree, TreeId};
pub use planner::{Allocation, GroupIndex, Planner, SkillRef};
