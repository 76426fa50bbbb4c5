//! Skill-point planning engine

pub mod codec;
pub mod groups;
pub mod progress;
pub mod share;
pub mod state;

pub use groups::{GroupIndex, SharedGroup, SkillRef};
pub use progress::{required_level, total_invested, tree_points, tree_progress};
pub use state::{Allocation, Planner};
