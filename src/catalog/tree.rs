//! Skill trees and the catalog container
//!
//! The eight trees are fixed: their display names feed sharing-annotation
//! resolution, their one-letter codes are the compact build-string wire
//! format, and their slugs key the legacy JSON format.

use serde::{Deserialize, Serialize};

use super::skill::{Skill, SkillId};

/// The eight skill trees, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreeId {
    FloatFishing,
    SpinFishing,
    BottomFishing,
    MarineFishing,
    HarvestingBaits,
    Cooking,
    MakingGroundbait,
    MakingLures,
}

impl TreeId {
    /// All trees in display order.
    pub const ALL: [TreeId; 8] = [
        TreeId::FloatFishing,
        TreeId::SpinFishing,
        TreeId::BottomFishing,
        TreeId::MarineFishing,
        TreeId::HarvestingBaits,
        TreeId::Cooking,
        TreeId::MakingGroundbait,
        TreeId::MakingLures,
    ];

    /// Display name, also the tree identifier used by sharing annotations.
    pub fn name(&self) -> &'static str {
        match self {
            TreeId::FloatFishing => "Float Fishing",
            TreeId::SpinFishing => "Spin Fishing",
            TreeId::BottomFishing => "Bottom Fishing",
            TreeId::MarineFishing => "Marine Fishing",
            TreeId::HarvestingBaits => "Harvesting Baits",
            TreeId::Cooking => "Cooking",
            TreeId::MakingGroundbait => "Making Groundbait",
            TreeId::MakingLures => "Making Lures",
        }
    }

    /// Kebab-case identifier; the tree key of the legacy JSON build format.
    pub fn slug(&self) -> &'static str {
        match self {
            TreeId::FloatFishing => "float-fishing",
            TreeId::SpinFishing => "spin-fishing",
            TreeId::BottomFishing => "bottom-fishing",
            TreeId::MarineFishing => "marine-fishing",
            TreeId::HarvestingBaits => "harvesting-baits",
            TreeId::Cooking => "cooking",
            TreeId::MakingGroundbait => "making-groundbait",
            TreeId::MakingLures => "making-lures",
        }
    }

    /// One-letter code used by the compact build string.
    pub fn short_code(&self) -> char {
        match self {
            TreeId::FloatFishing => 'f',
            TreeId::SpinFishing => 's',
            TreeId::BottomFishing => 'b',
            TreeId::MarineFishing => 'm',
            TreeId::HarvestingBaits => 'h',
            TreeId::Cooking => 'c',
            TreeId::MakingGroundbait => 'g',
            TreeId::MakingLures => 'l',
        }
    }

    /// Reverse of [`TreeId::short_code`]. Only the eight fixed letters map back.
    pub fn from_short_code(code: char) -> Option<TreeId> {
        match code {
            'f' => Some(TreeId::FloatFishing),
            's' => Some(TreeId::SpinFishing),
            'b' => Some(TreeId::BottomFishing),
            'm' => Some(TreeId::MarineFishing),
            'h' => Some(TreeId::HarvestingBaits),
            'c' => Some(TreeId::Cooking),
            'g' => Some(TreeId::MakingGroundbait),
            'l' => Some(TreeId::MakingLures),
            _ => None,
        }
    }

    /// Look up a tree by display name, case-insensitively.
    ///
    /// This is the hand-maintained name table sharing annotations resolve
    /// against.
    pub fn from_name(name: &str) -> Option<TreeId> {
        let name = name.trim();
        TreeId::ALL
            .iter()
            .copied()
            .find(|tree| tree.name().eq_ignore_ascii_case(name))
    }

    /// Reverse of [`TreeId::slug`].
    pub fn from_slug(slug: &str) -> Option<TreeId> {
        TreeId::ALL.iter().copied().find(|tree| tree.slug() == slug)
    }
}

/// One skill tree: an id plus its ordered skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTree {
    pub id: TreeId,
    pub skills: Vec<Skill>,
}

/// The full skill catalog: every tree, in display order.
///
/// Read-only once constructed. The resolver and planner only look things up
/// here; nothing mutates a catalog at runtime.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    trees: Vec<SkillTree>,
}

impl Catalog {
    pub fn new(trees: Vec<SkillTree>) -> Self {
        for tree in &trees {
            for (i, skill) in tree.skills.iter().enumerate() {
                if tree.skills[..i].iter().any(|other| other.id == skill.id) {
                    log::warn!(
                        "Catalog: duplicate skill id {} in {}",
                        skill.id,
                        tree.id.name()
                    );
                }
            }
        }
        Self { trees }
    }

    /// All trees in catalog order.
    pub fn trees(&self) -> &[SkillTree] {
        &self.trees
    }

    /// Find a tree by id.
    pub fn tree(&self, id: TreeId) -> Option<&SkillTree> {
        self.trees.iter().find(|tree| tree.id == id)
    }

    /// Find a skill by its composite key.
    pub fn skill(&self, tree: TreeId, skill: SkillId) -> Option<&Skill> {
        self.tree(tree)?.skills.iter().find(|s| s.id == skill)
    }

    /// Point cap for a skill; 0 when the skill is unknown or passive.
    pub fn max_points(&self, tree: TreeId, skill: SkillId) -> u32 {
        self.skill(tree, skill).map(|s| s.max_points).unwrap_or(0)
    }

    /// Total number of skills across all trees.
    pub fn skill_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.skills.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_round_trip() {
        for tree in TreeId::ALL {
            assert_eq!(TreeId::from_short_code(tree.short_code()), Some(tree));
        }
        assert_eq!(TreeId::from_short_code('x'), None);
        assert_eq!(TreeId::from_short_code('F'), None); // table is lowercase
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(TreeId::from_name("Float Fishing"), Some(TreeId::FloatFishing));
        assert_eq!(TreeId::from_name("marine fishing"), Some(TreeId::MarineFishing));
        assert_eq!(TreeId::from_name("  COOKING "), Some(TreeId::Cooking));
        assert_eq!(TreeId::from_name("Ice Fishing"), None);
    }

    #[test]
    fn test_slug_round_trip() {
        for tree in TreeId::ALL {
            assert_eq!(TreeId::from_slug(tree.slug()), Some(tree));
        }
        assert_eq!(TreeId::from_slug("float_fishing"), None);
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog::new(vec![SkillTree {
            id: TreeId::Cooking,
            skills: vec![Skill::new(1, "Fish Soup", 0, 3)],
        }]);

        assert!(catalog.tree(TreeId::Cooking).is_some());
        assert!(catalog.tree(TreeId::MakingLures).is_none());
        assert_eq!(catalog.skill(TreeId::Cooking, 1).unwrap().name, "Fish Soup");
        assert_eq!(catalog.max_points(TreeId::Cooking, 1), 3);
        assert_eq!(catalog.max_points(TreeId::Cooking, 99), 0); // unknown
        assert_eq!(catalog.skill_count(), 1);
    }
}
