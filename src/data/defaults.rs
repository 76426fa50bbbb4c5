//! Built-in skill catalog
//!
//! The full tree set ships compiled in, so the planner starts even when no
//! catalog file sits next to the binary. Sharing annotations here are the
//! live data the group resolver works from.

use crate::catalog::{Catalog, CategoryTag, SharingRule, Skill, SkillTree, TreeId};

/// The complete built-in catalog.
pub fn default_catalog() -> Catalog {
    Catalog::new(default_trees())
}

/// All eight trees in display order.
pub fn default_trees() -> Vec<SkillTree> {
    vec![
        float_fishing(),
        spin_fishing(),
        bottom_fishing(),
        marine_fishing(),
        harvesting_baits(),
        cooking(),
        making_groundbait(),
        making_lures(),
    ]
}

fn float_fishing() -> SkillTree {
    SkillTree {
        id: TreeId::FloatFishing,
        skills: vec![
            Skill::new(1, "Long Casting", 0, 7)
                .shared(SharingRule::cross("Spin Fishing", "Long Casting"))
                .shared(SharingRule::cross("Bottom Fishing", "Long Casting")),
            Skill::new(2, "Thin Lines", 10, 5),
            Skill::new(3, "Light Floats", 20, 5),
            Skill::new(4, "Match Rods", 30, 6),
            Skill::new(5, "Hook Baits", 40, 4),
            Skill::new(6, "Fish Handling", 55, 5),
            Skill::new(7, "Sbirolino Tackle", 70, 5)
                .shared(SharingRule::cross("Spin Fishing", "Sbirolino Tackle")),
            // Passive: unlocks map hints, takes no points.
            Skill::new(8, "Grounds Knowledge", 85, 0),
        ],
    }
}

fn spin_fishing() -> SkillTree {
    SkillTree {
        id: TreeId::SpinFishing,
        skills: vec![
            Skill::new(1, "Jig Fishing", 0, 6),
            Skill::new(2, "Long Casting", 5, 7)
                .shared(SharingRule::cross("Float Fishing", "Long Casting")),
            Skill::new(3, "Retrieve Control", 15, 5),
            Skill::new(4, "Light Spinning", 30, 5),
            // Linked from Float Fishing; carries no annotation itself.
            Skill::new(5, "Sbirolino Tackle", 45, 5),
            Skill::new(6, "Big-Fish Fighting", 60, 6),
            Skill::new(7, "Wobbler Tuning", 75, 4),
        ],
    }
}

fn bottom_fishing() -> SkillTree {
    SkillTree {
        id: TreeId::BottomFishing,
        skills: vec![
            Skill::new(1, "Feeder Rods", 0, 6),
            // Linked from the other casting skills; no annotation itself.
            Skill::new(2, "Long Casting", 10, 7),
            Skill::new(3, "Classic Groundbaiting", 25, 5)
                .shared(SharingRule::cross("Making Groundbait", "Classic Groundbaiting")),
            Skill::new(4, "Night Fishing", 40, 5),
            Skill::new(5, "Heavy Sinkers", 55, 4),
            Skill::new(6, "Carp Rigs", 70, 6),
        ],
    }
}

fn marine_fishing() -> SkillTree {
    SkillTree {
        id: TreeId::MarineFishing,
        skills: vec![
            Skill::new(1, "Sea Rods", 0, 6),
            Skill::new(2, "Trolling", 20, 6),
            Skill::new(3, "Deep-Sea Rigs", 40, 5),
            // Passive: weather and tide hints.
            Skill::new(4, "Tide Reading", 60, 0),
            Skill::new(5, "Chumming", 75, 5),
        ],
    }
}

fn harvesting_baits() -> SkillTree {
    SkillTree {
        id: TreeId::HarvestingBaits,
        skills: vec![
            Skill::new(1, "Digging with Shovel", 0, 3)
                .shared(SharingRule::Category(CategoryTag::DiggingTools)),
            Skill::new(2, "Digging with Pitchfork", 15, 3)
                .shared(SharingRule::Category(CategoryTag::DiggingTools)),
            Skill::new(3, "Scooping with Landing Net", 30, 3)
                .shared(SharingRule::Category(CategoryTag::ScoopingTools)),
            Skill::new(4, "Fine-Mesh Scooping", 45, 3)
                .shared(SharingRule::Category(CategoryTag::ScoopingTools)),
            Skill::new(5, "Bark Stripping", 60, 4),
            Skill::new(6, "Night Harvesting", 75, 3),
        ],
    }
}

fn cooking() -> SkillTree {
    SkillTree {
        id: TreeId::Cooking,
        skills: vec![
            Skill::new(1, "Fish Soups", 0, 5),
            Skill::new(2, "Grinding", 10, 4)
                .shared(SharingRule::cross("Making Groundbait", "Grinding")),
            Skill::new(3, "Smoking", 30, 5),
            Skill::new(4, "Field Kitchen", 50, 4),
            Skill::new(5, "Herbs and Spices", 70, 4),
        ],
    }
}

fn making_groundbait() -> SkillTree {
    SkillTree {
        id: TreeId::MakingGroundbait,
        skills: vec![
            // Linked from Bottom Fishing; no annotation itself.
            Skill::new(1, "Classic Groundbaiting", 0, 5),
            // Linked from Cooking; no annotation itself.
            Skill::new(2, "Grinding", 20, 4),
            Skill::new(3, "Aroma Blending", 40, 4),
            Skill::new(4, "Pellet Pressing", 60, 5),
        ],
    }
}

fn making_lures() -> SkillTree {
    SkillTree {
        id: TreeId::MakingLures,
        skills: vec![
            Skill::new(1, "Spoon Making", 0, 4)
                .shared(SharingRule::Category(CategoryTag::MetalLures)),
            Skill::new(2, "Spinner Assembly", 20, 4)
                .shared(SharingRule::Category(CategoryTag::MetalLures)),
            Skill::new(3, "Wooden Wobblers", 40, 4)
                .shared(SharingRule::Category(CategoryTag::WoodenLures)),
            Skill::new(4, "Popper Carving", 60, 4)
                .shared(SharingRule::Category(CategoryTag::WoodenLures)),
            Skill::new(5, "Silicone Molds", 75, 5),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::GroupIndex;

    #[test]
    fn test_default_catalog_covers_all_trees() {
        let catalog = default_catalog();
        assert_eq!(catalog.trees().len(), TreeId::ALL.len());
        for tree in catalog.trees() {
            assert!(!tree.skills.is_empty(), "{} has no skills", tree.id.name());
        }
    }

    #[test]
    fn test_default_skill_ids_unique_per_tree() {
        for tree in default_trees() {
            let mut ids: Vec<_> = tree.skills.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), tree.skills.len(), "duplicate id in {}", tree.id.name());
        }
    }

    #[test]
    fn test_default_sharing_annotations_all_resolve() {
        let catalog = default_catalog();
        let groups = GroupIndex::build(&catalog);

        // 4 cross-tree groups plus 4 category pairs.
        assert_eq!(groups.groups().len(), 8);

        // The casting group spans three trees even though only two of its
        // members carry annotations.
        let casting = groups
            .group_of(crate::planner::SkillRef::new(TreeId::BottomFishing, 2))
            .expect("Long Casting should be shared");
        assert_eq!(casting.members().len(), 3);
    }
}
