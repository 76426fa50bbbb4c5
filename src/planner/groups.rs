//! Shared-group resolution
//!
//! Skills can be linked so their invested points always move together:
//! explicitly by cross-tree references, or implicitly by same-tree category
//! tags. Groups are derived from the catalog once and never change for the
//! lifetime of the session.

use std::collections::HashMap;

use crate::catalog::{Catalog, CategoryTag, SharingRule, SkillId, TreeId};

/// Composite key of a skill in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillRef {
    pub tree: TreeId,
    pub skill: SkillId,
}

impl SkillRef {
    pub fn new(tree: TreeId, skill: SkillId) -> Self {
        Self { tree, skill }
    }
}

/// A set of skills whose invested points move together.
///
/// Members are sorted and unique; a group always has at least two members
/// (a smaller group would be indistinguishable from an unshared skill).
#[derive(Debug, Clone)]
pub struct SharedGroup {
    members: Vec<SkillRef>,
}

impl SharedGroup {
    pub fn members(&self) -> &[SkillRef] {
        &self.members
    }

    pub fn contains(&self, skill: SkillRef) -> bool {
        self.members.binary_search(&skill).is_ok()
    }
}

/// Lookup structure over all shared groups of one catalog.
///
/// Built once right after the catalog loads; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<SharedGroup>,
    by_skill: HashMap<SkillRef, usize>,
}

impl GroupIndex {
    /// Derive all shared groups from the catalog.
    ///
    /// Cross-tree references resolve through the fixed tree-name table and
    /// case-insensitive skill-name matching; annotations that point nowhere
    /// are dropped. References count in both directions, so a
    /// one-directional annotation still links the full class. Category tags
    /// group per `(tree, tag)`. A skill belongs to at most one group, with
    /// cross-tree grouping taking precedence.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = GroupIndex::default();

        // Resolve every cross-tree annotation once, into an undirected
        // adjacency list. Dangling references drop out here.
        let mut adjacent: HashMap<SkillRef, Vec<SkillRef>> = HashMap::new();
        for tree in catalog.trees() {
            for skill in &tree.skills {
                let from = SkillRef::new(tree.id, skill.id);
                for rule in &skill.shared_with {
                    let SharingRule::CrossTree { tree: tree_name, skill: skill_name } = rule
                    else {
                        continue;
                    };
                    match resolve_ref(catalog, tree_name, skill_name) {
                        Some(to) if to != from => {
                            adjacent.entry(from).or_default().push(to);
                            adjacent.entry(to).or_default().push(from);
                        }
                        Some(_) => {} // self-reference, nothing to link
                        None => log::debug!(
                            "Ignoring unresolved shared-with ref '{} - {}' on {} / {}",
                            tree_name,
                            skill_name,
                            tree.id.name(),
                            skill.name
                        ),
                    }
                }
            }
        }

        // Cross-tree groups: connected components, seeded in catalog order.
        for tree in catalog.trees() {
            for skill in &tree.skills {
                let seed = SkillRef::new(tree.id, skill.id);
                if index.by_skill.contains_key(&seed) || !adjacent.contains_key(&seed) {
                    continue;
                }

                let mut members = vec![seed];
                let mut cursor = 0;
                while cursor < members.len() {
                    let current = members[cursor];
                    cursor += 1;
                    if let Some(links) = adjacent.get(&current) {
                        for &linked in links {
                            if !members.contains(&linked) {
                                members.push(linked);
                            }
                        }
                    }
                }

                index.push_group(members);
            }
        }

        // Same-tree category groups, from whatever the cross-tree pass left
        // ungrouped. Passive skills (cap 0) never join these.
        for tree in catalog.trees() {
            for tag in CategoryTag::ALL {
                let members: Vec<SkillRef> = tree
                    .skills
                    .iter()
                    .filter(|skill| skill.max_points > 0)
                    .filter(|skill| {
                        skill
                            .shared_with
                            .iter()
                            .any(|rule| *rule == SharingRule::Category(tag))
                    })
                    .map(|skill| SkillRef::new(tree.id, skill.id))
                    .filter(|skill| !index.by_skill.contains_key(skill))
                    .collect();
                index.push_group(members);
            }
        }

        log::info!(
            "Derived {} shared groups across {} skills",
            index.groups.len(),
            catalog.skill_count()
        );
        index
    }

    /// All groups, in derivation order.
    pub fn groups(&self) -> &[SharedGroup] {
        &self.groups
    }

    /// The group containing `skill`, if it is shared.
    pub fn group_of(&self, skill: SkillRef) -> Option<&SharedGroup> {
        self.by_skill.get(&skill).map(|&i| &self.groups[i])
    }

    pub fn is_shared(&self, skill: SkillRef) -> bool {
        self.by_skill.contains_key(&skill)
    }

    /// The other members linked with `skill`, for display.
    pub fn linked(&self, skill: SkillRef) -> Vec<SkillRef> {
        self.group_of(skill)
            .map(|group| {
                group
                    .members()
                    .iter()
                    .copied()
                    .filter(|member| *member != skill)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Record a group, skipping sets too small to matter.
    fn push_group(&mut self, mut members: Vec<SkillRef>) {
        if members.len() < 2 {
            return;
        }
        members.sort();
        members.dedup();
        let slot = self.groups.len();
        for &member in &members {
            self.by_skill.insert(member, slot);
        }
        self.groups.push(SharedGroup { members });
    }
}

/// Resolve one `"<Tree Name> - <Skill Name>"` reference against the catalog.
fn resolve_ref(catalog: &Catalog, tree_name: &str, skill_name: &str) -> Option<SkillRef> {
    let tree_id = TreeId::from_name(tree_name)?;
    let tree = catalog.tree(tree_id)?;
    let skill_name = skill_name.trim();
    let skill = tree
        .skills
        .iter()
        .find(|skill| skill.name.eq_ignore_ascii_case(skill_name))?;
    Some(SkillRef::new(tree_id, skill.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Skill, SkillTree};

    fn tree(id: TreeId, skills: Vec<Skill>) -> SkillTree {
        SkillTree { id, skills }
    }

    #[test]
    fn test_one_directional_ref_links_both_ways() {
        // Only the float skill carries the annotation.
        let catalog = Catalog::new(vec![
            tree(
                TreeId::FloatFishing,
                vec![Skill::new(7, "Sbirolino Tackle", 40, 5)
                    .shared(SharingRule::cross("Spin Fishing", "Sbirolino Tackle"))],
            ),
            tree(
                TreeId::SpinFishing,
                vec![Skill::new(5, "Sbirolino Tackle", 35, 5)],
            ),
        ]);

        let groups = GroupIndex::build(&catalog);
        assert_eq!(groups.groups().len(), 1);

        let float_ref = SkillRef::new(TreeId::FloatFishing, 7);
        let spin_ref = SkillRef::new(TreeId::SpinFishing, 5);
        assert_eq!(groups.group_of(float_ref).unwrap().members(), &[float_ref, spin_ref]);
        assert!(groups.is_shared(spin_ref)); // reverse direction
        assert_eq!(groups.linked(spin_ref), vec![float_ref]);
    }

    #[test]
    fn test_transitive_closure_spans_three_trees() {
        // f -> s and b -> f close into one three-member group.
        let catalog = Catalog::new(vec![
            tree(
                TreeId::FloatFishing,
                vec![Skill::new(2, "Long Casting", 10, 7)
                    .shared(SharingRule::cross("Spin Fishing", "Long Casting"))],
            ),
            tree(
                TreeId::SpinFishing,
                vec![Skill::new(2, "Long Casting", 10, 7)],
            ),
            tree(
                TreeId::BottomFishing,
                vec![Skill::new(2, "Long Casting", 10, 7)
                    .shared(SharingRule::cross("Float Fishing", "Long Casting"))],
            ),
        ]);

        let groups = GroupIndex::build(&catalog);
        assert_eq!(groups.groups().len(), 1);
        assert_eq!(groups.groups()[0].members().len(), 3);
    }

    #[test]
    fn test_dangling_refs_leave_no_group() {
        let catalog = Catalog::new(vec![tree(
            TreeId::Cooking,
            vec![
                Skill::new(1, "Fish Soup", 0, 3)
                    .shared(SharingRule::cross("Ice Fishing", "Fish Soup"))
                    .shared(SharingRule::cross("Cooking", "No Such Skill")),
            ],
        )]);

        let groups = GroupIndex::build(&catalog);
        assert!(groups.groups().is_empty());
        assert!(!groups.is_shared(SkillRef::new(TreeId::Cooking, 1)));
    }

    #[test]
    fn test_skill_name_match_is_case_insensitive() {
        let catalog = Catalog::new(vec![
            tree(
                TreeId::FloatFishing,
                vec![Skill::new(1, "Bolognese Tackle", 0, 5)
                    .shared(SharingRule::cross("spin fishing", "JIG FISHING"))],
            ),
            tree(TreeId::SpinFishing, vec![Skill::new(1, "Jig Fishing", 0, 5)]),
        ]);

        let groups = GroupIndex::build(&catalog);
        assert_eq!(groups.groups().len(), 1);
    }

    #[test]
    fn test_category_groups_per_tree_and_tag() {
        let catalog = Catalog::new(vec![tree(
            TreeId::HarvestingBaits,
            vec![
                Skill::new(1, "Digging with Shovel", 0, 3)
                    .shared(SharingRule::Category(CategoryTag::DiggingTools)),
                Skill::new(2, "Digging with Pitchfork", 15, 3)
                    .shared(SharingRule::Category(CategoryTag::DiggingTools)),
                Skill::new(3, "Scooping with Landing Net", 20, 3)
                    .shared(SharingRule::Category(CategoryTag::ScoopingTools)),
                Skill::new(4, "Fine-Mesh Scoop", 45, 3)
                    .shared(SharingRule::Category(CategoryTag::ScoopingTools)),
                // Passive marker: tagged but cap 0, stays out.
                Skill::new(5, "Bait Grounds", 60, 0)
                    .shared(SharingRule::Category(CategoryTag::DiggingTools)),
            ],
        )]);

        let groups = GroupIndex::build(&catalog);
        assert_eq!(groups.groups().len(), 2);

        let shovel = SkillRef::new(TreeId::HarvestingBaits, 1);
        let net = SkillRef::new(TreeId::HarvestingBaits, 3);
        assert_eq!(groups.group_of(shovel).unwrap().members().len(), 2);
        assert!(!groups.group_of(shovel).unwrap().contains(net));
        assert!(!groups.is_shared(SkillRef::new(TreeId::HarvestingBaits, 5)));
    }

    #[test]
    fn test_lone_category_tag_is_unshared() {
        let catalog = Catalog::new(vec![tree(
            TreeId::MakingLures,
            vec![Skill::new(1, "Spoon Making", 0, 5)
                .shared(SharingRule::Category(CategoryTag::MetalLures))],
        )]);

        let groups = GroupIndex::build(&catalog);
        assert!(groups.groups().is_empty());
    }

    #[test]
    fn test_cross_tree_takes_precedence_over_category() {
        let catalog = Catalog::new(vec![
            tree(
                TreeId::MakingLures,
                vec![
                    Skill::new(1, "Spoon Making", 0, 5)
                        .shared(SharingRule::cross("Spin Fishing", "Jig Fishing"))
                        .shared(SharingRule::Category(CategoryTag::MetalLures)),
                    Skill::new(2, "Spinner Assembly", 10, 5)
                        .shared(SharingRule::Category(CategoryTag::MetalLures)),
                    Skill::new(3, "Blade Stamping", 25, 5)
                        .shared(SharingRule::Category(CategoryTag::MetalLures)),
                ],
            ),
            tree(TreeId::SpinFishing, vec![Skill::new(1, "Jig Fishing", 0, 5)]),
        ]);

        let groups = GroupIndex::build(&catalog);
        let spoon = SkillRef::new(TreeId::MakingLures, 1);

        // Spoon Making went to the cross-tree group; the category group
        // forms from the two remaining metal-lure skills.
        assert_eq!(groups.groups().len(), 2);
        assert!(groups.group_of(spoon).unwrap().contains(SkillRef::new(TreeId::SpinFishing, 1)));
        let spinner = SkillRef::new(TreeId::MakingLures, 2);
        assert_eq!(groups.group_of(spinner).unwrap().members().len(), 2);
        assert!(!groups.group_of(spinner).unwrap().contains(spoon));
    }
}
