//! Build state and the point-investment rules.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, TreeId};

use super::groups::{GroupIndex, SkillRef};
use super::{codec, progress, share};

/// Points invested per skill. Entries exist only while non-zero, so an
/// empty map is the same state as all-zeroes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    points: BTreeMap<SkillRef, u32>,
}

impl Allocation {
    pub fn get(&self, skill: SkillRef) -> u32 {
        self.points.get(&skill).copied().unwrap_or(0)
    }

    /// Store `value`, dropping the entry when it reaches zero.
    pub fn set(&mut self, skill: SkillRef, value: u32) {
        if value == 0 {
            self.points.remove(&skill);
        } else {
            self.points.insert(skill, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillRef, u32)> + '_ {
        self.points.iter().map(|(&skill, &value)| (skill, value))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// One build in progress, bound to the catalog it plans against.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    groups: &'a GroupIndex,
    points: Allocation,
    collections: u8,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a Catalog, groups: &'a GroupIndex) -> Self {
        Self {
            catalog,
            groups,
            points: Allocation::default(),
            collections: 0,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn points(&self) -> &Allocation {
        &self.points
    }

    pub fn get(&self, skill: SkillRef) -> u32 {
        self.points.get(skill)
    }

    /// Put one point into `skill`.
    ///
    /// A shared skill pulls its whole group up with it, each member stopping
    /// at its own cap. Nothing happens when `skill` itself is already
    /// capped, even if other members still lag behind. Returns whether the
    /// allocation changed.
    pub fn invest(&mut self, skill: SkillRef) -> bool {
        let max = self.catalog.max_points(skill.tree, skill.skill);
        let current = self.points.get(skill);
        if current >= max {
            return false;
        }
        match self.groups.group_of(skill) {
            None => self.points.set(skill, current + 1),
            Some(group) => {
                for &member in group.members() {
                    let cap = self.catalog.max_points(member.tree, member.skill);
                    let have = self.points.get(member);
                    if have < cap {
                        self.points.set(member, have + 1);
                    }
                }
            }
        }
        true
    }

    /// Take one point out of `skill`.
    ///
    /// A shared skill pulls its whole group down with it; members already at
    /// zero stay there. Nothing happens when `skill` itself is at zero.
    /// Returns whether the allocation changed.
    pub fn remove(&mut self, skill: SkillRef) -> bool {
        let current = self.points.get(skill);
        if current == 0 {
            return false;
        }
        match self.groups.group_of(skill) {
            None => self.points.set(skill, current - 1),
            Some(group) => {
                for &member in group.members() {
                    let have = self.points.get(member);
                    if have > 0 {
                        self.points.set(member, have - 1);
                    }
                }
            }
        }
        true
    }

    /// Clear all invested points and the collections offset.
    pub fn reset(&mut self) {
        self.points.clear();
        self.collections = 0;
    }

    pub fn collections(&self) -> u8 {
        self.collections
    }

    /// Completed-collections count used by the level estimate, kept in 0..=99.
    pub fn set_collections(&mut self, collections: u8) {
        self.collections = collections.min(99);
    }

    /// Whether `skill` moves together with others.
    pub fn is_shared(&self, skill: SkillRef) -> bool {
        self.groups.is_shared(skill)
    }

    /// The other members linked with `skill`, for display.
    pub fn linked(&self, skill: SkillRef) -> Vec<SkillRef> {
        self.groups.linked(skill)
    }

    /// Total invested points with shared groups counted once.
    pub fn total_points(&self) -> u32 {
        progress::total_invested(&self.points, self.groups)
    }

    /// Angler level required to hold the current build.
    pub fn required_level(&self) -> u32 {
        progress::required_level(self.total_points(), self.collections)
    }

    /// Share of one tree's investable skills at their cap, in percent.
    pub fn tree_progress(&self, tree: TreeId) -> f32 {
        progress::tree_progress(self.catalog, &self.points, tree)
    }

    /// Raw point sum inside one tree, without group deduplication.
    pub fn tree_points(&self, tree: TreeId) -> u32 {
        progress::tree_points(&self.points, tree)
    }

    /// Compact build string for the current allocation.
    pub fn build_string(&self) -> String {
        codec::encode(self.catalog, &self.points)
    }

    /// Full share query, build string plus collections.
    pub fn share_query(&self) -> String {
        share::to_query(self.catalog, &self.points, self.collections)
    }

    /// Replace the current state with whatever `query` describes.
    pub fn load_query(&mut self, query: &str) {
        let (points, collections) = share::from_query(self.catalog, query);
        self.points = points;
        self.collections = collections;
    }
}
