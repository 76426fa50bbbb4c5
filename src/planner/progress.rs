//! Derived build numbers
//!
//! Level requirement, point totals and tree completion are pure functions of
//! an allocation, so the UI recomputes them every frame instead of caching.

use crate::catalog::{Catalog, TreeId};

use super::groups::{GroupIndex, SkillRef};
use super::state::Allocation;

/// Angler level required to hold a build of `total_points`.
///
/// Completed collections each stand in for one point before the curve
/// applies. The curve itself is staged: the first 19 points cost a level
/// each, then every 2nd, every 3rd and finally every 4th point does.
pub fn required_level(total_points: u32, collections: u8) -> u32 {
    let effective = total_points.saturating_sub(u32::from(collections));
    match effective {
        0..=19 => effective + 1,
        20..=39 => 20 + (effective - 19) / 2,
        40..=69 => 30 + (effective - 39) / 3,
        _ => 40 + (effective - 69) / 4,
    }
}

/// Total invested points, with every shared group counted once.
///
/// Group members mirror each other, so summing them naively would charge
/// the same investment several times over.
pub fn total_invested(points: &Allocation, groups: &GroupIndex) -> u32 {
    let mut total: u32 = points
        .iter()
        .filter(|(skill, _)| !groups.is_shared(*skill))
        .map(|(_, value)| value)
        .sum();

    for group in groups.groups() {
        total += group
            .members()
            .iter()
            .map(|&member| points.get(member))
            .max()
            .unwrap_or(0);
    }
    total
}

/// Share of a tree's investable skills sitting at their cap, in percent.
///
/// A skill counts only once fully capped; partial investment does not.
/// Passives stay out of the ratio entirely. Trees without investable
/// skills report `0.0`.
pub fn tree_progress(catalog: &Catalog, points: &Allocation, tree: TreeId) -> f32 {
    let Some(def) = catalog.tree(tree) else {
        return 0.0;
    };
    let mut investable = 0u32;
    let mut completed = 0u32;
    for skill in def.skills.iter().filter(|skill| skill.investable()) {
        investable += 1;
        if points.get(SkillRef::new(tree, skill.id)) == skill.max_points {
            completed += 1;
        }
    }
    if investable == 0 {
        return 0.0;
    }
    completed as f32 / investable as f32 * 100.0
}

/// Raw point sum inside one tree. Shared skills count where they sit, so
/// summing this over all trees exceeds [`total_invested`] on shared builds.
pub fn tree_points(points: &Allocation, tree: TreeId) -> u32 {
    points
        .iter()
        .filter(|(skill, _)| skill.tree == tree)
        .map(|(_, value)| value)
        .sum()
}
