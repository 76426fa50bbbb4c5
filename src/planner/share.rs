//! Share-link query assembly and parsing.
//!
//! The web planner exchanges builds through two query parameters. This is
//! the only module that knows their names; everything else deals in
//! allocations and collection counts.

use crate::catalog::Catalog;

use super::codec;
use super::state::Allocation;

/// Query parameter carrying the compact build string.
pub const POINTS_PARAM: &str = "points";
/// Query parameter carrying the collections offset.
pub const COLLECTIONS_PARAM: &str = "collections";

/// Assemble the share query for a build. The collections parameter is
/// omitted at its default of 0.
pub fn to_query(catalog: &Catalog, points: &Allocation, collections: u8) -> String {
    let build = codec::encode(catalog, points);
    if collections == 0 {
        format!("{POINTS_PARAM}={build}")
    } else {
        format!("{POINTS_PARAM}={build}&{COLLECTIONS_PARAM}={collections}")
    }
}

/// Pull a build out of a share query.
///
/// Accepts an optional leading `?`, ignores unknown parameters, and treats
/// anything unreadable as absent. Never fails.
pub fn from_query(catalog: &Catalog, query: &str) -> (Allocation, u8) {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut build = "";
    let mut collections = 0;
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            POINTS_PARAM => build = value,
            COLLECTIONS_PARAM => collections = codec::parse_collections(value),
            _ => {}
        }
    }

    (codec::decode(catalog, build), collections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Skill, SkillTree, TreeId};
    use crate::planner::groups::SkillRef;

    fn catalog() -> Catalog {
        Catalog::new(vec![SkillTree {
            id: TreeId::FloatFishing,
            skills: vec![
                Skill::new(1, "Long Casting", 0, 7),
                Skill::new(2, "Thin Lines", 10, 5),
            ],
        }])
    }

    #[test]
    fn test_query_round_trip() {
        let catalog = catalog();
        let mut points = Allocation::default();
        points.set(SkillRef::new(TreeId::FloatFishing, 1), 4);

        let query = to_query(&catalog, &points, 42);
        assert_eq!(query, "points=f1p4&collections=42");

        let (restored, collections) = from_query(&catalog, &query);
        assert_eq!(restored, points);
        assert_eq!(collections, 42);
    }

    #[test]
    fn test_zero_collections_omitted() {
        let catalog = catalog();
        let mut points = Allocation::default();
        points.set(SkillRef::new(TreeId::FloatFishing, 2), 1);

        assert_eq!(to_query(&catalog, &points, 0), "points=f2p1");
    }

    #[test]
    fn test_leading_question_mark_and_strangers_ignored() {
        let catalog = catalog();
        let (points, collections) =
            from_query(&catalog, "?utm_source=forum&points=f1p3&theme=dark");

        assert_eq!(points.get(SkillRef::new(TreeId::FloatFishing, 1)), 3);
        assert_eq!(collections, 0);
    }

    #[test]
    fn test_out_of_range_collections_defaults() {
        let catalog = catalog();
        let (_, collections) = from_query(&catalog, "points=&collections=120");
        assert_eq!(collections, 0);

        let (_, collections) = from_query(&catalog, "points=&collections=-1");
        assert_eq!(collections, 0);
    }

    #[test]
    fn test_empty_query_is_empty_build() {
        let catalog = catalog();
        let (points, collections) = from_query(&catalog, "");
        assert!(points.is_empty());
        assert_eq!(collections, 0);
    }
}
