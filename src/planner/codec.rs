//! Build-string codec
//!
//! A build serializes to `_`-joined tokens of the form
//! `<tree letter><skill id>p<points>`, short enough to live in a URL query
//! parameter. Decoding never fails: malformed tokens drop out one by one,
//! and a fully unreadable string falls back to the base64 JSON format that
//! predates the compact one.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::catalog::{Catalog, SkillId, TreeId};

use super::groups::SkillRef;
use super::state::Allocation;

/// Serialize an allocation into the compact build string.
///
/// Tokens follow catalog order, so equal allocations always produce the
/// same string. An empty allocation produces an empty string.
pub fn encode(catalog: &Catalog, points: &Allocation) -> String {
    let mut tokens = Vec::new();
    for tree in catalog.trees() {
        for skill in &tree.skills {
            let value = points.get(SkillRef::new(tree.id, skill.id));
            if value > 0 {
                tokens.push(format!("{}{}p{}", tree.id.short_code(), skill.id, value));
            }
        }
    }
    tokens.join("_")
}

/// Deserialize a build string, compact or legacy.
///
/// The legacy path only runs when the compact decode of a non-empty input
/// produced nothing, so a partially damaged compact string keeps its
/// surviving tokens instead of being reinterpreted.
pub fn decode(catalog: &Catalog, raw: &str) -> Allocation {
    let points = decode_compact(catalog, raw);
    if points.is_empty() && !raw.is_empty() {
        if let Some(legacy) = decode_legacy(catalog, raw) {
            log::info!("Decoded legacy base64 build string");
            return legacy;
        }
    }
    points
}

/// Parse the `collections` query value. Anything outside `0..=99` (or not
/// an integer at all) falls back to the default of 0.
pub fn parse_collections(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(value @ 0..=99) => value as u8,
        _ => 0,
    }
}

fn decode_compact(catalog: &Catalog, raw: &str) -> Allocation {
    let mut points = Allocation::default();
    for token in raw.split('_') {
        let Some((tree, skill, value)) = parse_token(token) else {
            if !token.is_empty() {
                log::debug!("Dropping malformed build token '{token}'");
            }
            continue;
        };
        // Clamp against the catalog cap. Unknown skills cap at 0 and so
        // never enter the allocation.
        let value = value.min(catalog.max_points(tree, skill));
        points.set(SkillRef::new(tree, skill), value);
    }
    points
}

/// Split one `<letter><digits>p<digits>` token. Anything else is `None`.
fn parse_token(token: &str) -> Option<(TreeId, SkillId, u32)> {
    let mut chars = token.chars();
    let tree = TreeId::from_short_code(chars.next()?)?;
    let (id, value) = chars.as_str().split_once('p')?;
    let skill: SkillId = id.parse().ok()?;
    let value: u32 = value.parse().ok()?;
    Some((tree, skill, value))
}

/// The pre-compact format: base64 over JSON `{tree: {skillId: points}}`.
fn decode_legacy(catalog: &Catalog, raw: &str) -> Option<Allocation> {
    let bytes = BASE64.decode(raw).ok()?;
    let nested: HashMap<String, HashMap<String, u32>> = serde_json::from_slice(&bytes).ok()?;

    let mut points = Allocation::default();
    for (tree_key, skills) in &nested {
        let Some(tree) = TreeId::from_slug(tree_key) else {
            log::debug!("Dropping legacy build entry for unknown tree '{tree_key}'");
            continue;
        };
        for (skill_key, &value) in skills {
            let Ok(skill) = skill_key.parse::<SkillId>() else {
                continue;
            };
            let value = value.min(catalog.max_points(tree, skill));
            points.set(SkillRef::new(tree, skill), value);
        }
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Skill, SkillTree};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            SkillTree {
                id: TreeId::FloatFishing,
                skills: vec![
                    Skill::new(1, "Long Casting", 0, 7),
                    Skill::new(2, "Thin Lines", 10, 5),
                ],
            },
            SkillTree {
                id: TreeId::SpinFishing,
                skills: vec![Skill::new(2, "Jig Fishing", 0, 5)],
            },
        ])
    }

    fn refs() -> (SkillRef, SkillRef, SkillRef) {
        (
            SkillRef::new(TreeId::FloatFishing, 1),
            SkillRef::new(TreeId::FloatFishing, 2),
            SkillRef::new(TreeId::SpinFishing, 2),
        )
    }

    #[test]
    fn test_encode_follows_catalog_order() {
        let catalog = catalog();
        let (cast, lines, jig) = refs();

        let mut points = Allocation::default();
        // Insertion order deliberately scrambled.
        points.set(jig, 3);
        points.set(cast, 7);
        points.set(lines, 1);

        assert_eq!(encode(&catalog, &points), "f1p7_f2p1_s2p3");
    }

    #[test]
    fn test_encode_empty_state_is_empty_string() {
        assert_eq!(encode(&catalog(), &Allocation::default()), "");
    }

    #[test]
    fn test_decode_round_trips() {
        let catalog = catalog();
        let (cast, _, jig) = refs();

        let mut points = Allocation::default();
        points.set(cast, 4);
        points.set(jig, 2);

        assert_eq!(decode(&catalog, &encode(&catalog, &points)), points);
        assert_eq!(decode(&catalog, ""), Allocation::default());
    }

    #[test]
    fn test_malformed_tokens_drop_silently() {
        let catalog = catalog();
        assert_eq!(
            decode(&catalog, "f1p7_bogus_s2p3"),
            decode(&catalog, "f1p7_s2p3")
        );
        // Bad ids, bad counts, missing separators.
        assert_eq!(decode(&catalog, "fp7__s2p_f1px"), Allocation::default());
    }

    #[test]
    fn test_unknown_tree_letters_drop() {
        let catalog = catalog();
        let decoded = decode(&catalog, "x1p3_F1p3_f1p3");
        assert_eq!(decoded.get(refs().0), 3);
        assert_eq!(decoded.iter().count(), 1);
    }

    #[test]
    fn test_points_clamp_to_catalog_cap() {
        let catalog = catalog();
        let decoded = decode(&catalog, "f1p99");
        assert_eq!(decoded.get(refs().0), 7);
        // Unknown skill id clamps to zero and vanishes.
        assert!(decode(&catalog, "f9p4").is_empty());
    }

    #[test]
    fn test_duplicate_tokens_last_wins() {
        let catalog = catalog();
        let decoded = decode(&catalog, "f1p2_f1p5");
        assert_eq!(decoded.get(refs().0), 5);
    }

    #[test]
    fn test_legacy_base64_fallback() {
        let catalog = catalog();
        let json = r#"{"float-fishing":{"1":4,"2":1},"spin-fishing":{"2":2}}"#;
        let raw = BASE64.encode(json);

        let decoded = decode(&catalog, &raw);
        let (cast, lines, jig) = refs();
        assert_eq!(decoded.get(cast), 4);
        assert_eq!(decoded.get(lines), 1);
        assert_eq!(decoded.get(jig), 2);
    }

    #[test]
    fn test_legacy_ignores_unknown_trees_and_clamps() {
        let catalog = catalog();
        let json = r#"{"ice-fishing":{"1":4},"float-fishing":{"1":50}}"#;
        let raw = BASE64.encode(json);

        let decoded = decode(&catalog, &raw);
        assert_eq!(decoded.get(refs().0), 7);
        assert_eq!(decoded.iter().count(), 1);
    }

    #[test]
    fn test_unreadable_input_yields_empty_state() {
        let catalog = catalog();
        // Not compact, not valid base64.
        assert!(decode(&catalog, "!!!not-a-build!!!").is_empty());
        // Valid base64, not valid JSON.
        assert!(decode(&catalog, &BASE64.encode("hello there")).is_empty());
    }

    #[test]
    fn test_compact_survivors_suppress_legacy_path() {
        let catalog = catalog();
        // One good token means the string is treated as compact even if the
        // rest is junk.
        let decoded = decode(&catalog, "junk_f2p2_morejunk");
        assert_eq!(decoded.get(refs().1), 2);
        assert_eq!(decoded.iter().count(), 1);
    }

    #[test]
    fn test_parse_collections_range() {
        assert_eq!(parse_collections("0"), 0);
        assert_eq!(parse_collections("42"), 42);
        assert_eq!(parse_collections("99"), 99);
        assert_eq!(parse_collections("100"), 0);
        assert_eq!(parse_collections("-3"), 0);
        assert_eq!(parse_collections("many"), 0);
        assert_eq!(parse_collections(""), 0);
    }
}
