//! Skill definitions and sharing rules
//!
//! A skill is catalog data: a point cap, an informational unlock threshold,
//! and zero or more links to skills whose invested points move together
//! with it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique skill ID within a tree
pub type SkillId = u32;

/// Same-tree sharing categories.
///
/// Every skill in one tree carrying the same tag keeps its invested points
/// in sync with the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    DiggingTools,
    ScoopingTools,
    MetalLures,
    WoodenLures,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 4] = [
        CategoryTag::DiggingTools,
        CategoryTag::ScoopingTools,
        CategoryTag::MetalLures,
        CategoryTag::WoodenLures,
    ];

    /// Human phrasing used in catalog annotations and the UI.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTag::DiggingTools => "digging tools",
            CategoryTag::ScoopingTools => "scooping tools",
            CategoryTag::MetalLures => "metal lures",
            CategoryTag::WoodenLures => "wooden lures",
        }
    }

    /// Canonical annotation phrase, as written in catalog files.
    pub fn annotation(&self) -> &'static str {
        match self {
            CategoryTag::DiggingTools => "all digging-tool points are shared",
            CategoryTag::ScoopingTools => "all scooping-tool points are shared",
            CategoryTag::MetalLures => "all metal-lure points are shared",
            CategoryTag::WoodenLures => "all wooden-lure points are shared",
        }
    }

    /// Match a textual annotation against the fixed tags.
    ///
    /// Annotations are hand-written ("all digging-tool points are shared",
    /// "shared among digging tools", ...), so matching is by keyword rather
    /// than exact phrase.
    fn from_annotation(text: &str) -> Option<CategoryTag> {
        let text = text.to_ascii_lowercase().replace('-', " ");
        CategoryTag::ALL.iter().copied().find(|tag| {
            // Singular form matches both "digging tool" and "digging tools"
            let keyword = tag.label().trim_end_matches('s');
            text.contains(keyword)
        })
    }
}

/// How a skill's invested points are linked to other skills.
///
/// In catalog files a rule is written as a raw annotation string; in memory
/// it is typed, so the group resolver never parses text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharingRule {
    /// Linked with one named skill in another tree.
    CrossTree { tree: String, skill: String },
    /// Linked with every skill in the same tree carrying this tag.
    Category(CategoryTag),
}

impl SharingRule {
    /// Build a cross-tree link from tree and skill display names.
    pub fn cross(tree: impl Into<String>, skill: impl Into<String>) -> Self {
        SharingRule::CrossTree {
            tree: tree.into(),
            skill: skill.into(),
        }
    }

    /// Parse a raw catalog annotation.
    ///
    /// Cross-tree links are written `"<Tree Name> - <Skill Name>"`; anything
    /// else is matched against the fixed category tags. Returns `None` for
    /// annotations that fit neither form; the resolver treats those as
    /// no-ops.
    pub fn parse(raw: &str) -> Option<SharingRule> {
        let raw = raw.trim();
        if let Some((tree, skill)) = raw.split_once(" - ") {
            let tree = tree.trim();
            let skill = skill.trim();
            if !tree.is_empty() && !skill.is_empty() {
                return Some(SharingRule::cross(tree, skill));
            }
        }
        CategoryTag::from_annotation(raw).map(SharingRule::Category)
    }

    /// The raw annotation form this rule serializes to.
    pub fn annotation(&self) -> String {
        match self {
            SharingRule::CrossTree { tree, skill } => format!("{tree} - {skill}"),
            SharingRule::Category(tag) => tag.annotation().to_string(),
        }
    }
}

/// A skill definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Mastery percentage at which the skill unlocks. Informational only;
    /// the planner does not enforce it.
    pub unlock_percent: u8,
    /// Point cap. `0` marks a passive skill that takes no points.
    pub max_points: u32,
    /// Links to skills whose invested points move together with this one.
    /// Stored in catalog files as raw annotation strings.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "annotations_to_raw",
        deserialize_with = "annotations_from_raw"
    )]
    pub shared_with: Vec<SharingRule>,
}

/// Write sharing rules in their raw annotation form.
fn annotations_to_raw<S>(rules: &[SharingRule], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(rules.iter().map(SharingRule::annotation))
}

/// Read raw annotations, dropping any that fit no known form.
fn annotations_from_raw<'de, D>(deserializer: D) -> Result<Vec<SharingRule>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|text| {
            let rule = SharingRule::parse(text);
            if rule.is_none() {
                log::debug!("Ignoring unrecognized sharing annotation '{text}'");
            }
            rule
        })
        .collect())
}

impl Skill {
    /// Convenience constructor for catalog content and tests.
    pub fn new(id: SkillId, name: impl Into<String>, unlock_percent: u8, max_points: u32) -> Self {
        Self {
            id,
            name: name.into(),
            unlock_percent,
            max_points,
            shared_with: Vec::new(),
        }
    }

    /// Attach a sharing rule (builder-style).
    pub fn shared(mut self, rule: SharingRule) -> Self {
        self.shared_with.push(rule);
        self
    }

    /// Whether the skill can take points at all.
    pub fn investable(&self) -> bool {
        self.max_points > 0
    }
}
