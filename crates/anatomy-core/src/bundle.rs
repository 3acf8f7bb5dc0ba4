//! # Bundle Model
//!
//! Typed view of an anatomy knowledge bundle:
//!
//! ```json
//! {
//!   "bundle_id": "anatomy_3d_index",
//!   "entities": [
//!     { "id": "muscle.biceps", "relations": { "origin": ["bone.scapula"] } }
//!   ]
//! }
//! ```
//!
//! ## Lenient decoding
//!
//! Decoding never fails for a parseable document. Fields that are missing or
//! carry the wrong JSON type fall back to empty values:
//!
//! - a non-object root decodes to an empty bundle;
//! - a missing or non-array `entities` decodes to no entities;
//! - a missing or null `id` decodes to the empty string, which never counts
//!   as a duplicate and never satisfies a reference;
//! - a relation value may be an array, a single string, or null.
//!
//! Non-string ids and non-string reference elements are both kept as their
//! compact JSON text, so `{"id": 7}` declares `7` and satisfies a reference
//! to `7`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One of the five recognised cross-reference categories between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    /// Attachment point a muscle originates from.
    Origin,
    /// Attachment point a muscle inserts into.
    Insertion,
    /// Nerve supplying the structure.
    InnervatedBy,
    /// Vessel supplying the structure.
    SuppliedBy,
    /// Neighbouring structure.
    AdjacentTo,
}

impl RelationKind {
    /// Every relation kind, in declaration order.
    pub const ALL: [RelationKind; 5] = [
        Self::Origin,
        Self::Insertion,
        Self::InnervatedBy,
        Self::SuppliedBy,
        Self::AdjacentTo,
    ];

    /// The JSON key for this relation kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Insertion => "insertion",
            Self::InnervatedBy => "innervated_by",
            Self::SuppliedBy => "supplied_by",
            Self::AdjacentTo => "adjacent_to",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-references declared by one entity, grouped by kind.
///
/// Keys outside [`RelationKind`] are ignored during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Relations {
    #[serde(deserialize_with = "references")]
    origin: Vec<String>,
    #[serde(deserialize_with = "references")]
    insertion: Vec<String>,
    #[serde(deserialize_with = "references")]
    innervated_by: Vec<String>,
    #[serde(deserialize_with = "references")]
    supplied_by: Vec<String>,
    #[serde(deserialize_with = "references")]
    adjacent_to: Vec<String>,
}

impl Relations {
    /// Decode relations from raw JSON. Anything other than an object yields
    /// no relations.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        // Every field accepts any JSON value, so decoding an object cannot fail.
        Self::deserialize(value).unwrap_or_default()
    }

    /// The ordered references declared for `kind`.
    pub fn references(&self, kind: RelationKind) -> &[String] {
        match kind {
            RelationKind::Origin => &self.origin,
            RelationKind::Insertion => &self.insertion,
            RelationKind::InnervatedBy => &self.innervated_by,
            RelationKind::SuppliedBy => &self.supplied_by,
            RelationKind::AdjacentTo => &self.adjacent_to,
        }
    }

    /// Mutable access to the references declared for `kind`.
    pub fn references_mut(&mut self, kind: RelationKind) -> &mut Vec<String> {
        match kind {
            RelationKind::Origin => &mut self.origin,
            RelationKind::Insertion => &mut self.insertion,
            RelationKind::InnervatedBy => &mut self.innervated_by,
            RelationKind::SuppliedBy => &mut self.supplied_by,
            RelationKind::AdjacentTo => &mut self.adjacent_to,
        }
    }

    /// Every `(kind, reference)` pair, kinds in [`RelationKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (RelationKind, &str)> + '_ {
        RelationKind::ALL.into_iter().flat_map(move |kind| {
            self.references(kind)
                .iter()
                .map(move |reference| (kind, reference.as_str()))
        })
    }

    /// True if no kind carries any reference.
    pub fn is_empty(&self) -> bool {
        RelationKind::ALL
            .iter()
            .all(|kind| self.references(*kind).is_empty())
    }
}

/// One anatomical structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Entity {
    /// Identifier, empty when the source entity had none.
    #[serde(deserialize_with = "id_or_empty")]
    pub id: String,
    /// Declared cross-references, if any.
    #[serde(deserialize_with = "relations")]
    pub relations: Option<Relations>,
}

impl Entity {
    /// Shorthand for an entity with an id and no relations.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            relations: None,
        }
    }

    /// Attach references of one kind, replacing any previously set.
    pub fn with_relation<I, S>(mut self, kind: RelationKind, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let relations = self.relations.get_or_insert_with(Relations::default);
        *relations.references_mut(kind) = references.into_iter().map(Into::into).collect();
        self
    }

    /// Decode an entity from raw JSON. Non-object values yield an entity
    /// with an empty id and no relations.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

/// A knowledge bundle: descriptive metadata plus an ordered list of entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Bundle {
    /// Bundle identifier, e.g. `anatomy_3d_index`.
    #[serde(deserialize_with = "optional_string")]
    pub bundle_id: Option<String>,
    #[serde(deserialize_with = "optional_string")]
    pub bundle_type: Option<String>,
    #[serde(deserialize_with = "optional_string")]
    pub version: Option<String>,
    #[serde(deserialize_with = "optional_string")]
    pub locale: Option<String>,
    /// Entities in document order.
    #[serde(deserialize_with = "entities")]
    pub entities: Vec<Entity>,
}

impl Bundle {
    /// Build a bundle from entities alone.
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            ..Self::default()
        }
    }

    /// Decode a bundle from a parsed JSON document.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!("bundle root is not a JSON object; treating it as empty");
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn id_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        other => json_text(other),
    })
}

/// Strings as-is, anything else as compact JSON text.
fn json_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn entities<'de, D>(deserializer: D) -> Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Entity::from_value).collect(),
        _ => Vec::new(),
    })
}

fn relations<'de, D>(deserializer: D) -> Result<Option<Relations>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Some(Relations::from_value(value)),
        _ => None,
    })
}

fn references<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(json_text).collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}
